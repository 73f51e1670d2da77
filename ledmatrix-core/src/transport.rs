//! Transport adapter
//!
//! Binds a bus handle to one of two write strategies, once, when the
//! device is opened:
//!
//! - **byte-stream**: bytes go to [`BusHandle::write`] unmodified
//! - **framed**: bytes are copied into a single [`Frame`] with
//!   `chip_select_change` set and sent through [`BusHandle::transfer`]
//!
//! A handle exposing both is bound to the byte-stream strategy.

use core::future::Future;

use embassy_time::{with_timeout, Duration};
use ledmatrix_hal::{BusHandle, Frame, MAX_FRAME_SIZE};

use crate::error::{BusFault, Error, Payload, TransportBindError, WriteError, WriteMessageError};

/// Write strategy chosen for a bus handle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Strategy {
    /// Raw byte sequence through `write`
    ByteStream,
    /// One chip-select-toggling frame per write through `transfer`
    Framed,
}

/// Result of a successful write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Written {
    /// Bytes the bus reported as transferred
    pub bytes_written: usize,
}

impl core::ops::Add for Written {
    type Output = Written;

    fn add(self, rhs: Written) -> Written {
        Written {
            bytes_written: self.bytes_written + rhs.bytes_written,
        }
    }
}

/// A bus handle bound to its write strategy
pub struct Transport<B> {
    bus: B,
    strategy: Strategy,
    timeout: Option<Duration>,
}

impl<B: BusHandle> Transport<B> {
    /// Inspect the handle's capabilities and bind a strategy
    pub fn bind(bus: B) -> Result<Self, TransportBindError> {
        let capabilities = bus.capabilities();
        let strategy = if capabilities.write {
            Strategy::ByteStream
        } else if capabilities.transfer {
            Strategy::Framed
        } else {
            return Err(TransportBindError { capabilities });
        };

        Ok(Self {
            bus,
            strategy,
            timeout: None,
        })
    }

    /// Bound every bus transaction by `timeout`
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Strategy chosen at bind time
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Write `data` as a single bus transaction
    pub async fn write(&mut self, data: &[u8]) -> Result<Written, Error<B::Error>> {
        if data.len() > MAX_FRAME_SIZE {
            return Err(Error::PayloadTooLarge(data.len()));
        }

        match self.strategy {
            Strategy::ByteStream => self.write_stream(data).await,
            Strategy::Framed => self.write_message(data).await,
        }
    }

    async fn write_stream(&mut self, data: &[u8]) -> Result<Written, Error<B::Error>> {
        match deadline(self.timeout, self.bus.write(data)).await {
            Ok(bytes_written) => Ok(Written { bytes_written }),
            Err(fault) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("byte-stream write of {=[u8]:x} failed", data);

                Err(Error::Write(WriteError {
                    fault,
                    data: Payload::from_slice(data).unwrap_or_default(),
                }))
            }
        }
    }

    async fn write_message(&mut self, data: &[u8]) -> Result<Written, Error<B::Error>> {
        let frame = Frame::new(data).map_err(|_| Error::PayloadTooLarge(data.len()))?;
        let message = [frame];

        let result = deadline(self.timeout, self.bus.transfer(&message)).await;
        let [frame] = message;

        match result {
            Ok(msg) => Ok(Written {
                bytes_written: msg.byte_length,
            }),
            Err(fault) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("framed transfer of {=[u8]:x} failed", data);

                Err(Error::WriteMessage(WriteMessageError {
                    fault,
                    frame,
                    bus: self.bus.capabilities(),
                }))
            }
        }
    }
}

/// Await a bus operation, optionally racing it against a deadline
async fn deadline<T, E>(
    timeout: Option<Duration>,
    op: impl Future<Output = Result<T, E>>,
) -> Result<T, BusFault<E>> {
    match timeout {
        Some(timeout) => match with_timeout(timeout, op).await {
            Ok(result) => result.map_err(BusFault::Bus),
            Err(_) => Err(BusFault::Timeout),
        },
        None => op.await.map_err(BusFault::Bus),
    }
}
