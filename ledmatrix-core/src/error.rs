//! Error types for the driver
//!
//! Every failure is surfaced to the caller with enough context to diagnose
//! it without re-running: the attempted bytes or frame, the device status,
//! and the original bus fault. Nothing is retried or swallowed.
//!
//! ## Error Types
//!
//! - [`Error`] - Everything a device operation can return
//! - [`StatusError`] - Operation invoked in the wrong lifecycle state
//! - [`ConnectionError`] - Bus lacks a usable capability, or bring-up failed
//! - [`WriteError`] / [`WriteMessageError`] - Bus transaction failed, per
//!   write strategy
//! - [`SettingError`] - Value does not resolve to a register byte
//!
//! Generic over the bus error type `E` so callers can match on the
//! underlying hardware fault.

use heapless::Vec;
use ledmatrix_hal::{Capabilities, Frame, MAX_FRAME_SIZE};

use crate::config::SettingError;
use crate::state::ConnectionStatus;

/// Bytes echoed back in a write failure
pub type Payload = Vec<u8, MAX_FRAME_SIZE>;

/// Low-level cause of a failed bus transaction
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusFault<E> {
    /// The bus reported an error
    Bus(E),
    /// The transaction missed the configured deadline
    Timeout,
}

/// Byte-stream write failed
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WriteError<E> {
    /// What went wrong on the bus
    pub fault: BusFault<E>,
    /// Bytes that were being written
    pub data: Payload,
}

/// Framed transfer failed
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WriteMessageError<E> {
    /// What went wrong on the bus
    pub fault: BusFault<E>,
    /// Frame that was being transferred
    pub frame: Frame,
    /// Capabilities of the handle the frame was sent to
    pub bus: Capabilities,
}

/// Bus handle exposes neither write nor transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TransportBindError {
    /// What the handle reported
    pub capabilities: Capabilities,
}

/// Operation invoked in the wrong lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StatusError {
    /// `open` called on an open device
    AlreadyOpen(ConnectionStatus),
    /// Write issued before the device was opened
    NotOpen(ConnectionStatus),
}

/// Step of the bring-up sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ResetStep {
    /// Blank the display
    Shutdown,
    /// Disable display test
    Test,
    /// Set decode mode
    DecodeMode,
    /// Set scan limit
    ScanLimit,
    /// Set intensity
    Intensity,
    /// Zero every digit register
    Clear,
    /// Leave shutdown
    Wake,
}

/// Underlying failure of a bring-up step
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ResetCause<E> {
    /// Byte-stream write failed
    Write(WriteError<E>),
    /// Framed transfer failed
    WriteMessage(WriteMessageError<E>),
    /// A configured value did not resolve
    Setting(SettingError),
}

/// Bus unusable, or device bring-up failed
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConnectionError<E> {
    /// Handle exposes no usable capability
    UnsupportedBus(TransportBindError),
    /// A bring-up step failed; the device stays unopened
    Reset {
        /// Step that failed
        step: ResetStep,
        /// Why it failed
        cause: ResetCause<E>,
    },
}

/// Errors returned by device operations
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Wrong lifecycle state
    Status(StatusError),
    /// Bus unusable or bring-up failed
    Connection(ConnectionError<E>),
    /// Byte-stream write failed
    Write(WriteError<E>),
    /// Framed transfer failed
    WriteMessage(WriteMessageError<E>),
    /// Setting value rejected before any write
    Setting(SettingError),
    /// Payload longer than a single frame
    PayloadTooLarge(usize),
}

impl<E> Error<E> {
    /// Check if this is a bus transaction failure (either strategy)
    pub fn is_write_error(&self) -> bool {
        matches!(self, Error::Write(_) | Error::WriteMessage(_))
    }

    /// Wrap a bring-up failure into a [`ConnectionError`]
    ///
    /// Errors that cannot originate from a bring-up step pass through.
    pub fn during(self, step: ResetStep) -> Self {
        let cause = match self {
            Error::Write(e) => ResetCause::Write(e),
            Error::WriteMessage(e) => ResetCause::WriteMessage(e),
            Error::Setting(e) => ResetCause::Setting(e),
            other => return other,
        };
        Error::Connection(ConnectionError::Reset { step, cause })
    }
}

impl<E> From<StatusError> for Error<E> {
    fn from(e: StatusError) -> Self {
        Error::Status(e)
    }
}

impl<E> From<SettingError> for Error<E> {
    fn from(e: SettingError) -> Self {
        Error::Setting(e)
    }
}

impl<E> From<TransportBindError> for Error<E> {
    fn from(e: TransportBindError) -> Self {
        Error::Connection(ConnectionError::UnsupportedBus(e))
    }
}

impl<E: core::fmt::Debug> core::fmt::Display for BusFault<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Bus(e) => write!(f, "{e:?}"),
            Self::Timeout => write!(f, "timed out"),
        }
    }
}

impl<E: core::fmt::Debug> core::fmt::Display for Error<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Status(StatusError::AlreadyOpen(_)) => write!(f, "Device is already open"),
            Self::Status(StatusError::NotOpen(_)) => write!(f, "Open device before writing to it"),
            Self::Connection(ConnectionError::UnsupportedBus(_)) => write!(f, "Invalid connection"),
            Self::Connection(ConnectionError::Reset { step, cause }) => {
                write!(f, "Error opening connection to device at {step:?}: ")?;
                match cause {
                    ResetCause::Write(e) => write!(f, "{}", e.fault),
                    ResetCause::WriteMessage(e) => write!(f, "{}", e.fault),
                    ResetCause::Setting(e) => write!(f, "{e}"),
                }
            }
            Self::Write(e) => {
                write!(f, "Error writing to device: {} (data {:?})", e.fault, e.data)
            }
            Self::WriteMessage(e) => {
                write!(
                    f,
                    "Error writing message to device: {} (frame {:?})",
                    e.fault,
                    e.frame.bytes()
                )
            }
            Self::Setting(e) => write!(f, "{e}"),
            Self::PayloadTooLarge(len) => {
                write!(f, "Payload of {len} bytes exceeds {MAX_FRAME_SIZE}")
            }
        }
    }
}

impl<E: core::fmt::Debug> core::error::Error for Error<E> {}
