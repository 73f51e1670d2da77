//! Bus handle abstraction
//!
//! A display controller accepts register writes over one of two
//! incompatible bus APIs:
//!
//! - **byte-stream**: hand the raw bytes to the bus, get back a count
//! - **framed transfer**: hand over a list of [`Frame`] descriptors, each
//!   carrying its own length and chip-select behaviour
//!
//! A handle advertises which of the two it supports through
//! [`BusHandle::capabilities`]. The unsupported operation keeps its default
//! body, which fails with [`Unsupported`].

use crate::frame::{Frame, TransferResult};

/// Marker error for an operation the handle does not implement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Unsupported;

impl core::fmt::Display for Unsupported {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("operation not supported by this bus")
    }
}

impl core::error::Error for Unsupported {}

/// Operations a bus handle exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Capabilities {
    /// `write(bytes) -> count` is available
    pub write: bool,
    /// `transfer(frames) -> result` is available
    pub transfer: bool,
}

impl Capabilities {
    /// Handle exposes nothing usable
    pub const NONE: Self = Self {
        write: false,
        transfer: false,
    };

    /// Byte-stream handle
    pub const WRITE: Self = Self {
        write: true,
        transfer: false,
    };

    /// Framed-transfer handle
    pub const TRANSFER: Self = Self {
        write: false,
        transfer: true,
    };

    /// Check if neither operation is available
    pub fn is_empty(&self) -> bool {
        !self.write && !self.transfer
    }
}

/// Serial bus handle
///
/// Implementors override [`capabilities`](Self::capabilities) and the
/// operation(s) they actually support. The handle is only borrowed by the
/// driver: implement this for `&mut T` style wrappers when the caller wants
/// to keep ownership (a blanket impl for `&mut B` is provided).
#[allow(async_fn_in_trait)]
pub trait BusHandle {
    /// Error type for bus operations
    type Error: core::fmt::Debug + From<Unsupported>;

    /// Report which operations this handle exposes
    fn capabilities(&self) -> Capabilities;

    /// Write a byte sequence, returning the number of bytes written
    async fn write(&mut self, data: &[u8]) -> Result<usize, Self::Error> {
        let _ = data;
        Err(Unsupported.into())
    }

    /// Transfer a message made of one or more frames
    ///
    /// Completes once every frame has been clocked out.
    async fn transfer(&mut self, message: &[Frame]) -> Result<TransferResult, Self::Error> {
        let _ = message;
        Err(Unsupported.into())
    }
}

impl<B: BusHandle + ?Sized> BusHandle for &mut B {
    type Error = B::Error;

    fn capabilities(&self) -> Capabilities {
        (**self).capabilities()
    }

    async fn write(&mut self, data: &[u8]) -> Result<usize, Self::Error> {
        (**self).write(data).await
    }

    async fn transfer(&mut self, message: &[Frame]) -> Result<TransferResult, Self::Error> {
        (**self).transfer(message).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum MockError {
        Unsupported,
    }

    impl From<Unsupported> for MockError {
        fn from(_: Unsupported) -> Self {
            MockError::Unsupported
        }
    }

    struct WriteOnly {
        written: usize,
    }

    impl BusHandle for WriteOnly {
        type Error = MockError;

        fn capabilities(&self) -> Capabilities {
            Capabilities::WRITE
        }

        async fn write(&mut self, data: &[u8]) -> Result<usize, Self::Error> {
            self.written += data.len();
            Ok(data.len())
        }
    }

    #[test]
    fn test_capability_constants() {
        assert!(Capabilities::NONE.is_empty());
        assert!(!Capabilities::WRITE.is_empty());
        assert!(Capabilities::TRANSFER.transfer);
        assert_eq!(Capabilities::default(), Capabilities::NONE);
    }

    #[test]
    fn test_default_transfer_is_unsupported() {
        let mut bus = WriteOnly { written: 0 };
        let result = embassy_futures::block_on(bus.transfer(&[]));
        assert_eq!(result, Err(MockError::Unsupported));
    }

    #[test]
    fn test_mut_ref_forwards() {
        let mut bus = WriteOnly { written: 0 };
        {
            let mut handle = &mut bus;
            assert_eq!(handle.capabilities(), Capabilities::WRITE);
            let n = embassy_futures::block_on(handle.write(&[0x0c, 0x01])).unwrap();
            assert_eq!(n, 2);
        }
        assert_eq!(bus.written, 2);
    }
}
