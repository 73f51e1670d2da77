//! SPI bus handles
//!
//! Both handles share [`SpiHandleError`] so callers can match on the
//! underlying SPI fault the same way whichever strategy is bound.

pub mod bus;
pub mod device;

pub use bus::SpiBusHandle;
pub use device::SpiDeviceHandle;

use ledmatrix_hal::Unsupported;

/// Errors returned by the SPI bus handles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpiHandleError<E> {
    /// The SPI peripheral reported an error
    Spi(E),
    /// Operation not offered by this handle
    Unsupported,
    /// More consecutive frames without a chip-select change than fit in one transaction
    MessageTooLong,
}

impl<E> From<Unsupported> for SpiHandleError<E> {
    fn from(_: Unsupported) -> Self {
        SpiHandleError::Unsupported
    }
}

impl<E: core::fmt::Debug> core::fmt::Display for SpiHandleError<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Spi(e) => write!(f, "SPI error: {e:?}"),
            Self::Unsupported => write!(f, "operation not supported by this bus"),
            Self::MessageTooLong => write!(f, "message has too many frames"),
        }
    }
}

impl<E: core::fmt::Debug> core::error::Error for SpiHandleError<E> {}
