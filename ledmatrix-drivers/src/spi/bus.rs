//! Byte-stream handle over a raw SPI bus
//!
//! Chip select is not touched; the caller drives it (or the board ties
//! it to a pin toggled elsewhere).

use embedded_hal_async::spi::SpiBus;
use ledmatrix_hal::{BusHandle, Capabilities};

use super::SpiHandleError;

/// Byte-stream bus handle
pub struct SpiBusHandle<S> {
    spi: S,
}

impl<S> SpiBusHandle<S>
where
    S: SpiBus<u8>,
{
    /// Wrap an SPI bus
    ///
    /// The bus must run in mode 0 at 10 MHz or less.
    pub fn new(spi: S) -> Self {
        Self { spi }
    }

    /// Release the SPI bus
    pub fn release(self) -> S {
        self.spi
    }
}

impl<S> BusHandle for SpiBusHandle<S>
where
    S: SpiBus<u8>,
{
    type Error = SpiHandleError<S::Error>;

    fn capabilities(&self) -> Capabilities {
        Capabilities::WRITE
    }

    async fn write(&mut self, data: &[u8]) -> Result<usize, Self::Error> {
        self.spi.write(data).await.map_err(SpiHandleError::Spi)?;
        // Count only once the bytes are on the wire
        self.spi.flush().await.map_err(SpiHandleError::Spi)?;
        Ok(data.len())
    }
}
