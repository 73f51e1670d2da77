//! Framed-transfer handle over an SPI device
//!
//! Consecutive frames are grouped into one SPI transaction until a frame
//! asks for a chip-select change; the transaction then ends, which
//! deasserts chip select and latches the data on MAX7219-family chips.

use embedded_hal_async::spi::{Operation, SpiDevice};
use heapless::Vec;
use ledmatrix_hal::{BusHandle, Capabilities, Frame, TransferResult, MAX_FRAMES};

use super::SpiHandleError;

/// Framed-transfer bus handle
pub struct SpiDeviceHandle<D> {
    device: D,
}

impl<D> SpiDeviceHandle<D>
where
    D: SpiDevice<u8>,
{
    /// Wrap an SPI device
    pub fn new(device: D) -> Self {
        Self { device }
    }

    /// Release the SPI device
    pub fn release(self) -> D {
        self.device
    }
}

impl<D> BusHandle for SpiDeviceHandle<D>
where
    D: SpiDevice<u8>,
{
    type Error = SpiHandleError<D::Error>;

    fn capabilities(&self) -> Capabilities {
        Capabilities::TRANSFER
    }

    async fn transfer(&mut self, message: &[Frame]) -> Result<TransferResult, Self::Error> {
        let mut byte_length = 0;
        let mut operations: Vec<Operation<'_, u8>, MAX_FRAMES> = Vec::new();

        for frame in message {
            operations
                .push(Operation::Write(frame.bytes()))
                .map_err(|_| SpiHandleError::MessageTooLong)?;
            byte_length += frame.bytes().len();

            if frame.chip_select_change {
                self.device
                    .transaction(operations.as_mut_slice())
                    .await
                    .map_err(SpiHandleError::Spi)?;
                operations.clear();
            }
        }

        // Trailing frames without a chip-select change still go out
        if !operations.is_empty() {
            self.device
                .transaction(operations.as_mut_slice())
                .await
                .map_err(SpiHandleError::Spi)?;
        }

        Ok(TransferResult { byte_length })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;
    use embedded_hal::spi::{ErrorKind, ErrorType};
    use ledmatrix_core::error::{BusFault, ConnectionError, ResetCause, ResetStep};
    use ledmatrix_core::{Device, Error, Settings, Strategy};

    /// Mock SPI device; each transaction is one chip-select assertion
    #[derive(Default)]
    struct MockSpiDevice {
        transactions: std::vec::Vec<std::vec::Vec<std::vec::Vec<u8>>>,
        fail: bool,
    }

    impl ErrorType for MockSpiDevice {
        type Error = ErrorKind;
    }

    impl SpiDevice<u8> for MockSpiDevice {
        async fn transaction(
            &mut self,
            operations: &mut [Operation<'_, u8>],
        ) -> Result<(), Self::Error> {
            if self.fail {
                return Err(ErrorKind::ChipSelectFault);
            }
            let writes = operations
                .iter()
                .filter_map(|op| match op {
                    Operation::Write(words) => Some(words.to_vec()),
                    _ => None,
                })
                .collect();
            self.transactions.push(writes);
            Ok(())
        }
    }

    fn frame(data: &[u8], chip_select_change: bool) -> Frame {
        let mut frame = Frame::new(data).unwrap();
        frame.chip_select_change = chip_select_change;
        frame
    }

    #[test]
    fn test_one_transaction_per_frame() {
        let mut handle = SpiDeviceHandle::new(MockSpiDevice::default());

        let message = [frame(&[0x0c, 0x01], true), frame(&[0x0f, 0x00], true)];
        let result = block_on(handle.transfer(&message)).unwrap();
        assert_eq!(result.byte_length, 4);

        let spi = handle.release();
        assert_eq!(
            spi.transactions,
            vec![vec![vec![0x0c, 0x01]], vec![vec![0x0f, 0x00]]]
        );
    }

    #[test]
    fn test_frames_grouped_until_chip_select_change() {
        let mut handle = SpiDeviceHandle::new(MockSpiDevice::default());

        let message = [
            frame(&[0x01], false),
            frame(&[0x02], true),
            frame(&[0x03], false),
        ];
        let result = block_on(handle.transfer(&message)).unwrap();
        assert_eq!(result.byte_length, 3);

        let spi = handle.release();
        assert_eq!(
            spi.transactions,
            vec![vec![vec![0x01], vec![0x02]], vec![vec![0x03]]]
        );
    }

    #[test]
    fn test_too_many_frames_without_chip_select_change() {
        let mut handle = SpiDeviceHandle::new(MockSpiDevice::default());

        let message: std::vec::Vec<Frame> =
            (0..=MAX_FRAMES as u8).map(|i| frame(&[i], false)).collect();
        let err = block_on(handle.transfer(&message)).unwrap_err();
        assert_eq!(err, SpiHandleError::MessageTooLong);
    }

    #[test]
    fn test_write_unsupported() {
        let mut handle = SpiDeviceHandle::new(MockSpiDevice::default());
        let err = block_on(handle.write(&[0x0c, 0x01])).unwrap_err();
        assert_eq!(err, SpiHandleError::Unsupported);
    }

    #[test]
    fn test_device_binds_framed() {
        let mut handle = SpiDeviceHandle::new(MockSpiDevice::default());
        let mut device = Device::new(Settings::default().with_length(4));

        assert_eq!(block_on(device.open(&mut handle)), Ok(true));
        assert_eq!(device.strategy(), Some(Strategy::Framed));
        drop(device);

        let spi = handle.release();
        // shutdown, 4 config writes, 4 clears, wake; each latched on its own
        assert_eq!(spi.transactions.len(), 10);
        assert!(spi.transactions.iter().all(|t| t.len() == 1 && t[0].len() == 2));
        assert_eq!(spi.transactions[0][0], vec![0x0c, 0x00]);
        assert_eq!(spi.transactions[9][0], vec![0x0c, 0x01]);
    }

    #[test]
    fn test_device_open_reports_spi_fault() {
        let mut handle = SpiDeviceHandle::new(MockSpiDevice {
            fail: true,
            ..Default::default()
        });
        let mut device = Device::new(Settings::default());

        let err = block_on(device.open(&mut handle)).unwrap_err();
        match err {
            Error::Connection(ConnectionError::Reset {
                step: ResetStep::Shutdown,
                cause: ResetCause::WriteMessage(e),
            }) => {
                assert_eq!(
                    e.fault,
                    BusFault::Bus(SpiHandleError::Spi(ErrorKind::ChipSelectFault))
                );
                assert_eq!(e.frame.bytes(), &[0x0c, 0x00]);
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert!(!device.is_open());
    }
}
