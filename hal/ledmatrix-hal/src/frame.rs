//! Frame descriptors for framed-transfer buses
//!
//! A message is a list of frames. Each frame carries:
//! - BYTE LENGTH: number of bytes to clock out
//! - SEND BUFFER: a copy of the bytes
//! - CHIP SELECT CHANGE: deselect the chip after this frame
//!
//! MAX7219-family controllers latch the shifted-in word on the rising edge
//! of chip select, so every register write must be its own frame with
//! `chip_select_change` set.

use heapless::Vec;

/// Maximum bytes carried by a single frame
pub const MAX_FRAME_SIZE: usize = 32;

/// Maximum frames in one message
pub const MAX_FRAMES: usize = 8;

/// Errors that can occur while building a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Payload exceeds [`MAX_FRAME_SIZE`]
    PayloadTooLarge,
}

impl core::fmt::Display for FrameError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::PayloadTooLarge => write!(f, "frame payload exceeds {MAX_FRAME_SIZE} bytes"),
        }
    }
}

impl core::error::Error for FrameError {}

/// A single transfer frame
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    /// Number of bytes to send
    pub byte_length: usize,
    /// Bytes to send
    pub send_buffer: Vec<u8, MAX_FRAME_SIZE>,
    /// Toggle chip select once this frame completes
    pub chip_select_change: bool,
}

impl Frame {
    /// Create a frame that toggles chip select after sending `data`
    pub fn new(data: &[u8]) -> Result<Self, FrameError> {
        let mut send_buffer = Vec::new();
        send_buffer
            .extend_from_slice(data)
            .map_err(|_| FrameError::PayloadTooLarge)?;

        Ok(Self {
            byte_length: data.len(),
            send_buffer,
            chip_select_change: true,
        })
    }

    /// Bytes that will actually go out on the wire
    ///
    /// Clamped to the buffer in case `byte_length` was edited by hand.
    pub fn bytes(&self) -> &[u8] {
        let len = self.byte_length.min(self.send_buffer.len());
        &self.send_buffer[..len]
    }
}

/// Outcome of a completed transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TransferResult {
    /// Bytes actually transferred
    pub byte_length: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_new() {
        let frame = Frame::new(&[0x0a, 0x03]).unwrap();

        assert_eq!(frame.byte_length, 2);
        assert_eq!(frame.send_buffer.as_slice(), &[0x0a, 0x03]);
        assert!(frame.chip_select_change);
    }

    #[test]
    fn test_frame_empty_payload() {
        let frame = Frame::new(&[]).unwrap();
        assert_eq!(frame.byte_length, 0);
        assert!(frame.bytes().is_empty());
    }

    #[test]
    fn test_payload_too_large() {
        let large_payload = [0u8; MAX_FRAME_SIZE + 1];
        assert_eq!(Frame::new(&large_payload), Err(FrameError::PayloadTooLarge));
    }

    #[test]
    fn test_bytes_clamped_to_buffer() {
        let mut frame = Frame::new(&[1, 2, 3]).unwrap();
        frame.byte_length = 10;
        assert_eq!(frame.bytes(), &[1, 2, 3]);

        frame.byte_length = 1;
        assert_eq!(frame.bytes(), &[1]);
    }
}
