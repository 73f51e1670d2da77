//! Device settings
//!
//! Stored alongside the device for its whole lifetime. The op-code table
//! can only be replaced as a whole.

use crate::opcodes::{OpCodeTable, DIGIT_COUNT};

use super::types::{DecodeMode, Intensity, SettingError};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Fewest digits/rows the scan limit can select
pub const MIN_LENGTH: u8 = 1;

/// Most digits/rows the scan limit can select
pub const MAX_LENGTH: u8 = DIGIT_COUNT;

/// Default digit/row count
pub const DEFAULT_LENGTH: u8 = 8;

/// Default intensity level
pub const DEFAULT_INTENSITY: u8 = 3;

/// Display controller settings
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Settings {
    /// Digit (7-segment) or row (matrix) count, 1-8
    pub length: u8,
    /// Brightness
    pub intensity: Intensity,
    /// Digit decode mode
    pub decode_mode: DecodeMode,
    /// Register table
    #[cfg_attr(feature = "serde", serde(skip))]
    pub op_codes: OpCodeTable,
    /// Deadline for a single bus transaction, in milliseconds
    pub write_timeout_ms: Option<u32>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            length: DEFAULT_LENGTH,
            intensity: Intensity::Level(DEFAULT_INTENSITY),
            decode_mode: DecodeMode::Off,
            op_codes: OpCodeTable::MAX7219,
            write_timeout_ms: None,
        }
    }
}

impl Settings {
    /// Set the digit/row count
    pub fn with_length(mut self, length: u8) -> Self {
        self.length = length;
        self
    }

    /// Set the brightness
    pub fn with_intensity(mut self, intensity: impl Into<Intensity>) -> Self {
        self.intensity = intensity.into();
        self
    }

    /// Set the decode mode
    pub fn with_decode_mode(mut self, decode_mode: DecodeMode) -> Self {
        self.decode_mode = decode_mode;
        self
    }

    /// Replace the op-code table
    pub fn with_op_codes(mut self, op_codes: OpCodeTable) -> Self {
        self.op_codes = op_codes;
        self
    }

    /// Bound every bus transaction by a deadline
    pub fn with_write_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.write_timeout_ms = Some(timeout_ms);
        self
    }

    /// Check every value resolves against the op-code table
    pub fn validate(&self) -> Result<(), SettingError> {
        if !(MIN_LENGTH..=MAX_LENGTH).contains(&self.length) {
            return Err(SettingError::InvalidLength(self.length));
        }
        if self.intensity.resolve(&self.op_codes).is_none() {
            return Err(SettingError::InvalidIntensity(self.intensity.clone()));
        }
        if self.decode_mode.resolve(&self.op_codes).is_none() {
            return Err(SettingError::InvalidDecodeMode(self.decode_mode.clone()));
        }
        Ok(())
    }
}
