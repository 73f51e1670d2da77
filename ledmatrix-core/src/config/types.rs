//! Configuration value types
//!
//! Intensity and decode mode accept either raw numbers or names resolved
//! through the [`OpCodeTable`]. Resolution happens at write time so a
//! substituted table is always honoured.

use heapless::String;

use crate::opcodes::OpCodeTable;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum length of a named level or mode
pub const MAX_NAME_LEN: usize = 16;

/// Name of a table entry (e.g. `"max"`, `"all"`)
///
/// Input longer than [`MAX_NAME_LEN`] keeps its first characters for
/// diagnostics but is marked as cut short and never resolves.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Name {
    text: String<MAX_NAME_LEN>,
    truncated: bool,
}

impl Name {
    /// Build a name from `s`
    pub fn new(s: &str) -> Self {
        let mut text = String::new();
        let mut truncated = false;
        for ch in s.chars() {
            if text.push(ch).is_err() {
                truncated = true;
                break;
            }
        }
        Self { text, truncated }
    }

    /// Stored text (a prefix if the input was too long)
    pub fn as_str(&self) -> &str {
        self.text.as_str()
    }

    /// Check if the input did not fit
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Text usable as a table key, `None` once truncated
    fn key(&self) -> Option<&str> {
        (!self.truncated).then_some(self.as_str())
    }
}

/// Display intensity (brightness)
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Intensity {
    /// Raw register level (0-15 on the MAX7219)
    Level(u8),
    /// Fraction of the min-max range (0.0-1.0)
    Fraction(f32),
    /// Named level from the op-code table (`min`, `max`)
    Named(Name),
}

impl Intensity {
    /// Create a named intensity
    pub fn named(level: &str) -> Self {
        Intensity::Named(Name::new(level))
    }

    /// Resolve to the register value
    ///
    /// Returns `None` when the input does not map to an integer level.
    pub fn resolve(&self, table: &OpCodeTable) -> Option<u8> {
        match self {
            Intensity::Level(level) => {
                (table.intensity_min..=table.intensity_max)
                    .contains(level)
                    .then_some(*level)
            }
            Intensity::Fraction(f) => {
                if !(0.0..=1.0).contains(f) {
                    // Also rejects NaN
                    return None;
                }
                let range = table.intensity_max.saturating_sub(table.intensity_min);
                Some(round_half_up(f * f32::from(range)))
            }
            Intensity::Named(level) => level
                .key()
                .and_then(|key| table.intensity_level(key)),
        }
    }
}

/// Round a non-negative value to the nearest integer, halves up
fn round_half_up(x: f32) -> u8 {
    let floor = x as u8;
    // Exact: `x` and `floor` are within a factor of two
    if x - f32::from(floor) >= 0.5 {
        floor + 1
    } else {
        floor
    }
}

impl Default for Intensity {
    fn default() -> Self {
        Intensity::Level(3)
    }
}

impl From<u8> for Intensity {
    fn from(level: u8) -> Self {
        Intensity::Level(level)
    }
}

impl From<f32> for Intensity {
    fn from(fraction: f32) -> Self {
        Intensity::Fraction(fraction)
    }
}

/// Digit decode mode
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DecodeMode {
    /// Raw segment patterns for every digit
    #[default]
    Off,
    /// Named decode variant from the op-code table (`digit_0`, `low`, `all`)
    Named(Name),
}

impl DecodeMode {
    /// Create a named decode mode
    pub fn named(mode: &str) -> Self {
        DecodeMode::Named(Name::new(mode))
    }

    /// Resolve to the register value
    pub fn resolve(&self, table: &OpCodeTable) -> Option<u8> {
        match self {
            DecodeMode::Off => Some(table.decode_none()),
            DecodeMode::Named(mode) => mode
                .key()
                .and_then(|key| table.decode_mode_value(key)),
        }
    }
}

/// A setting value that cannot be written to the chip
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SettingError {
    /// Intensity did not resolve to an integer level
    InvalidIntensity(Intensity),
    /// Decode mode name not in the op-code table
    InvalidDecodeMode(DecodeMode),
    /// Digit count outside 1-8
    InvalidLength(u8),
    /// Digit index outside 0-7
    InvalidDigit(u8),
}

impl core::fmt::Display for SettingError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidIntensity(level) => write!(f, "Invalid intensity: {level:?}"),
            Self::InvalidDecodeMode(mode) => write!(f, "Invalid decode mode: {mode:?}"),
            Self::InvalidLength(n) => write!(f, "Invalid length {n} (expected 1-8)"),
            Self::InvalidDigit(d) => write!(f, "Invalid digit {d} (expected 0-7)"),
        }
    }
}

impl core::error::Error for SettingError {}
