//! Register op-code table
//!
//! Immutable mapping from register names and named sub-values to the bytes
//! the controller understands. [`OpCodeTable::MAX7219`] covers the MAX7219
//! and the pin-compatible MAX7221; other compatible chips can supply a whole
//! replacement table through [`Settings`](crate::config::Settings).
//!
//! Digit registers are not listed: digit `n` (0-7) is register `n + 1`.
//! NO-OP (0x00) is left out on purpose, it only matters for daisy chains.

/// Named register sub-value
pub type NamedValue = (&'static str, u8);

/// Number of digit registers on the chip
pub const DIGIT_COUNT: u8 = 8;

/// Register and value table for one chip variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OpCodeTable {
    /// Decode-mode register
    pub decode_mode: u8,
    /// Named decode modes (e.g. `NONE`, `ALL`)
    pub decode_modes: &'static [NamedValue],
    /// Intensity register
    pub intensity: u8,
    /// Lowest intensity value
    pub intensity_min: u8,
    /// Highest intensity value
    pub intensity_max: u8,
    /// Scan-limit register (value = digits - 1)
    pub scan_limit: u8,
    /// Shutdown register
    pub shutdown: u8,
    /// Shutdown register value: blanked, low power
    pub shutdown_mode: u8,
    /// Shutdown register value: normal operation
    pub shutdown_normal: u8,
    /// Display-test register
    pub display_test: u8,
    /// Display-test register value: off
    pub display_test_off: u8,
    /// Display-test register value: all segments lit
    pub display_test_on: u8,
}

impl OpCodeTable {
    /// MAX7219 / MAX7221 register map
    pub const MAX7219: Self = Self {
        decode_mode: 0x09,
        decode_modes: &[
            ("NONE", 0x00),
            ("DIGIT_0", 0x01),
            ("LOW", 0x0f),
            ("ALL", 0xff),
        ],
        intensity: 0x0a,
        intensity_min: 0x00,
        intensity_max: 0x0f,
        scan_limit: 0x0b,
        shutdown: 0x0c,
        shutdown_mode: 0,
        shutdown_normal: 1,
        display_test: 0x0f,
        display_test_off: 0,
        display_test_on: 1,
    };

    /// Value of the "no decode" mode
    pub fn decode_none(&self) -> u8 {
        self.decode_mode_value("NONE").unwrap_or(0)
    }

    /// Resolve a named decode mode, case-insensitively
    pub fn decode_mode_value(&self, name: &str) -> Option<u8> {
        self.decode_modes
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|&(_, value)| value)
    }

    /// Resolve a named intensity level (`MIN` / `MAX`), case-insensitively
    pub fn intensity_level(&self, name: &str) -> Option<u8> {
        if name.eq_ignore_ascii_case("MIN") {
            Some(self.intensity_min)
        } else if name.eq_ignore_ascii_case("MAX") {
            Some(self.intensity_max)
        } else {
            None
        }
    }

    /// Register holding the pattern for `digit` (0-based)
    pub fn digit_register(&self, digit: u8) -> u8 {
        digit + 1
    }
}

impl Default for OpCodeTable {
    fn default() -> Self {
        Self::MAX7219
    }
}
