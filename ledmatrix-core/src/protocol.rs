//! MAX7219-family register protocol
//!
//! Register writes are always two bytes: `[register, value]`.
//!
//! # Bring-up sequence
//!
//! 1. Shutdown (blank the display so partial configuration never shows)
//! 2. Test off, decode mode, scan limit, intensity (concurrently; each is a
//!    separate register)
//! 3. Clear every digit register (only once the scan limit is set)
//! 4. Wake
//!
//! Steps 1, 3 and 4 are ordering barriers.

use embassy_futures::join::join4;
use ledmatrix_hal::BusHandle;

use crate::config::{DecodeMode, Intensity, SettingError, MAX_LENGTH, MIN_LENGTH};
use crate::device::Device;
use crate::error::{Error, ResetStep};
use crate::opcodes::{OpCodeTable, DIGIT_COUNT};
use crate::transport::Written;

impl<'a, B: BusHandle> Device<'a, B> {
    fn op_codes(&self) -> OpCodeTable {
        self.settings.borrow().op_codes
    }

    /// Run the bring-up sequence and emit [`EventKind::Reset`](crate::state::EventKind)
    ///
    /// Failures are reported as [`ConnectionError::Reset`](crate::error::ConnectionError)
    /// naming the step that failed.
    pub async fn reset(&self) -> Result<bool, Error<B::Error>> {
        let settings = self.settings();

        self.shutdown(true)
            .await
            .map_err(|e| e.during(ResetStep::Shutdown))?;

        let (test, decode, length, intensity) = join4(
            self.test(false),
            self.set_decode_mode(settings.decode_mode),
            self.set_length(settings.length),
            self.set_intensity(settings.intensity),
        )
        .await;
        test.map_err(|e| e.during(ResetStep::Test))?;
        decode.map_err(|e| e.during(ResetStep::DecodeMode))?;
        length.map_err(|e| e.during(ResetStep::ScanLimit))?;
        intensity.map_err(|e| e.during(ResetStep::Intensity))?;

        // Must wait until the scan limit is set
        self.clear().await.map_err(|e| e.during(ResetStep::Clear))?;

        self.shutdown(false)
            .await
            .map_err(|e| e.during(ResetStep::Wake))?;

        Ok(self.notify_reset())
    }

    /// Write zero to every digit register within the scan limit
    pub async fn clear(&self) -> Result<Written, Error<B::Error>> {
        let length = self.settings.borrow().length;

        let mut total = Written::default();
        for digit in 0..length {
            total = total + self.set_pattern(0, digit).await?;
        }
        Ok(total)
    }

    /// Set the digit decode mode
    pub async fn set_decode_mode(&self, mode: DecodeMode) -> Result<Written, Error<B::Error>> {
        let table = self.op_codes();
        let Some(value) = mode.resolve(&table) else {
            return Err(SettingError::InvalidDecodeMode(mode).into());
        };

        let written = self.write(&[table.decode_mode, value]).await?;
        self.settings.borrow_mut().decode_mode = mode;
        Ok(written)
    }

    /// Set display intensity (brightness)
    ///
    /// Accepts a level (0-15), a fraction of the range (0.0-1.0) or a named
    /// level (`"min"`, `"max"`). Anything else fails without writing.
    pub async fn set_intensity(
        &self,
        level: impl Into<Intensity>,
    ) -> Result<Written, Error<B::Error>> {
        let level = level.into();
        let table = self.op_codes();
        let Some(value) = level.resolve(&table) else {
            return Err(SettingError::InvalidIntensity(level).into());
        };

        let written = self.write(&[table.intensity, value]).await?;
        self.settings.borrow_mut().intensity = level;
        Ok(written)
    }

    /// Set the number of scanned digits/rows (1-8)
    pub async fn set_length(&self, n: u8) -> Result<Written, Error<B::Error>> {
        if !(MIN_LENGTH..=MAX_LENGTH).contains(&n) {
            return Err(SettingError::InvalidLength(n).into());
        }

        let table = self.op_codes();
        let written = self.write(&[table.scan_limit, n - 1]).await?;
        self.settings.borrow_mut().length = n;
        Ok(written)
    }

    /// Write a raw segment/row pattern to `digit` (0-7)
    pub async fn set_pattern(&self, pattern: u8, digit: u8) -> Result<Written, Error<B::Error>> {
        if digit >= DIGIT_COUNT {
            return Err(SettingError::InvalidDigit(digit).into());
        }

        let table = self.op_codes();
        self.write(&[table.digit_register(digit), pattern]).await
    }

    /// Enter (`true`) or leave (`false`) shutdown
    ///
    /// Register contents survive shutdown.
    pub async fn shutdown(&self, shutdown: bool) -> Result<Written, Error<B::Error>> {
        let table = self.op_codes();
        let value = if shutdown {
            table.shutdown_mode
        } else {
            table.shutdown_normal
        };
        self.write(&[table.shutdown, value]).await
    }

    /// Light every segment (`true`) or return to normal operation (`false`)
    pub async fn test(&self, on: bool) -> Result<Written, Error<B::Error>> {
        let table = self.op_codes();
        let value = if on {
            table.display_test_on
        } else {
            table.display_test_off
        };
        self.write(&[table.display_test, value]).await
    }
}
