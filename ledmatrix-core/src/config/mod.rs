//! Device configuration
//!
//! Settings are fixed when the device is constructed. Setters on the device
//! record new values after a successful write so the next reset re-applies
//! them.

pub mod settings;
pub mod types;

pub use settings::{Settings, DEFAULT_INTENSITY, DEFAULT_LENGTH, MAX_LENGTH, MIN_LENGTH};
pub use types::{DecodeMode, Intensity, Name, SettingError, MAX_NAME_LEN};
