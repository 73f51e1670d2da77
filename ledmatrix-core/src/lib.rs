//! Driver core for MAX7219-family LED matrix / 7-segment controllers
//!
//! This crate contains everything that does not depend on a specific bus
//! implementation:
//!
//! - Register op-code table (substitutable for compatible chips)
//! - Settings (length, intensity, decode mode)
//! - Connection lifecycle state machine and notifications
//! - Transport adapter binding a bus handle to a write strategy
//! - Device with the register protocol and bring-up sequence
//! - Error taxonomy

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod device;
pub mod error;
pub mod opcodes;
pub mod protocol;
pub mod state;
pub mod transport;

#[cfg(test)]
mod mock;

pub use config::{DecodeMode, Intensity, Settings};
pub use device::Device;
pub use error::Error;
pub use opcodes::OpCodeTable;
pub use state::{DeviceId, Event, EventChannel, EventKind, State};
pub use transport::{Strategy, Written};
