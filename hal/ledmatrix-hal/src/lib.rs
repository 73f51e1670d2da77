//! ledmatrix Hardware Abstraction Layer
//!
//! This crate defines the contract a serial bus must satisfy before a
//! display controller can be driven over it. Concrete bus handles live in
//! `ledmatrix-drivers` (embedded-hal-async SPI) or in application code.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  ledmatrix-core (Device, protocol)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  ledmatrix-hal (this crate - traits)    │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  byte-stream  │       │    framed     │
//! │  (SpiBus)     │       │  (SpiDevice)  │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`bus::BusHandle`] - Byte-stream write and/or framed transfer

#![no_std]
#![deny(unsafe_code)]

pub mod bus;
pub mod frame;

// Re-export key types at crate root for convenience
pub use bus::{BusHandle, Capabilities, Unsupported};
pub use frame::{Frame, FrameError, TransferResult, MAX_FRAME_SIZE, MAX_FRAMES};
