//! Bus handle implementations
//!
//! This crate adapts the `embedded-hal-async` SPI traits to the
//! [`ledmatrix_hal::BusHandle`] contract:
//!
//! - [`spi::SpiBusHandle`]: byte-stream, over a raw [`SpiBus`](embedded_hal_async::spi::SpiBus)
//! - [`spi::SpiDeviceHandle`]: framed transfer, over a chip-select managing
//!   [`SpiDevice`](embedded_hal_async::spi::SpiDevice)
//!
//! MAX7219-family chips latch data on the rising edge of chip select, so
//! prefer [`spi::SpiDeviceHandle`] unless chip select is driven elsewhere.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod spi;

pub use spi::{SpiBusHandle, SpiDeviceHandle, SpiHandleError};
