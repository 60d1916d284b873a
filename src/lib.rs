//! HD44780 Character LCD Driver over I2C
//!
//! A driver for HD44780-compatible character LCDs wired to a PCF8574 8-bit I2C
//! port expander, the common "I2C backpack" found on 16x2 and 20x4 modules.
//!
//! ## Features
//!
//! - `no_std` compatible
//! - `embedded-hal` v1.0 support
//! - 4-bit bus protocol with backlight control
//! - Cursor position tracking across both DDRAM rows
//! - Custom glyphs (8 CGRAM slots)
//! - `core::fmt::Write` text output, `ufmt` with the `ufmt` feature
//!
//! ## Usage
//!
//! ```rust,no_run
//! use core::convert::Infallible;
//! use core::fmt::Write;
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::i2c::{I2c, Operation};
//! use hd44780_i2c::{Builder, Display, Interface};
//!
//! # struct MockI2c;
//! # impl embedded_hal::i2c::ErrorType for MockI2c { type Error = Infallible; }
//! # impl I2c for MockI2c {
//! #     fn transaction(
//! #         &mut self,
//! #         _address: u8,
//! #         _operations: &mut [Operation<'_>],
//! #     ) -> Result<(), Self::Error> {
//! #         Ok(())
//! #     }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let i2c = MockI2c;
//! # let mut delay = MockDelay;
//! let config = match Builder::new().address(0x27).backlight(true).build() {
//!     Ok(config) => config,
//!     Err(_) => return,
//! };
//!
//! let mut display = Display::new(Interface::with_config(i2c, config));
//! let _ = display.initialize(&mut delay);
//! let _ = write!(display.writer(&mut delay), "Hello\nworld");
//! ```

#![no_std]

#[cfg(test)]
extern crate alloc;

/// DDRAM address counter model
pub mod address;
/// HD44780 instruction definitions
pub mod command;
/// Bus configuration types and builder
pub mod config;
/// Core display operations
pub mod display;
/// Error types for the driver
pub mod error;
/// Hardware interface abstraction
pub mod interface;
/// Shadow copies of write-only controller registers
pub mod state;
/// Character stream adapter
pub mod writer;

pub use address::{AddressCounter, LINE_WIDTH, ROW0_BASE, ROW1_BASE};
pub use config::{Builder, Config, DEFAULT_ADDRESS};
pub use display::{Display, Glyph};
pub use error::{BuilderError, Error};
pub use interface::{DisplayInterface, Interface, Register};
pub use state::{DisplayFlag, DisplayState, EntryMode, EntryState};
pub use writer::Writer;
