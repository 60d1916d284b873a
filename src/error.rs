//! Error types for the driver
//!
//! This module defines error types for configuration building ([`BuilderError`])
//! and display operations ([`Error`]).
//!
//! ## Error Types
//!
//! - [`BuilderError`] - Errors during configuration construction
//! - [`Error`] - Runtime errors during display operations
//!
//! Bus errors are never translated: whatever the I2C implementation reports
//! comes back unchanged inside [`Error::Interface`].
//!
//! A cursor position outside the display is not an error. The request is
//! dropped without touching the bus, see
//! [`Display::set_cursor_pos`](crate::Display::set_cursor_pos).
//!
//! ## Example
//!
//! ```
//! use hd44780_i2c::{Builder, BuilderError};
//!
//! // Addresses wider than 7 bits are rejected
//! let result = Builder::new().address(0x80).build();
//! assert!(matches!(result, Err(BuilderError::InvalidAddress { address: 0x80 })));
//! ```

use crate::interface::DisplayInterface;

/// Number of glyph slots in CGRAM (5x8 font)
pub const GLYPH_SLOTS: u8 = 8;

/// Largest 7-bit I2C address
pub const MAX_I2C_ADDRESS: u8 = 0x7F;

/// Errors that can occur when interacting with the display
///
/// Generic over the interface type to preserve the specific error type.
#[derive(Debug)]
pub enum Error<I: DisplayInterface> {
    /// Interface error (I2C)
    ///
    /// Wraps the underlying bus error from the [`DisplayInterface`] implementation.
    Interface(I::Error),
    /// Custom glyph slot out of range
    ///
    /// CGRAM holds [`GLYPH_SLOTS`] glyphs in 5x8 mode.
    InvalidGlyphSlot {
        /// Slot requested
        slot: u8,
    },
}

impl<I: DisplayInterface> core::fmt::Display for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Interface(e) => write!(f, "Interface error: {e:?}"),
            Self::InvalidGlyphSlot { slot } => {
                write!(f, "Invalid glyph slot {slot} (must be below {GLYPH_SLOTS})")
            }
        }
    }
}

impl<I: DisplayInterface + core::fmt::Debug> core::error::Error for Error<I> {}

/// Errors that can occur when building configuration
#[derive(Debug, PartialEq, Eq)]
pub enum BuilderError {
    /// Address does not fit in 7 bits
    InvalidAddress {
        /// Address requested
        address: u8,
    },
    /// Settle delay below the controller's enable pulse width
    SettleDelayTooShort {
        /// Minimum accepted delay in microseconds
        min_us: u32,
        /// Delay requested in microseconds
        provided_us: u32,
    },
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidAddress { address } => write!(
                f,
                "Invalid I2C address {address:#04x} (max {MAX_I2C_ADDRESS:#04x}, use 7-bit addressing)"
            ),
            Self::SettleDelayTooShort {
                min_us,
                provided_us,
            } => write!(
                f,
                "Settle delay too short: {provided_us}us (min {min_us}us)"
            ),
        }
    }
}

impl core::error::Error for BuilderError {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_builder_error_messages() {
        let err = BuilderError::InvalidAddress { address: 0x80 };
        assert_eq!(
            err.to_string(),
            "Invalid I2C address 0x80 (max 0x7f, use 7-bit addressing)"
        );

        let err = BuilderError::SettleDelayTooShort {
            min_us: 1,
            provided_us: 0,
        };
        assert_eq!(err.to_string(), "Settle delay too short: 0us (min 1us)");
    }
}
