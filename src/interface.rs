//! Hardware interface abstraction
//!
//! This module provides the [`DisplayInterface`] trait and the [`Interface`] struct
//! for driving an HD44780 through an 8-bit I2C port expander (PCF8574 backpack).
//!
//! ## Hardware Requirements
//!
//! The expander's eight outputs are wired to the controller as:
//!
//! | Bit | Line | Meaning                                |
//! |-----|------|----------------------------------------|
//! | 0   | RS   | Register select (0=instruction, 1=data) |
//! | 1   | RW   | Read/write, held low                   |
//! | 2   | EN   | Enable strobe, latches on falling edge |
//! | 3   | BL   | Backlight transistor                   |
//! | 4-7 | DB4-DB7 | Upper half of the data bus          |
//!
//! With only four data lines wired the controller runs in 4-bit mode: each byte
//! travels as two nibbles, high nibble first. Each nibble costs three expander
//! writes (stable, strobe, stable) with a settle delay after each one.
//!
//! The backlight has no command of its own. Its bit rides along in every write.
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::i2c::{I2c, Operation};
//! use hd44780_i2c::{DisplayInterface, Interface, Register};
//! # use core::convert::Infallible;
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
//! # let mut delay = MockDelay;
//! let mut interface = Interface::new(MockI2c);
//!
//! // Turn the backlight on
//! let _ = interface.set_backlight(true);
//!
//! // Send the letter 'A' as data
//! let _ = interface.send_byte(b'A', Register::Data, &mut delay);
//! ```

use core::fmt::Debug;
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use crate::command::{high_nibble, low_nibble};
use crate::config::Config;

type InterfaceResult<T, E> = core::result::Result<T, E>;

/// Expander bit driving RS
pub const RS_BIT: u8 = 1 << 0;
/// Expander bit driving RW
pub const RW_BIT: u8 = 1 << 1;
/// Expander bit driving EN
pub const EN_BIT: u8 = 1 << 2;
/// Expander bit driving the backlight
pub const BACKLIGHT_BIT: u8 = 1 << 3;

/// Controller register targeted by a transfer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Register {
    /// Instruction register (RS low)
    Instruction,
    /// Data register (RS high), writes DDRAM or CGRAM
    Data,
}

impl Register {
    /// Expander bits selecting this register
    pub const fn rs_bits(self) -> u8 {
        match self {
            Self::Instruction => 0,
            Self::Data => RS_BIT,
        }
    }
}

/// The three expander writes carrying one nibble
///
/// Returns `[stable, strobe, stable]`: the nibble on DB4..DB7 with RS and the
/// backlight mask, then the same with EN raised, then EN dropped again.
/// Bits of `nibble` above the low four are ignored.
///
/// ```
/// use hd44780_i2c::interface::{frame_nibble, BACKLIGHT_BIT};
/// use hd44780_i2c::Register;
///
/// assert_eq!(frame_nibble(0xA, Register::Data, BACKLIGHT_BIT), [0xA9, 0xAD, 0xA9]);
/// assert_eq!(frame_nibble(0x3, Register::Instruction, 0), [0x30, 0x34, 0x30]);
/// ```
pub const fn frame_nibble(nibble: u8, register: Register, backlight_mask: u8) -> [u8; 3] {
    let stable = ((nibble & 0x0F) << 4) | register.rs_bits() | backlight_mask;
    [stable, stable | EN_BIT, stable]
}

/// Trait for the transport between the driver and an HD44780 controller
///
/// This is the narrow byte-in seam between the pure instruction encoding in
/// [`command`](crate::command) and the bus. [`Display`](crate::display::Display)
/// works with any implementation; [`Interface`] is the PCF8574 one.
///
/// ## Implementing
///
/// Only [`send_nibble`](Self::send_nibble) and the backlight methods are
/// required. The default [`send_byte`](Self::send_byte) splits the byte into two
/// nibbles, high first, which is what the controller expects in 4-bit mode.
pub trait DisplayInterface {
    /// Error type for interface operations
    ///
    /// Must implement [`Debug`] for error reporting.
    type Error: Debug;

    /// Send one nibble to the controller
    ///
    /// Used on its own only during initialization, while the controller may
    /// still be in 8-bit mode and latches a single nibble per strobe.
    ///
    /// # Errors
    ///
    /// Returns the bus error unchanged.
    fn send_nibble<D: DelayNs>(
        &mut self,
        nibble: u8,
        register: Register,
        delay: &mut D,
    ) -> InterfaceResult<(), Self::Error>;

    /// Send a full byte as two nibbles, high nibble first
    ///
    /// # Errors
    ///
    /// Returns the bus error unchanged. If the high nibble fails the low
    /// nibble is not sent.
    fn send_byte<D: DelayNs>(
        &mut self,
        byte: u8,
        register: Register,
        delay: &mut D,
    ) -> InterfaceResult<(), Self::Error> {
        self.send_nibble(high_nibble(byte), register, delay)?;
        self.send_nibble(low_nibble(byte), register, delay)
    }

    /// Switch the backlight and make the change visible immediately
    ///
    /// # Errors
    ///
    /// Returns the bus error unchanged. The new state is kept either way and
    /// rides along with the next transfer.
    fn set_backlight(&mut self, on: bool) -> InterfaceResult<(), Self::Error>;

    /// Whether the backlight bit is currently set
    fn is_backlight_on(&self) -> bool;
}

/// PCF8574 interface implementation for HD44780
///
/// Implements [`DisplayInterface`] for an embedded-hal v1.0 [`I2c`] bus.
///
/// The three writes of a nibble are separate bus transactions with delays in
/// between. Other devices on the same bus must not address this expander in
/// the meantime; arbitration is left to the caller.
///
/// ## Example
///
/// ```rust,no_run
/// use hd44780_i2c::{Builder, Display, Interface};
/// # use core::convert::Infallible;
/// # use embedded_hal::i2c::{I2c, Operation};
/// # struct MockI2c;
/// # impl embedded_hal::i2c::ErrorType for MockI2c { type Error = Infallible; }
/// # impl I2c for MockI2c {
/// #     fn transaction(
/// #         &mut self,
/// #         _address: u8,
/// #         _operations: &mut [Operation<'_>],
/// #     ) -> Result<(), Self::Error> {
/// #         Ok(())
/// #     }
/// # }
/// let config = match Builder::new().address(0x3F).build() {
///     Ok(config) => config,
///     Err(_) => return,
/// };
/// let interface = Interface::with_config(MockI2c, config);
///
/// // Use with Display
/// let _display = Display::new(interface);
/// ```
#[derive(Debug)]
pub struct Interface<I2C> {
    /// I2C bus
    i2c: I2C,
    /// 7-bit expander address
    address: u8,
    /// Gap after every expander write
    settle_delay_us: u32,
    /// Either 0 or [`BACKLIGHT_BIT`], OR'd into every write
    backlight_mask: u8,
}

impl<I2C> Interface<I2C>
where
    I2C: I2c,
{
    /// Create a new Interface with the default [`Config`]
    pub fn new(i2c: I2C) -> Self {
        Self::with_config(i2c, Config::default())
    }

    /// Create a new Interface from a built [`Config`]
    pub fn with_config(i2c: I2C, config: Config) -> Self {
        Self {
            i2c,
            address: config.address,
            settle_delay_us: config.settle_delay_us,
            backlight_mask: if config.backlight { BACKLIGHT_BIT } else { 0 },
        }
    }

    /// Get the expander address
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Get the settle delay in microseconds
    pub fn settle_delay_us(&self) -> u32 {
        self.settle_delay_us
    }

    /// Release the I2C bus
    pub fn release(self) -> I2C {
        self.i2c
    }

    fn write(&mut self, byte: u8) -> InterfaceResult<(), I2C::Error> {
        self.i2c.write(self.address, &[byte])
    }
}

impl<I2C> DisplayInterface for Interface<I2C>
where
    I2C: I2c,
{
    type Error = I2C::Error;

    fn send_nibble<D: DelayNs>(
        &mut self,
        nibble: u8,
        register: Register,
        delay: &mut D,
    ) -> InterfaceResult<(), Self::Error> {
        let frame = frame_nibble(nibble, register, self.backlight_mask);
        log::trace!("nibble {:#x} {:?} -> {:02x?}", nibble & 0x0F, register, frame);
        for byte in frame {
            self.write(byte)?;
            delay.delay_us(self.settle_delay_us);
        }
        Ok(())
    }

    fn set_backlight(&mut self, on: bool) -> InterfaceResult<(), Self::Error> {
        self.backlight_mask = if on { BACKLIGHT_BIT } else { 0 };
        log::trace!("backlight {}", if on { "on" } else { "off" });
        self.write(self.backlight_mask)
    }

    fn is_backlight_on(&self) -> bool {
        self.backlight_mask != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use embedded_hal::i2c::{ErrorKind, ErrorType, Operation};

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct MockError;

    impl embedded_hal::i2c::Error for MockError {
        fn kind(&self) -> ErrorKind {
            ErrorKind::Other
        }
    }

    #[derive(Debug, Default)]
    struct MockI2c {
        writes: Vec<(u8, Vec<u8>)>,
        fail_after: Option<usize>,
    }

    impl ErrorType for MockI2c {
        type Error = MockError;
    }

    impl I2c for MockI2c {
        fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            for op in operations {
                if let Operation::Write(bytes) = op {
                    if self.fail_after == Some(self.writes.len()) {
                        return Err(MockError);
                    }
                    self.writes.push((address, bytes.to_vec()));
                }
            }
            Ok(())
        }
    }

    #[derive(Default)]
    struct MockDelay {
        total_ns: u64,
        calls: usize,
    }

    impl DelayNs for MockDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.total_ns += u64::from(ns);
            self.calls += 1;
        }
    }

    fn bytes(interface: &Interface<MockI2c>) -> Vec<u8> {
        interface
            .i2c
            .writes
            .iter()
            .flat_map(|(_, b)| b.iter().copied())
            .collect()
    }

    #[test]
    fn test_frame_nibble_sets_strobe_only_in_middle() {
        let [a, b, c] = frame_nibble(0xF, Register::Instruction, 0);
        assert_eq!(a, 0xF0);
        assert_eq!(b, 0xF4);
        assert_eq!(c, 0xF0);
        assert_eq!(frame_nibble(0x1F, Register::Instruction, 0), [0xF0, 0xF4, 0xF0]);
    }

    #[test]
    fn test_send_nibble_writes_three_bytes_with_settle_delay() {
        let mut interface = Interface::new(MockI2c::default());
        let mut delay = MockDelay::default();
        interface
            .send_nibble(0x3, Register::Instruction, &mut delay)
            .unwrap();

        assert_eq!(bytes(&interface), [0x30, 0x34, 0x30]);
        assert!(interface.i2c.writes.iter().all(|(addr, b)| *addr == 0x27 && b.len() == 1));
        assert_eq!(delay.calls, 3);
        assert_eq!(delay.total_ns, 3 * 1_000_000);
    }

    #[test]
    fn test_send_byte_frames_high_nibble_first() {
        let mut interface = Interface::new(MockI2c::default());
        let mut delay = MockDelay::default();
        interface.set_backlight(true).unwrap();
        interface.i2c.writes.clear();

        interface
            .send_byte(0xAB, Register::Data, &mut delay)
            .unwrap();

        let written = bytes(&interface);
        assert_eq!(written, [0xA9, 0xAD, 0xA9, 0xB9, 0xBD, 0xB9]);
        assert!(written.iter().all(|b| b & RS_BIT != 0));
        assert!(written.iter().all(|b| b & BACKLIGHT_BIT != 0));
        assert!(written.iter().all(|b| b & RW_BIT == 0));
    }

    #[test]
    fn test_backlight_writes_mask_alone() {
        let mut interface = Interface::new(MockI2c::default());
        assert!(!interface.is_backlight_on());

        interface.set_backlight(true).unwrap();
        assert!(interface.is_backlight_on());
        interface.set_backlight(false).unwrap();
        assert!(!interface.is_backlight_on());

        assert_eq!(bytes(&interface), [BACKLIGHT_BIT, 0x00]);
    }

    #[test]
    fn test_backlight_from_config() {
        let config = crate::Builder::new()
            .address(0x3F)
            .settle_delay_us(40)
            .backlight(true)
            .build()
            .unwrap();
        let mut interface = Interface::with_config(MockI2c::default(), config);
        let mut delay = MockDelay::default();
        assert!(interface.is_backlight_on());
        assert_eq!(interface.address(), 0x3F);
        assert_eq!(interface.settle_delay_us(), 40);

        interface
            .send_nibble(0x0, Register::Instruction, &mut delay)
            .unwrap();
        assert_eq!(bytes(&interface), [0x08, 0x0C, 0x08]);
        assert!(interface.i2c.writes.iter().all(|(addr, _)| *addr == 0x3F));
        assert_eq!(delay.total_ns, 3 * 40_000);
    }

    #[test]
    fn test_bus_error_propagates_and_stops_transfer() {
        let i2c = MockI2c {
            fail_after: Some(4),
            ..MockI2c::default()
        };
        let mut interface = Interface::new(i2c);
        let mut delay = MockDelay::default();

        let result = interface.send_byte(0x41, Register::Data, &mut delay);
        assert_eq!(result, Err(MockError));
        assert_eq!(interface.i2c.writes.len(), 4);
    }

    #[test]
    fn test_release_returns_bus() {
        let mut interface = Interface::new(MockI2c::default());
        interface.set_backlight(true).unwrap();
        let i2c = interface.release();
        assert_eq!(i2c.writes.len(), 1);
    }
}
