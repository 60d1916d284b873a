//! Character stream adapter
//!
//! [`Writer`] borrows a [`Display`] together with a delay and accepts text
//! through [`core::fmt::Write`] (and `ufmt_write::uWrite` with the `ufmt`
//! feature). Two control characters are understood:
//!
//! - `\n` moves to the same column on the other row
//! - `\r` moves to column 0 of the current row
//!
//! Every other byte goes to the display unchanged. There is no Unicode
//! handling: a multi-byte UTF-8 character becomes several cells.
//!
//! ## Example
//!
//! ```rust,no_run
//! use core::fmt::Write;
//! use embedded_hal::delay::DelayNs;
//! use hd44780_i2c::{Display, Interface};
//! # use core::convert::Infallible;
//! # use embedded_hal::i2c::{I2c, Operation};
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
//! let mut display = Display::new(Interface::new(MockI2c));
//! let _ = display.initialize(&mut delay);
//!
//! let temperature = 21;
//! let _ = write!(display.writer(&mut delay), "Temp {temperature}C\nOK");
//! ```

use core::fmt;

use embedded_hal::delay::DelayNs;

use crate::display::{Display, DisplayResult};
use crate::interface::DisplayInterface;

/// Text sink over a [`Display`]
///
/// Created by [`Display::writer`].
pub struct Writer<'a, I, D>
where
    I: DisplayInterface,
    D: DelayNs,
{
    display: &'a mut Display<I>,
    delay: &'a mut D,
}

impl<'a, I, D> Writer<'a, I, D>
where
    I: DisplayInterface,
    D: DelayNs,
{
    pub(crate) fn new(display: &'a mut Display<I>, delay: &'a mut D) -> Self {
        Self { display, delay }
    }

    /// Write one byte, interpreting `\n` and `\r`
    pub fn put_byte(&mut self, byte: u8) -> DisplayResult<I> {
        let row = self.display.cursor_row();
        let col = self.display.cursor_col();
        match byte {
            b'\n' => self.display.set_cursor_pos(row ^ 1, col, &mut *self.delay),
            b'\r' => self.display.set_cursor_pos(row, 0, &mut *self.delay),
            _ => self.display.send_data(byte, &mut *self.delay),
        }
    }

    /// Write bytes, interpreting `\n` and `\r`
    ///
    /// Stops at the first bus error and returns it unchanged.
    pub fn put_bytes(&mut self, bytes: &[u8]) -> DisplayResult<I> {
        for &byte in bytes {
            self.put_byte(byte)?;
        }
        Ok(())
    }
}

impl<I, D> fmt::Write for Writer<'_, I, D>
where
    I: DisplayInterface,
    D: DelayNs,
{
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.put_bytes(s.as_bytes()).map_err(|_| fmt::Error)
    }
}

#[cfg(feature = "ufmt")]
impl<I, D> ufmt_write::uWrite for Writer<'_, I, D>
where
    I: DisplayInterface,
    D: DelayNs,
{
    type Error = crate::error::Error<I>;

    fn write_str(&mut self, s: &str) -> Result<(), Self::Error> {
        self.put_bytes(s.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::LINE_WIDTH;
    use crate::interface::Interface;
    use alloc::vec::Vec;
    use core::fmt::Write;
    use embedded_hal::i2c::{ErrorType, I2c, Operation};

    #[derive(Debug, Default)]
    struct MockI2c {
        written: Vec<u8>,
    }

    impl ErrorType for MockI2c {
        type Error = core::convert::Infallible;
    }

    impl I2c for MockI2c {
        fn transaction(
            &mut self,
            _address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            for op in operations {
                if let Operation::Write(bytes) = op {
                    self.written.extend_from_slice(bytes);
                }
            }
            Ok(())
        }
    }

    struct MockDelay;

    impl DelayNs for MockDelay {
        fn delay_ns(&mut self, _ns: u32) {}
    }

    fn test_display() -> Display<Interface<MockI2c>> {
        let mut display = Display::new(Interface::new(MockI2c::default()));
        display.initialize(&mut MockDelay).unwrap();
        display
    }

    fn written(display: Display<Interface<MockI2c>>) -> Vec<u8> {
        display.release().release().written
    }

    #[test]
    fn test_plain_text_goes_to_data_register() {
        let mut display = test_display();
        let mut delay = MockDelay;
        write!(display.writer(&mut delay), "AB").unwrap();
        assert_eq!(display.cursor_col(), 2);

        let bytes = written(display);
        let tail = &bytes[bytes.len() - 12..];
        // 'A' = 0x41, 'B' = 0x42, RS set, backlight off
        assert_eq!(
            tail,
            [
                0x41, 0x45, 0x41, 0x11, 0x15, 0x11, //
                0x41, 0x45, 0x41, 0x21, 0x25, 0x21,
            ]
        );
    }

    #[test]
    fn test_newline_switches_row_keeping_column() {
        let mut display = test_display();
        let mut delay = MockDelay;
        write!(display.writer(&mut delay), "abc\n").unwrap();
        assert_eq!((display.cursor_row(), display.cursor_col()), (1, 3));

        display.writer(&mut delay).put_byte(b'\n').unwrap();
        assert_eq!((display.cursor_row(), display.cursor_col()), (0, 3));
    }

    #[test]
    fn test_carriage_return_goes_to_column_zero() {
        let mut display = test_display();
        let mut delay = MockDelay;
        write!(display.writer(&mut delay), "\nhello\r").unwrap();
        assert_eq!((display.cursor_row(), display.cursor_col()), (1, 0));
    }

    #[test]
    fn test_control_characters_send_ddram_address() {
        let mut display = test_display();
        let mut delay = MockDelay;
        display.set_cursor_pos(0, 4, &mut delay).unwrap();
        display.writer(&mut delay).put_byte(b'\n').unwrap();

        let bytes = written(display);
        // set DDRAM 0x44 -> 0xC4, instruction register, backlight off
        assert_eq!(&bytes[bytes.len() - 6..], [0xC0, 0xC4, 0xC0, 0x40, 0x44, 0x40]);
    }

    #[test]
    fn test_long_text_wraps_into_row_one() {
        let mut display = test_display();
        let mut delay = MockDelay;
        let text = [b'x'; LINE_WIDTH as usize + 2];
        display.writer(&mut delay).put_bytes(&text).unwrap();
        assert_eq!((display.cursor_row(), display.cursor_col()), (1, 2));
    }
}
