//! DDRAM address counter model
//!
//! The HD44780 keeps a write-only address counter (AC) that it bumps after every
//! data write. The driver cannot read it back over a PCF8574 backpack, so it
//! keeps its own copy, [`AddressCounter`], and steps it the same way the
//! controller does.
//!
//! In two-line mode DDRAM is split into two ranges that are not contiguous:
//!
//! | Row | Addresses                         |
//! |-----|-----------------------------------|
//! | 0   | `0x00..0x28` (`ROW0_BASE..+LINE_WIDTH`) |
//! | 1   | `0x40..0x68` (`ROW1_BASE..+LINE_WIDTH`) |
//!
//! Stepping past the end of row 0 lands on the start of row 1, and stepping
//! past the end of row 1 wraps to the start of row 0. Decrementing mirrors this.
//!
//! ## Example
//!
//! ```
//! use hd44780_i2c::address::{AddressCounter, ROW1_BASE};
//!
//! let mut ac = AddressCounter::at(0, 0x27).unwrap_or_default();
//! ac.increment();
//! assert_eq!(ac.value(), ROW1_BASE);
//! assert_eq!((ac.row(), ac.col()), (1, 0));
//!
//! ac.decrement();
//! assert_eq!((ac.row(), ac.col()), (0, 0x27));
//! ```

use crate::command::Direction;

/// First DDRAM address of row 0
pub const ROW0_BASE: u8 = 0x00;
/// First DDRAM address of row 1
pub const ROW1_BASE: u8 = 0x40;
/// Number of DDRAM cells per row in two-line mode
pub const LINE_WIDTH: u8 = 0x28;
/// Number of rows in two-line mode
pub const ROWS: u8 = 2;

/// Copy of the controller's DDRAM address counter
///
/// Always holds an address inside one of the two row ranges.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AddressCounter(u8);

impl AddressCounter {
    /// Counter at the home position
    pub const HOME: Self = Self(ROW0_BASE);

    /// Counter at `(row, col)`, or `None` if the position is off the display
    pub const fn at(row: u8, col: u8) -> Option<Self> {
        if row >= ROWS || col >= LINE_WIDTH {
            return None;
        }
        let base = if row == 1 { ROW1_BASE } else { ROW0_BASE };
        Some(Self(base + col))
    }

    /// Raw DDRAM address
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Row the address falls in
    pub const fn row(self) -> u8 {
        if self.0 >= ROW1_BASE { 1 } else { 0 }
    }

    /// Column within the row
    pub const fn col(self) -> u8 {
        self.0 - if self.0 >= ROW1_BASE { ROW1_BASE } else { ROW0_BASE }
    }

    /// Step forward one cell
    pub fn increment(&mut self) {
        let next = self.0 + 1;
        self.0 = if next >= ROW1_BASE + LINE_WIDTH {
            ROW0_BASE
        } else if next >= ROW0_BASE + LINE_WIDTH && next < ROW1_BASE {
            ROW1_BASE
        } else {
            next
        };
    }

    /// Step back one cell
    pub fn decrement(&mut self) {
        self.0 = match self.0 {
            ROW0_BASE => ROW1_BASE + LINE_WIDTH - 1,
            ROW1_BASE => ROW0_BASE + LINE_WIDTH - 1,
            addr => addr - 1,
        };
    }

    /// Step one cell in `direction`
    pub fn advance(&mut self, direction: Direction) {
        match direction {
            Direction::Increment => self.increment(),
            Direction::Decrement => self.decrement(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_valid() -> impl Iterator<Item = AddressCounter> {
        (0..ROWS).flat_map(|row| {
            (0..LINE_WIDTH).filter_map(move |col| AddressCounter::at(row, col))
        })
    }

    fn is_valid(addr: u8) -> bool {
        (ROW0_BASE..ROW0_BASE + LINE_WIDTH).contains(&addr)
            || (ROW1_BASE..ROW1_BASE + LINE_WIDTH).contains(&addr)
    }

    #[test]
    fn test_row_zero_runs_into_row_one() {
        let mut ac = AddressCounter::HOME;
        for _ in 0..0x27 {
            ac.increment();
        }
        assert_eq!(ac.value(), 0x27);
        ac.increment();
        assert_eq!(ac.value(), 0x40);
    }

    #[test]
    fn test_row_one_wraps_to_home() {
        let mut ac = AddressCounter::at(1, LINE_WIDTH - 1).unwrap();
        assert_eq!(ac.value(), 0x67);
        ac.increment();
        assert_eq!(ac, AddressCounter::HOME);
    }

    #[test]
    fn test_decrement_wraps() {
        let mut ac = AddressCounter::HOME;
        ac.decrement();
        assert_eq!(ac.value(), 0x67);

        let mut ac = AddressCounter::at(1, 0).unwrap();
        ac.decrement();
        assert_eq!(ac.value(), 0x27);

        let mut ac = AddressCounter::at(1, 5).unwrap();
        ac.decrement();
        assert_eq!(ac.value(), 0x44);
    }

    #[test]
    fn test_full_cycle_visits_every_cell_once() {
        let mut ac = AddressCounter::HOME;
        let mut count = 0;
        loop {
            assert!(is_valid(ac.value()));
            ac.increment();
            count += 1;
            if ac == AddressCounter::HOME {
                break;
            }
        }
        assert_eq!(count, 2 * LINE_WIDTH as usize);
    }

    #[test]
    fn test_increment_then_decrement_is_identity() {
        for start in all_valid() {
            let mut ac = start;
            ac.advance(Direction::Increment);
            assert!(is_valid(ac.value()));
            ac.advance(Direction::Decrement);
            assert_eq!(ac, start);
        }
    }

    #[test]
    fn test_position_round_trip() {
        for ac in all_valid() {
            assert_eq!(AddressCounter::at(ac.row(), ac.col()), Some(ac));
        }
    }

    #[test]
    fn test_rejects_off_display_positions() {
        assert_eq!(AddressCounter::at(2, 0), None);
        assert_eq!(AddressCounter::at(0, LINE_WIDTH), None);
        assert_eq!(AddressCounter::at(0, 0x29), None);
        assert_eq!(AddressCounter::at(1, 0x27).map(AddressCounter::value), Some(0x67));
    }
}
