//! Shadow copies of the controller's write-only registers
//!
//! The HD44780 cannot be read back through a PCF8574 backpack, and its display
//! control and entry mode instructions always replace the whole register. To
//! change one flag the driver keeps the last value it sent, edits it, and sends
//! the whole thing again. [`DisplayState`] and [`EntryState`] are those copies.
//!
//! ## Example
//!
//! ```
//! use hd44780_i2c::state::{DisplayFlag, DisplayState};
//!
//! let state = DisplayState::ON.with(DisplayFlag::Blink);
//! assert!(state.contains(DisplayFlag::Display));
//! assert!(!state.contains(DisplayFlag::Cursor));
//! assert_eq!(state.instruction(), 0x0D);
//! ```

use crate::command::{self, BLINK_ON, CURSOR_ON, DISPLAY_ON, Direction, MoveTarget};

/// One flag of the display control register
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum DisplayFlag {
    /// Whole display on
    Display = DISPLAY_ON,
    /// Underline cursor visible
    Cursor = CURSOR_ON,
    /// Blinking block cursor visible
    Blink = BLINK_ON,
}

/// Display control register contents (D, C, B bits)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DisplayState(u8);

impl DisplayState {
    /// Everything off, as after power-on reset
    pub const OFF: Self = Self(0);
    /// Display on, cursor and blink off
    pub const ON: Self = Self(DISPLAY_ON);

    /// Raw D/C/B bits
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Whether `flag` is set
    pub const fn contains(self, flag: DisplayFlag) -> bool {
        self.0 & flag as u8 != 0
    }

    /// Copy with `flag` set
    pub const fn with(self, flag: DisplayFlag) -> Self {
        Self(self.0 | flag as u8)
    }

    /// Copy with `flag` cleared
    pub const fn without(self, flag: DisplayFlag) -> Self {
        Self(self.0 & !(flag as u8))
    }

    /// Copy with `flag` flipped
    pub const fn toggled(self, flag: DisplayFlag) -> Self {
        Self(self.0 ^ flag as u8)
    }

    /// Display control instruction carrying the whole register
    pub const fn instruction(self) -> u8 {
        command::display_control(self.0)
    }
}

/// Named entry mode settings
///
/// The display variants are named for the way the text travels on screen. With
/// the address counter incrementing the display shifts left, so
/// [`DisplayDecrement`](Self::DisplayDecrement) pairs display shift with an
/// incrementing counter and [`DisplayIncrement`](Self::DisplayIncrement) with a
/// decrementing one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryMode {
    /// Cursor moves right after each write
    CursorIncrement,
    /// Cursor moves left after each write
    CursorDecrement,
    /// Display shifts, address counter increments
    DisplayDecrement,
    /// Display shifts, address counter decrements
    DisplayIncrement,
}

/// Entry mode register contents (I/D and S bits)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EntryState {
    /// What moves after each write
    pub target: MoveTarget,
    /// Which way the address counter steps after each write
    pub direction: Direction,
}

impl EntryState {
    /// State selected by a named entry mode
    pub const fn from_mode(mode: EntryMode) -> Self {
        let (target, direction) = match mode {
            EntryMode::CursorIncrement => (MoveTarget::Cursor, Direction::Increment),
            EntryMode::CursorDecrement => (MoveTarget::Cursor, Direction::Decrement),
            EntryMode::DisplayDecrement => (MoveTarget::Display, Direction::Increment),
            EntryMode::DisplayIncrement => (MoveTarget::Display, Direction::Decrement),
        };
        Self { target, direction }
    }

    /// Named entry mode for this state
    pub const fn mode(self) -> EntryMode {
        match (self.target, self.direction) {
            (MoveTarget::Cursor, Direction::Increment) => EntryMode::CursorIncrement,
            (MoveTarget::Cursor, Direction::Decrement) => EntryMode::CursorDecrement,
            (MoveTarget::Display, Direction::Increment) => EntryMode::DisplayDecrement,
            (MoveTarget::Display, Direction::Decrement) => EntryMode::DisplayIncrement,
        }
    }

    /// Entry mode instruction carrying the whole register
    pub const fn instruction(self) -> u8 {
        command::entry_mode(self.target, self.direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MODES: [EntryMode; 4] = [
        EntryMode::CursorIncrement,
        EntryMode::CursorDecrement,
        EntryMode::DisplayDecrement,
        EntryMode::DisplayIncrement,
    ];

    #[test]
    fn test_display_flags_are_independent() {
        let state = DisplayState::OFF
            .with(DisplayFlag::Cursor)
            .with(DisplayFlag::Blink);
        assert!(!state.contains(DisplayFlag::Display));
        assert_eq!(state.instruction(), 0x0B);

        let state = state.without(DisplayFlag::Cursor);
        assert!(state.contains(DisplayFlag::Blink));
        assert!(!state.contains(DisplayFlag::Cursor));
    }

    #[test]
    fn test_with_is_idempotent() {
        let once = DisplayState::ON.with(DisplayFlag::Cursor);
        let twice = once.with(DisplayFlag::Cursor);
        assert_eq!(once, twice);
        assert_eq!(once.instruction(), twice.instruction());
    }

    #[test]
    fn test_toggle_twice_restores() {
        let state = DisplayState::ON;
        assert_eq!(
            state.toggled(DisplayFlag::Display).toggled(DisplayFlag::Display),
            state
        );
        assert_eq!(state.toggled(DisplayFlag::Display), DisplayState::OFF);
    }

    #[test]
    fn test_entry_mode_instructions() {
        assert_eq!(EntryState::from_mode(EntryMode::CursorIncrement).instruction(), 0x06);
        assert_eq!(EntryState::from_mode(EntryMode::CursorDecrement).instruction(), 0x04);
        assert_eq!(EntryState::from_mode(EntryMode::DisplayDecrement).instruction(), 0x07);
        assert_eq!(EntryState::from_mode(EntryMode::DisplayIncrement).instruction(), 0x05);
    }

    #[test]
    fn test_entry_mode_round_trip() {
        for mode in MODES {
            assert_eq!(EntryState::from_mode(mode).mode(), mode);
        }
    }

    #[test]
    fn test_default_entry_state_is_cursor_increment() {
        assert_eq!(EntryState::default().mode(), EntryMode::CursorIncrement);
    }
}
