//! HD44780 instruction definitions
//!
//! This module defines the instruction opcodes and flag bits understood by the
//! HD44780 controller, together with pure encoders that compose them into
//! instruction bytes. Nothing here touches the bus; the bytes are handed to a
//! [`DisplayInterface`](crate::DisplayInterface) as instructions (RS low).
//!
//! ## Instruction Structure
//!
//! Every instruction is a single byte whose highest set bit selects the
//! instruction, with the bits below it carrying flags:
//!
//! | Instruction       | Opcode | Flags                          |
//! |-------------------|--------|--------------------------------|
//! | Clear display     | `0x01` | none                           |
//! | Return home       | `0x02` | none                           |
//! | Entry mode set    | `0x04` | I/D, S                         |
//! | Display control   | `0x08` | D, C, B                        |
//! | Cursor/display shift | `0x10` | S/C, R/L                    |
//! | Function set      | `0x20` | DL, N, F                       |
//! | Set CGRAM address | `0x40` | 6-bit address                  |
//! | Set DDRAM address | `0x80` | 7-bit address                  |
//!
//! ## Example
//!
//! ```
//! use hd44780_i2c::command::{self, BusWidth, Direction, Font, Lines, MoveTarget};
//!
//! assert_eq!(command::entry_mode(MoveTarget::Cursor, Direction::Increment), 0x06);
//! assert_eq!(
//!     command::function_set(BusWidth::FourBit, Lines::Two, Font::Dots5x8),
//!     0x28
//! );
//! assert_eq!(command::set_ddram_address(0x40), 0xC0);
//! ```

// Instruction opcodes

/// Clear display instruction (0x01)
///
/// Fills DDRAM with spaces and sets the address counter to 0. Slow (≥ 1.52ms).
pub const CLEAR_DISPLAY: u8 = 0x01;

/// Return home instruction (0x02)
///
/// Sets the address counter to 0 and undoes any display shift. Slow (≥ 1.52ms).
pub const RETURN_HOME: u8 = 0x02;

/// Entry mode set instruction (0x04)
pub const ENTRY_MODE_SET: u8 = 0x04;

/// Display on/off control instruction (0x08)
pub const DISPLAY_CONTROL: u8 = 0x08;

/// Cursor or display shift instruction (0x10)
pub const CURSOR_SHIFT: u8 = 0x10;

/// Function set instruction (0x20)
pub const FUNCTION_SET: u8 = 0x20;

/// Set CGRAM address instruction (0x40)
pub const SET_CGRAM_ADDRESS: u8 = 0x40;

/// Set DDRAM address instruction (0x80)
pub const SET_DDRAM_ADDRESS: u8 = 0x80;

// Entry mode flags

/// Entry mode: the cursor moves, the display stays put
pub const ENTRY_CURSOR_MOVE: u8 = 0x00;
/// Entry mode: the display shifts on each write
pub const ENTRY_DISPLAY_MOVE: u8 = 0x01;
/// Entry mode: DDRAM address decrements on each write
pub const ENTRY_DECREMENT: u8 = 0x00;
/// Entry mode: DDRAM address increments on each write
pub const ENTRY_INCREMENT: u8 = 0x02;

// Display control flags

/// Display control: blinking block cursor
pub const BLINK_ON: u8 = 0x01;
/// Display control: underline cursor
pub const CURSOR_ON: u8 = 0x02;
/// Display control: display enabled
pub const DISPLAY_ON: u8 = 0x04;

// Cursor/display shift flags

/// Shift: move the cursor left
pub const SHIFT_CURSOR_LEFT: u8 = 0x00;
/// Shift: move the cursor right
pub const SHIFT_CURSOR_RIGHT: u8 = 0x04;
/// Shift: scroll the display left
pub const SHIFT_DISPLAY_LEFT: u8 = 0x08;
/// Shift: scroll the display right
pub const SHIFT_DISPLAY_RIGHT: u8 = 0x0C;

// Function set flags

/// Function set: 5x8 dot font
pub const FONT_5X8: u8 = 0x00;
/// Function set: 5x10 dot font
pub const FONT_5X10: u8 = 0x04;
/// Function set: one display line
pub const LINES_ONE: u8 = 0x00;
/// Function set: two display lines
pub const LINES_TWO: u8 = 0x08;
/// Function set: 4-bit bus
pub const BUS_4BIT: u8 = 0x00;
/// Function set: 8-bit bus
pub const BUS_8BIT: u8 = 0x10;

/// What moves after each character write
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MoveTarget {
    /// The cursor moves over a fixed display
    #[default]
    Cursor,
    /// The whole display shifts under a fixed cursor
    Display,
}

/// Direction of the DDRAM address after each character write
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    /// Address decrements (cursor moves left)
    Decrement,
    /// Address increments (cursor moves right)
    #[default]
    Increment,
}

/// Direction of a cursor or display shift
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shift {
    /// Move the cursor one cell left
    CursorLeft,
    /// Move the cursor one cell right
    CursorRight,
    /// Scroll the whole display one cell left
    DisplayLeft,
    /// Scroll the whole display one cell right
    DisplayRight,
}

/// Data bus width selected by function set
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BusWidth {
    /// DB4..DB7 only
    FourBit,
    /// DB0..DB7
    EightBit,
}

/// Number of display lines selected by function set
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lines {
    /// One line
    One,
    /// Two lines
    Two,
}

/// Character font selected by function set
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Font {
    /// 5x8 dots
    Dots5x8,
    /// 5x10 dots
    Dots5x10,
}

/// Entry mode set instruction byte
pub const fn entry_mode(target: MoveTarget, direction: Direction) -> u8 {
    ENTRY_MODE_SET | entry_flags(target, direction)
}

/// Flag bits of an entry mode instruction, without the opcode
pub const fn entry_flags(target: MoveTarget, direction: Direction) -> u8 {
    let target = match target {
        MoveTarget::Cursor => ENTRY_CURSOR_MOVE,
        MoveTarget::Display => ENTRY_DISPLAY_MOVE,
    };
    let direction = match direction {
        Direction::Decrement => ENTRY_DECREMENT,
        Direction::Increment => ENTRY_INCREMENT,
    };
    target | direction
}

/// Display control instruction byte
///
/// `flags` is any combination of [`DISPLAY_ON`], [`CURSOR_ON`] and [`BLINK_ON`].
/// Bits outside those three are dropped.
pub const fn display_control(flags: u8) -> u8 {
    DISPLAY_CONTROL | (flags & (DISPLAY_ON | CURSOR_ON | BLINK_ON))
}

/// Cursor/display shift instruction byte
pub const fn shift(shift: Shift) -> u8 {
    CURSOR_SHIFT
        | match shift {
            Shift::CursorLeft => SHIFT_CURSOR_LEFT,
            Shift::CursorRight => SHIFT_CURSOR_RIGHT,
            Shift::DisplayLeft => SHIFT_DISPLAY_LEFT,
            Shift::DisplayRight => SHIFT_DISPLAY_RIGHT,
        }
}

/// Function set instruction byte
pub const fn function_set(bus: BusWidth, lines: Lines, font: Font) -> u8 {
    let bus = match bus {
        BusWidth::FourBit => BUS_4BIT,
        BusWidth::EightBit => BUS_8BIT,
    };
    let lines = match lines {
        Lines::One => LINES_ONE,
        Lines::Two => LINES_TWO,
    };
    let font = match font {
        Font::Dots5x8 => FONT_5X8,
        Font::Dots5x10 => FONT_5X10,
    };
    FUNCTION_SET | bus | lines | font
}

/// Set CGRAM address instruction byte
///
/// Only the low 6 bits of `address` fit the instruction.
pub const fn set_cgram_address(address: u8) -> u8 {
    SET_CGRAM_ADDRESS | (address & 0x3F)
}

/// Set DDRAM address instruction byte
///
/// Only the low 7 bits of `address` fit the instruction.
pub const fn set_ddram_address(address: u8) -> u8 {
    SET_DDRAM_ADDRESS | (address & 0x7F)
}

/// High nibble of a byte, as sent in the first half of a 4-bit transfer
pub const fn high_nibble(byte: u8) -> u8 {
    (byte >> 4) & 0x0F
}

/// Low nibble of a byte, as sent in the second half of a 4-bit transfer
pub const fn low_nibble(byte: u8) -> u8 {
    byte & 0x0F
}
