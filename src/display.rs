//! Core display operations

use embedded_hal::delay::DelayNs;

use crate::address::AddressCounter;
use crate::command::{self, BusWidth, CLEAR_DISPLAY, Font, Lines, RETURN_HOME, Shift};
use crate::error::{Error, GLYPH_SLOTS};
use crate::interface::{DisplayInterface, Register};
use crate::state::{DisplayFlag, DisplayState, EntryMode, EntryState};
use crate::writer::Writer;

pub(crate) type DisplayResult<I> = core::result::Result<(), Error<I>>;

/// Time the controller needs after power-on before it accepts instructions
pub const POWER_ON_DELAY_MS: u32 = 50;

/// Wait after each 8-bit function set nibble during bring-up
pub const WAKE_DELAY_MS: u32 = 5;

/// Wait after every bring-up instruction and after slow instructions
///
/// Clear display and return home take up to 1.52ms.
pub const INSTRUCTION_DELAY_MS: u32 = 2;

/// Number of 8-bit function set nibbles sent before switching to 4-bit mode
pub const WAKE_REPEATS: usize = 3;

/// Bitmap of a custom 5x8 character, one byte per pixel row (low 5 bits used)
pub type Glyph = [u8; 8];

/// Core display driver for HD44780
///
/// Owns the interface and keeps shadow copies of the controller state that
/// cannot be read back: the DDRAM address counter, the display control
/// register and the entry mode register. Every mutating operation takes
/// `&mut self`; queries take `&self` and never touch the bus.
///
/// ## Example
///
/// ```rust,no_run
/// use embedded_hal::delay::DelayNs;
/// use hd44780_i2c::{Display, Interface};
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
/// # struct MockDelay;
/// # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
/// # let mut delay = MockDelay;
/// let mut display = Display::new(Interface::new(MockI2c));
/// let _ = display.initialize(&mut delay);
/// let _ = display.enable_backlight();
/// let _ = display.send_buffer(b"HELLO", &mut delay);
/// assert_eq!(display.cursor_col(), 5);
/// ```
pub struct Display<I>
where
    I: DisplayInterface,
{
    /// Hardware interface
    interface: I,
    /// Copy of the controller's DDRAM address counter
    address: AddressCounter,
    /// Last display control value sent
    display_state: DisplayState,
    /// Last entry mode value sent
    entry_state: EntryState,
}

impl<I> Display<I>
where
    I: DisplayInterface,
{
    /// Create a new Display instance
    ///
    /// Sends nothing. The shadow state starts at the controller's power-on
    /// reset values; call [`initialize`](Self::initialize) before use.
    pub fn new(interface: I) -> Self {
        Self {
            interface,
            address: AddressCounter::HOME,
            display_state: DisplayState::OFF,
            entry_state: EntryState::default(),
        }
    }

    /// Bring the controller into 4-bit, two-line mode
    ///
    /// The controller's bus width is unknown after power-on, so it is first
    /// forced into 8-bit mode with three lone function set nibbles, then
    /// switched to 4-bit. After that it is configured for two lines and a
    /// 5x8 font, cleared, homed, switched on with the cursor hidden, and set to
    /// move the cursor right after each write.
    ///
    /// Takes about 77ms of delays. Calling it again repeats the whole sequence.
    pub fn initialize<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        log::debug!("initializing controller");
        delay.delay_ms(POWER_ON_DELAY_MS);

        let eight_bit = command::high_nibble(command::function_set(
            BusWidth::EightBit,
            Lines::One,
            Font::Dots5x8,
        ));
        for _ in 0..WAKE_REPEATS {
            self.send_nibble(eight_bit, delay)?;
            delay.delay_ms(WAKE_DELAY_MS);
        }

        let four_bit = command::high_nibble(command::function_set(
            BusWidth::FourBit,
            Lines::One,
            Font::Dots5x8,
        ));
        self.send_nibble(four_bit, delay)?;
        delay.delay_ms(INSTRUCTION_DELAY_MS);

        // 4-bit from here on
        self.send_instruction(
            command::function_set(BusWidth::FourBit, Lines::Two, Font::Dots5x8),
            delay,
        )?;
        delay.delay_ms(INSTRUCTION_DELAY_MS);

        self.send_instruction(CLEAR_DISPLAY, delay)?;
        delay.delay_ms(INSTRUCTION_DELAY_MS);

        self.send_instruction(RETURN_HOME, delay)?;
        self.address = AddressCounter::HOME;
        delay.delay_ms(INSTRUCTION_DELAY_MS);

        self.write_display_state(DisplayState::ON, delay)?;
        delay.delay_ms(INSTRUCTION_DELAY_MS);

        self.write_entry_state(EntryState::from_mode(EntryMode::CursorIncrement), delay)?;
        delay.delay_ms(INSTRUCTION_DELAY_MS);

        log::debug!("controller ready");
        Ok(())
    }

    /// Write one character at the cursor
    ///
    /// The address counter then steps the way the entry mode tells the
    /// controller to step.
    pub fn send_data<D: DelayNs>(&mut self, byte: u8, delay: &mut D) -> DisplayResult<I> {
        self.interface
            .send_byte(byte, Register::Data, delay)
            .map_err(Error::Interface)?;
        self.address.advance(self.entry_state.direction);
        Ok(())
    }

    /// Write a run of characters at the cursor
    ///
    /// Bytes are sent as-is; no control characters are interpreted. Stops at
    /// the first bus error.
    pub fn send_buffer<D: DelayNs>(&mut self, bytes: &[u8], delay: &mut D) -> DisplayResult<I> {
        for &byte in bytes {
            self.send_data(byte, delay)?;
        }
        Ok(())
    }

    /// Store a custom glyph in CGRAM slot `slot`
    ///
    /// The glyph is shown by writing the byte `slot` as data. Afterwards the
    /// controller is pointed back at the DDRAM cell the cursor was on, so the
    /// next [`send_data`](Self::send_data) lands on the display again.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidGlyphSlot` without touching the bus if `slot` is
    /// 8 or more.
    pub fn create_custom_char<D: DelayNs>(
        &mut self,
        slot: u8,
        glyph: &Glyph,
        delay: &mut D,
    ) -> DisplayResult<I> {
        if slot >= GLYPH_SLOTS {
            return Err(Error::InvalidGlyphSlot { slot });
        }
        log::debug!("loading glyph into slot {}", slot);

        let resume = self.address;
        self.send_instruction(command::set_cgram_address(slot << 3), delay)?;
        for &row in glyph {
            self.interface
                .send_byte(row, Register::Data, delay)
                .map_err(Error::Interface)?;
        }
        self.set_address(resume, delay)
    }

    // Backlight

    /// Turn the backlight on
    pub fn enable_backlight(&mut self) -> DisplayResult<I> {
        self.interface.set_backlight(true).map_err(Error::Interface)
    }

    /// Turn the backlight off
    pub fn disable_backlight(&mut self) -> DisplayResult<I> {
        self.interface.set_backlight(false).map_err(Error::Interface)
    }

    /// Flip the backlight
    pub fn toggle_backlight(&mut self) -> DisplayResult<I> {
        let on = !self.interface.is_backlight_on();
        self.interface.set_backlight(on).map_err(Error::Interface)
    }

    /// Whether the backlight is on
    pub fn is_backlight_on(&self) -> bool {
        self.interface.is_backlight_on()
    }

    // Entry mode

    /// Move the cursor right after each write
    pub fn set_cursor_auto_inc<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        self.set_entry_mode(EntryMode::CursorIncrement, delay)
    }

    /// Move the cursor left after each write
    pub fn set_cursor_auto_dec<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        self.set_entry_mode(EntryMode::CursorDecrement, delay)
    }

    /// Shift the display after each write, address counter decrementing
    pub fn set_display_auto_inc<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        self.set_entry_mode(EntryMode::DisplayIncrement, delay)
    }

    /// Shift the display after each write, address counter incrementing
    pub fn set_display_auto_dec<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        self.set_entry_mode(EntryMode::DisplayDecrement, delay)
    }

    /// Set the entry mode
    pub fn set_entry_mode<D: DelayNs>(
        &mut self,
        mode: EntryMode,
        delay: &mut D,
    ) -> DisplayResult<I> {
        log::debug!("entry mode {:?}", mode);
        self.write_entry_state(EntryState::from_mode(mode), delay)
    }

    /// Current entry mode
    pub fn entry_mode(&self) -> EntryMode {
        self.entry_state.mode()
    }

    /// Last entry mode register value sent
    pub fn entry_state(&self) -> EntryState {
        self.entry_state
    }

    // Display

    /// Blank the display and home the cursor
    ///
    /// The cached entry mode is left as last sent. The controller itself
    /// forces increment on clear, so call
    /// [`set_entry_mode`](Self::set_entry_mode) again if a decrementing mode
    /// must hold afterwards.
    pub fn clear_display<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        self.send_instruction(CLEAR_DISPLAY, delay)?;
        self.address = AddressCounter::HOME;
        delay.delay_ms(INSTRUCTION_DELAY_MS);
        Ok(())
    }

    /// Switch the display on
    pub fn enable_display<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        self.write_display_state(self.display_state.with(DisplayFlag::Display), delay)
    }

    /// Switch the display off, keeping DDRAM contents
    pub fn disable_display<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        self.write_display_state(self.display_state.without(DisplayFlag::Display), delay)
    }

    /// Flip the display on or off
    pub fn toggle_display<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        self.write_display_state(self.display_state.toggled(DisplayFlag::Display), delay)
    }

    /// Whether the display is on
    pub fn is_display_enabled(&self) -> bool {
        self.display_state.contains(DisplayFlag::Display)
    }

    /// Last display control register value sent
    pub fn display_state(&self) -> DisplayState {
        self.display_state
    }

    // Cursor position

    /// Move the cursor to row 0, column 0 and undo any display shift
    pub fn set_cursor_home<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        self.send_instruction(RETURN_HOME, delay)?;
        self.address = AddressCounter::HOME;
        delay.delay_ms(INSTRUCTION_DELAY_MS);
        Ok(())
    }

    /// Move the cursor one cell left, wrapping between rows
    pub fn move_cursor_left<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        self.send_instruction(command::shift(Shift::CursorLeft), delay)?;
        self.address.decrement();
        Ok(())
    }

    /// Move the cursor one cell right, wrapping between rows
    pub fn move_cursor_right<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        self.send_instruction(command::shift(Shift::CursorRight), delay)?;
        self.address.increment();
        Ok(())
    }

    /// Move the cursor to `(row, col)`
    ///
    /// Positions off the display (`row > 1` or `col >= 40`) are ignored:
    /// nothing is sent and the cursor stays where it was. Columns run from 0
    /// to 39, so `col == 40` is rejected too. Check
    /// [`cursor_row`](Self::cursor_row) / [`cursor_col`](Self::cursor_col)
    /// if the caller needs to know.
    pub fn set_cursor_pos<D: DelayNs>(
        &mut self,
        row: u8,
        col: u8,
        delay: &mut D,
    ) -> DisplayResult<I> {
        match AddressCounter::at(row, col) {
            Some(address) => self.set_address(address, delay),
            None => {
                log::warn!("ignoring cursor position ({}, {})", row, col);
                Ok(())
            }
        }
    }

    /// Row the cursor is on
    pub fn cursor_row(&self) -> u8 {
        self.address.row()
    }

    /// Column the cursor is on
    pub fn cursor_col(&self) -> u8 {
        self.address.col()
    }

    /// Copy of the controller's address counter
    pub fn address(&self) -> AddressCounter {
        self.address
    }

    // Cursor appearance

    /// Show the underline cursor
    pub fn enable_cursor_display<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        self.write_display_state(self.display_state.with(DisplayFlag::Cursor), delay)
    }

    /// Hide the underline cursor
    pub fn disable_cursor_display<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        self.write_display_state(self.display_state.without(DisplayFlag::Cursor), delay)
    }

    /// Flip the underline cursor
    pub fn toggle_cursor_display<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        self.write_display_state(self.display_state.toggled(DisplayFlag::Cursor), delay)
    }

    /// Whether the underline cursor is shown
    pub fn is_cursor_displayed(&self) -> bool {
        self.display_state.contains(DisplayFlag::Cursor)
    }

    /// Show the blinking block cursor
    pub fn enable_blinking_cursor<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        self.write_display_state(self.display_state.with(DisplayFlag::Blink), delay)
    }

    /// Hide the blinking block cursor
    pub fn disable_blinking_cursor<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        self.write_display_state(self.display_state.without(DisplayFlag::Blink), delay)
    }

    /// Flip the blinking block cursor
    pub fn toggle_blinking_cursor<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        self.write_display_state(self.display_state.toggled(DisplayFlag::Blink), delay)
    }

    /// Whether the blinking block cursor is shown
    pub fn is_blinking_cursor_displayed(&self) -> bool {
        self.display_state.contains(DisplayFlag::Blink)
    }

    // Scrolling

    /// Scroll the whole display one cell left
    ///
    /// DDRAM and the address counter are unchanged.
    pub fn scroll_display_left<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        self.send_instruction(command::shift(Shift::DisplayLeft), delay)
    }

    /// Scroll the whole display one cell right
    ///
    /// DDRAM and the address counter are unchanged.
    pub fn scroll_display_right<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        self.send_instruction(command::shift(Shift::DisplayRight), delay)
    }

    /// Character stream over this display
    ///
    /// See [`Writer`] for the control characters it understands. Does not
    /// initialize the controller.
    pub fn writer<'a, D: DelayNs>(&'a mut self, delay: &'a mut D) -> Writer<'a, I, D> {
        Writer::new(self, delay)
    }

    /// Get the interface
    pub fn interface(&self) -> &I {
        &self.interface
    }

    /// Get the interface mutably
    ///
    /// Bytes sent through it bypass the shadow state kept here.
    pub fn interface_mut(&mut self) -> &mut I {
        &mut self.interface
    }

    /// Release the interface
    pub fn release(self) -> I {
        self.interface
    }

    fn set_address<D: DelayNs>(
        &mut self,
        address: AddressCounter,
        delay: &mut D,
    ) -> DisplayResult<I> {
        self.send_instruction(command::set_ddram_address(address.value()), delay)?;
        self.address = address;
        Ok(())
    }

    fn write_display_state<D: DelayNs>(
        &mut self,
        state: DisplayState,
        delay: &mut D,
    ) -> DisplayResult<I> {
        self.send_instruction(state.instruction(), delay)?;
        self.display_state = state;
        Ok(())
    }

    fn write_entry_state<D: DelayNs>(
        &mut self,
        state: EntryState,
        delay: &mut D,
    ) -> DisplayResult<I> {
        self.send_instruction(state.instruction(), delay)?;
        self.entry_state = state;
        Ok(())
    }

    fn send_instruction<D: DelayNs>(&mut self, instruction: u8, delay: &mut D) -> DisplayResult<I> {
        self.interface
            .send_byte(instruction, Register::Instruction, delay)
            .map_err(Error::Interface)
    }

    fn send_nibble<D: DelayNs>(&mut self, nibble: u8, delay: &mut D) -> DisplayResult<I> {
        self.interface
            .send_nibble(nibble, Register::Instruction, delay)
            .map_err(Error::Interface)
    }
}
