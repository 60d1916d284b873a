//! Bus configuration types and builder

pub use crate::error::{BuilderError, MAX_I2C_ADDRESS};

/// Default 7-bit address of PCF8574 LCD backpacks (A0..A2 pulled high)
pub const DEFAULT_ADDRESS: u8 = 0x27;

/// Default gap after every expander write, in microseconds
pub const DEFAULT_SETTLE_DELAY_US: u32 = 1_000;

/// Shortest accepted settle delay, in microseconds
///
/// The HD44780 needs the enable pulse high for at least 450ns.
pub const MIN_SETTLE_DELAY_US: u32 = 1;

/// Expander configuration
///
/// Use [`Builder`] to create a Config, or [`Config::default`] for a stock
/// PCF8574 backpack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// 7-bit I2C address of the expander
    pub address: u8,
    /// Gap after every expander write, in microseconds
    pub settle_delay_us: u32,
    /// Whether the backlight is on from the first transaction
    pub backlight: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS,
            settle_delay_us: DEFAULT_SETTLE_DELAY_US,
            backlight: false,
        }
    }
}

/// Builder for constructing expander configuration
///
/// # Example
///
/// ```
/// use hd44780_i2c::Builder;
///
/// let config = match Builder::new().address(0x3F).backlight(true).build() {
///     Ok(config) => config,
///     Err(_) => return,
/// };
/// assert_eq!(config.address, 0x3F);
/// assert!(config.backlight);
/// ```
#[must_use]
#[derive(Default)]
pub struct Builder {
    config: Config,
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the 7-bit I2C address
    pub fn address(mut self, address: u8) -> Self {
        self.config.address = address;
        self
    }

    /// Set the gap after every expander write
    pub fn settle_delay_us(mut self, delay_us: u32) -> Self {
        self.config.settle_delay_us = delay_us;
        self
    }

    /// Set the initial backlight state
    pub fn backlight(mut self, on: bool) -> Self {
        self.config.backlight = on;
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidAddress` if the address needs more than 7 bits,
    /// and `BuilderError::SettleDelayTooShort` below [`MIN_SETTLE_DELAY_US`]
    pub fn build(self) -> Result<Config, BuilderError> {
        let config = self.config;
        if config.address > MAX_I2C_ADDRESS {
            return Err(BuilderError::InvalidAddress {
                address: config.address,
            });
        }
        if config.settle_delay_us < MIN_SETTLE_DELAY_US {
            return Err(BuilderError::SettleDelayTooShort {
                min_us: MIN_SETTLE_DELAY_US,
                provided_us: config.settle_delay_us,
            });
        }
        Ok(config)
    }
}
