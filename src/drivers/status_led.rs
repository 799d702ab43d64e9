//! Single-colour status LED on a plain GPIO.
//!
//! ## Polarity
//!
//! The SuperMini board wires its LEDs to 3V3, so they light when the pin
//! is pulled **low**.  `active_low` hides that from callers: `set(true)`
//! always means "lit".

use crate::drivers::hw_init::{self, HwInitError};
use crate::error::SignalError;

pub struct StatusLed {
    gpio: i32,
    active_low: bool,
    lit: bool,
}

impl StatusLed {
    /// Configure the pin with the LED dark.
    pub fn new(gpio: i32, active_low: bool) -> Result<Self, HwInitError> {
        hw_init::init_output(gpio, active_low)?;
        Ok(Self {
            gpio,
            active_low,
            lit: false,
        })
    }

    pub fn set(&mut self, lit: bool) -> Result<(), SignalError> {
        hw_init::gpio_write(self.gpio, Self::level_for(lit, self.active_low))?;
        self.lit = lit;
        Ok(())
    }

    pub fn is_lit(&self) -> bool {
        self.lit
    }

    /// Electrical level currently driven on the pin.
    pub fn level(&self) -> bool {
        Self::level_for(self.lit, self.active_low)
    }

    const fn level_for(lit: bool, active_low: bool) -> bool {
        lit != active_low
    }
}
