//! Keying line driver.
//!
//! Active high: driving the pin high closes the rig's key jack.

use crate::drivers::hw_init::{self, HwInitError};
use crate::error::SignalError;

pub struct KeyLine {
    gpio: i32,
    keyed: bool,
}

impl KeyLine {
    /// Configure the pin and leave the key up.
    pub fn new(gpio: i32) -> Result<Self, HwInitError> {
        hw_init::init_output(gpio, false)?;
        Ok(Self { gpio, keyed: false })
    }

    pub fn set(&mut self, keyed: bool) -> Result<(), SignalError> {
        hw_init::gpio_write(self.gpio, keyed)?;
        self.keyed = keyed;
        Ok(())
    }

    pub fn is_keyed(&self) -> bool {
        self.keyed
    }
}
