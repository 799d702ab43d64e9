//! Hardware adapter: bridges the keying drivers to [`SignalPort`].
//!
//! Owns the key line, both indicator LEDs and a blocking delay.  This is
//! the only module that drives the keyer's pins.  On non-espidf targets
//! the drivers underneath are simulation stubs and the delay can be any
//! [`DelayNs`] implementation.

use embedded_hal::delay::DelayNs;

use crate::app::ports::SignalPort;
use crate::drivers::key_line::KeyLine;
use crate::drivers::status_led::StatusLed;
use crate::error::SignalError;
use crate::morse::Indicator;

pub struct HardwareAdapter<D: DelayNs> {
    key: KeyLine,
    dot: StatusLed,
    dash: StatusLed,
    delay: D,
}

impl<D: DelayNs> HardwareAdapter<D> {
    pub fn new(key: KeyLine, dot: StatusLed, dash: StatusLed, delay: D) -> Self {
        Self {
            key,
            dot,
            dash,
            delay,
        }
    }

    pub fn key(&self) -> &KeyLine {
        &self.key
    }

    pub fn indicator(&self, which: Indicator) -> &StatusLed {
        match which {
            Indicator::Dot => &self.dot,
            Indicator::Dash => &self.dash,
        }
    }

    pub fn delay(&self) -> &D {
        &self.delay
    }
}

impl<D: DelayNs> SignalPort for HardwareAdapter<D> {
    fn set_key(&mut self, keyed: bool) -> Result<(), SignalError> {
        self.key.set(keyed)
    }

    fn set_indicator(&mut self, indicator: Indicator, lit: bool) -> Result<(), SignalError> {
        match indicator {
            Indicator::Dot => self.dot.set(lit),
            Indicator::Dash => self.dash.set(lit),
        }
    }

    fn hold(&mut self, ms: u32) {
        if ms > 0 {
            self.delay.delay_ms(ms);
        }
    }
}
