//! One-shot GPIO setup and raw level writes.
//!
//! Uses the ESP-IDF `gpio_*` sys calls directly.  Every keyer output is a
//! plain push-pull pin, so there is nothing else to configure.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

use crate::error::SignalError;
use crate::pins;

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    /// `gpio_config` rejected the pin.
    GpioConfigFailed { gpio: i32, rc: i32 },
    /// Pin number outside the chip's GPIO range.
    InvalidPin(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::GpioConfigFailed { gpio, rc } => {
                write!(f, "GPIO{} config failed (rc={})", gpio, rc)
            }
            Self::InvalidPin(gpio) => write!(f, "GPIO{} is not a valid output", gpio),
        }
    }
}

impl std::error::Error for HwInitError {}

fn check_pin(pin: i32) -> Result<(), HwInitError> {
    if (0..=pins::MAX_GPIO).contains(&pin) {
        Ok(())
    } else {
        Err(HwInitError::InvalidPin(pin))
    }
}

/// Configure `pin` as an output and drive it to its idle level.
#[cfg(target_os = "espidf")]
pub fn init_output(pin: i32, idle_high: bool) -> Result<(), HwInitError> {
    check_pin(pin)?;
    let cfg = gpio_config_t {
        pin_bit_mask: 1u64 << pin,
        mode: gpio_mode_t_GPIO_MODE_OUTPUT,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
    };
    // SAFETY: plain register configuration of a pin no other driver owns.
    let ret = unsafe { gpio_config(&cfg) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::GpioConfigFailed { gpio: pin, rc: ret });
    }
    // SAFETY: pin was configured as an output above.
    unsafe { gpio_set_level(pin, u32::from(idle_high)) };
    log::info!("hw_init: GPIO{} output, idle {}", pin, if idle_high { "high" } else { "low" });
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_output(pin: i32, idle_high: bool) -> Result<(), HwInitError> {
    check_pin(pin)?;
    log::debug!("hw_init(sim): GPIO{} output, idle_high={}", pin, idle_high);
    Ok(())
}

/// Drive an already-configured output.
#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: i32, high: bool) -> Result<(), SignalError> {
    // SAFETY: gpio_set_level only touches the output register of a pin
    // configured by `init_output`.
    let ret = unsafe { gpio_set_level(pin, u32::from(high)) };
    if ret == ESP_OK as i32 {
        Ok(())
    } else {
        Err(SignalError::GpioWriteFailed { gpio: pin, rc: ret })
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(_pin: i32, _high: bool) -> Result<(), SignalError> {
    Ok(())
}
