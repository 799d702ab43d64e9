//! Blocking delay for the keying adapter.
//!
//! - **`target_os = "espidf"`**: a hold sleeps in FreeRTOS for the whole
//!   ticks it spans, then busy-waits on `Ets::delay_us` up to a deadline
//!   taken from `esp_timer`.  Tick rounding never stretches a dot.
//! - **`not(target_os = "espidf")`**: `std::thread::sleep`.

use embedded_hal::delay::DelayNs;

#[cfg(target_os = "espidf")]
use esp_idf_hal::delay::Ets;

#[derive(Debug, Default, Clone, Copy)]
pub struct Esp32Clock;

impl Esp32Clock {
    pub const fn new() -> Self {
        Self
    }
}

/// Ticks a `ms` hold may sleep before busy-waiting the rest.
///
/// One tick is left to the busy-wait so a late wake-up still lands
/// before the deadline.  A `tick_ms` of 0 (tick rate above 1 kHz) means
/// busy-wait throughout.
pub(crate) const fn coarse_ticks(ms: u32, tick_ms: u32) -> u32 {
    if tick_ms == 0 {
        0
    } else {
        (ms / tick_ms).saturating_sub(1)
    }
}

#[cfg(target_os = "espidf")]
impl DelayNs for Esp32Clock {
    fn delay_ns(&mut self, ns: u32) {
        Ets::delay_us(ns.div_ceil(1_000));
    }

    fn delay_ms(&mut self, ms: u32) {
        use esp_idf_sys::{configTICK_RATE_HZ, esp_timer_get_time, vTaskDelay};

        // SAFETY: esp_timer is started by the IDF before `main` runs.
        let deadline = unsafe { esp_timer_get_time() } + i64::from(ms) * 1_000;

        let ticks = coarse_ticks(ms, 1_000 / configTICK_RATE_HZ);
        if ticks > 0 {
            // SAFETY: called from a FreeRTOS task, never from an ISR.
            unsafe { vTaskDelay(ticks) };
        }

        // SAFETY: as above.
        let remaining = deadline - unsafe { esp_timer_get_time() };
        if remaining > 0 {
            Ets::delay_us(remaining as u32);
        }
    }
}

#[cfg(not(target_os = "espidf"))]
impl DelayNs for Esp32Clock {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(std::time::Duration::from_nanos(u64::from(ns)));
    }

    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(std::time::Duration::from_millis(u64::from(ms)));
    }
}
