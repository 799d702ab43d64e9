//! GPIO assignments for the keyer board (ESP32-C3 SuperMini).
//!
//! Defaults only.  `keyer.json` can move any of them; the drivers take
//! the pin number from [`KeyerConfig`](crate::config::KeyerConfig).

/// Keying line to the rig (through the opto-coupler, active high).
pub const KEY_GPIO: i32 = 6;

/// Indicator lit for the duration of each dot.
pub const DOT_LED_GPIO: i32 = 12;

/// Indicator lit for the duration of each dash.
pub const DASH_LED_GPIO: i32 = 13;

/// Highest GPIO number on the ESP32-C3.
pub const MAX_GPIO: i32 = 21;
