//! Low-level drivers for the keyer's outputs.
//!
//! Each driver calls into [`hw_init`] for raw pin access, which is a
//! no-op simulation on host targets.

pub mod hw_init;
pub mod key_line;
pub mod status_led;
pub mod task;
