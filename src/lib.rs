//! WebKeyer firmware library.
//!
//! Exposes the pure-logic modules for integration testing.  All
//! ESP-IDF-specific code is guarded by `#[cfg(target_os = "espidf")]`
//! within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod error;
pub mod http;
pub mod morse;
pub mod pins;

pub mod adapters;
pub mod drivers;

// Links the std critical-section impl the embassy channel needs in tests.
#[cfg(test)]
use critical_section as _;
