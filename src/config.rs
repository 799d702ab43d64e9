//! Keyer configuration.
//!
//! Built into the firmware from `keyer.json` at compile time.  Missing
//! fields take their defaults; an unparseable or invalid file falls back
//! to [`KeyerConfig::default`] as a whole.

use core::fmt;
use std::time::Duration;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::adapters::wifi::{self, ApCredentials, ConnectivityError};
use crate::morse::Wpm;
use crate::pins;

/// Config embedded at build time.
pub const EMBEDDED_CONFIG: &str = include_str!("../keyer.json");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// JSON did not parse.
    Parse,
    /// A field is out of range; names the field.
    ValidationFailed(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse => write!(f, "config JSON malformed"),
            Self::ValidationFailed(field) => write!(f, "config field '{}' out of range", field),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyerConfig {
    // --- Soft-AP ---
    pub ssid: heapless::String<32>,
    /// Empty for an open network.
    pub password: heapless::String<64>,
    pub channel: u8,

    // --- Pins ---
    pub key_gpio: i32,
    pub dot_led_gpio: i32,
    pub dash_led_gpio: i32,
    /// LEDs light when their pin is low.
    pub leds_active_low: bool,

    // --- Keying ---
    /// Speed used until a command sets another.
    pub default_wpm: u32,

    // --- HTTP ---
    pub http_port: u16,
    pub read_timeout_ms: u32,
}

impl Default for KeyerConfig {
    fn default() -> Self {
        let mut ssid = heapless::String::new();
        let _ = ssid.push_str("ESP_Keyer");
        let mut password = heapless::String::new();
        let _ = password.push_str("12345678");
        Self {
            ssid,
            password,
            channel: 1,

            key_gpio: pins::KEY_GPIO,
            dot_led_gpio: pins::DOT_LED_GPIO,
            dash_led_gpio: pins::DASH_LED_GPIO,
            leds_active_low: true,

            default_wpm: 20,

            http_port: 80,
            read_timeout_ms: 2000,
        }
    }
}

impl KeyerConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|_| ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse `json`, or log why not and use defaults.
    pub fn load(json: &str) -> Self {
        Self::from_json(json).unwrap_or_else(|e| {
            warn!("config: {}, using defaults", e);
            Self::default()
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let connectivity = |e: ConnectivityError| match e {
            ConnectivityError::InvalidSsid => ConfigError::ValidationFailed("ssid"),
            ConnectivityError::InvalidPassword => ConfigError::ValidationFailed("password"),
            _ => ConfigError::ValidationFailed("channel"),
        };
        wifi::validate_ssid(&self.ssid).map_err(connectivity)?;
        wifi::validate_password(&self.password).map_err(connectivity)?;
        wifi::validate_channel(self.channel).map_err(connectivity)?;

        let pin_ok = |p: i32| (0..=pins::MAX_GPIO).contains(&p);
        if !pin_ok(self.key_gpio) {
            return Err(ConfigError::ValidationFailed("key_gpio"));
        }
        if !pin_ok(self.dot_led_gpio) {
            return Err(ConfigError::ValidationFailed("dot_led_gpio"));
        }
        if !pin_ok(self.dash_led_gpio) {
            return Err(ConfigError::ValidationFailed("dash_led_gpio"));
        }
        if self.key_gpio == self.dot_led_gpio
            || self.key_gpio == self.dash_led_gpio
            || self.dot_led_gpio == self.dash_led_gpio
        {
            return Err(ConfigError::ValidationFailed("gpio"));
        }
        if self.default_wpm == 0 || i32::try_from(self.default_wpm).is_err() {
            return Err(ConfigError::ValidationFailed("default_wpm"));
        }
        if self.read_timeout_ms == 0 {
            return Err(ConfigError::ValidationFailed("read_timeout_ms"));
        }
        Ok(())
    }

    pub fn wpm(&self) -> Wpm {
        Wpm::try_from(self.default_wpm).unwrap_or_else(|()| Wpm::DEFAULT)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(u64::from(self.read_timeout_ms))
    }

    pub fn ap_credentials(&self) -> Result<ApCredentials, ConnectivityError> {
        ApCredentials::new(&self.ssid, &self.password, self.channel)
    }
}
