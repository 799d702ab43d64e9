//! WiFi soft-AP adapter.
//!
//! Implements [`AccessPointPort`]: the keyer hosts its own network and
//! the operator's phone joins it.  No station mode, no reconnection.
//!
//! ## cfg gating
//!
//! - **`target_os = "espidf"`**: `esp_idf_svc::wifi::BlockingWifi` in
//!   access-point mode.
//! - **all other targets**: simulation that reports the default AP
//!   address without touching a radio.

use core::fmt;
use std::net::Ipv4Addr;

use log::info;
#[cfg(target_os = "espidf")]
use log::error;

use super::utils::is_printable_ascii;

#[cfg(target_os = "espidf")]
use esp_idf_hal::modem::Modem;
#[cfg(target_os = "espidf")]
use esp_idf_svc::{
    eventloop::EspSystemEventLoop,
    nvs::EspDefaultNvsPartition,
    wifi::{AccessPointConfiguration, AuthMethod, BlockingWifi, Configuration, EspWifi},
};

/// Address the ESP-IDF soft-AP netif assigns itself by default.
pub const SIM_AP_IP: Ipv4Addr = Ipv4Addr::new(192, 168, 71, 1);

// ───────────────────────────────────────────────────────────────
// Port trait
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectivityError {
    InvalidSsid,
    InvalidPassword,
    InvalidChannel,
    StartFailed,
    AlreadyStarted,
}

impl fmt::Display for ConnectivityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSsid => write!(f, "SSID invalid (must be 1-32 printable ASCII bytes)"),
            Self::InvalidPassword => write!(
                f,
                "password invalid (must be 8-64 bytes for WPA2, or empty for open)"
            ),
            Self::InvalidChannel => write!(f, "channel must be 1-13"),
            Self::StartFailed => write!(f, "access point failed to start"),
            Self::AlreadyStarted => write!(f, "access point already running"),
        }
    }
}

impl std::error::Error for ConnectivityError {}

pub trait AccessPointPort {
    /// Bring the AP up and return the address clients reach it on.
    fn start(&mut self) -> Result<Ipv4Addr, ConnectivityError>;
    fn stop(&mut self);
    fn is_up(&self) -> bool;
    fn ip(&self) -> Option<Ipv4Addr>;
}

// ───────────────────────────────────────────────────────────────
// Validation
// ───────────────────────────────────────────────────────────────

pub fn validate_ssid(ssid: &str) -> Result<(), ConnectivityError> {
    if ssid.is_empty() || ssid.len() > 32 || !is_printable_ascii(ssid) {
        return Err(ConnectivityError::InvalidSsid);
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), ConnectivityError> {
    if password.is_empty() {
        return Ok(());
    }
    if password.len() < 8 || password.len() > 64 {
        return Err(ConnectivityError::InvalidPassword);
    }
    Ok(())
}

pub fn validate_channel(channel: u8) -> Result<(), ConnectivityError> {
    if (1..=13).contains(&channel) {
        Ok(())
    } else {
        Err(ConnectivityError::InvalidChannel)
    }
}

/// Validated soft-AP settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApCredentials {
    ssid: heapless::String<32>,
    password: heapless::String<64>,
    channel: u8,
}

impl ApCredentials {
    pub fn new(ssid: &str, password: &str, channel: u8) -> Result<Self, ConnectivityError> {
        validate_ssid(ssid)?;
        validate_password(password)?;
        validate_channel(channel)?;
        let mut creds = Self {
            ssid: heapless::String::new(),
            password: heapless::String::new(),
            channel,
        };
        creds.ssid.push_str(ssid).map_err(|()| ConnectivityError::InvalidSsid)?;
        creds
            .password
            .push_str(password)
            .map_err(|()| ConnectivityError::InvalidPassword)?;
        Ok(creds)
    }

    pub fn ssid(&self) -> &str {
        &self.ssid
    }

    pub fn channel(&self) -> u8 {
        self.channel
    }

    /// No password means an open network.
    pub fn is_open(&self) -> bool {
        self.password.is_empty()
    }
}

// ───────────────────────────────────────────────────────────────
// WiFi adapter
// ───────────────────────────────────────────────────────────────

pub struct WifiAdapter {
    creds: ApCredentials,
    ip: Option<Ipv4Addr>,
    #[cfg(target_os = "espidf")]
    wifi: BlockingWifi<EspWifi<'static>>,
}

impl WifiAdapter {
    #[cfg(target_os = "espidf")]
    pub fn new(
        creds: ApCredentials,
        modem: Modem,
        sysloop: EspSystemEventLoop,
        nvs: Option<EspDefaultNvsPartition>,
    ) -> Result<Self, ConnectivityError> {
        let driver = EspWifi::new(modem, sysloop.clone(), nvs).map_err(|e| {
            error!("WiFi: driver init failed: {}", e);
            ConnectivityError::StartFailed
        })?;
        let wifi = BlockingWifi::wrap(driver, sysloop).map_err(|e| {
            error!("WiFi: event loop wrap failed: {}", e);
            ConnectivityError::StartFailed
        })?;
        Ok(Self {
            creds,
            ip: None,
            wifi,
        })
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn new(creds: ApCredentials) -> Self {
        Self { creds, ip: None }
    }

    pub fn credentials(&self) -> &ApCredentials {
        &self.creds
    }

    // ── Platform-specific ─────────────────────────────────────

    #[cfg(target_os = "espidf")]
    fn platform_start(&mut self) -> Result<Ipv4Addr, ConnectivityError> {
        let auth_method = if self.creds.is_open() {
            AuthMethod::None
        } else {
            AuthMethod::WPA2Personal
        };
        let conf = Configuration::AccessPoint(AccessPointConfiguration {
            ssid: self
                .creds
                .ssid
                .as_str()
                .try_into()
                .map_err(|()| ConnectivityError::InvalidSsid)?,
            password: self
                .creds
                .password
                .as_str()
                .try_into()
                .map_err(|()| ConnectivityError::InvalidPassword)?,
            channel: self.creds.channel,
            auth_method,
            ..Default::default()
        });

        let fail = |stage: &str, e: esp_idf_svc::sys::EspError| {
            error!("WiFi: {} failed: {}", stage, e);
            ConnectivityError::StartFailed
        };
        self.wifi
            .set_configuration(&conf)
            .map_err(|e| fail("set_configuration", e))?;
        self.wifi.start().map_err(|e| fail("start", e))?;
        self.wifi
            .wait_netif_up()
            .map_err(|e| fail("wait_netif_up", e))?;
        let info = self
            .wifi
            .wifi()
            .ap_netif()
            .get_ip_info()
            .map_err(|e| fail("get_ip_info", e))?;
        Ok(info.ip)
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_start(&mut self) -> Result<Ipv4Addr, ConnectivityError> {
        info!("WiFi(sim): soft-AP '{}' simulated", self.creds.ssid);
        Ok(SIM_AP_IP)
    }

    #[cfg(target_os = "espidf")]
    fn platform_stop(&mut self) {
        if let Err(e) = self.wifi.stop() {
            error!("WiFi: stop failed: {}", e);
        }
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_stop(&mut self) {
        info!("WiFi(sim): soft-AP stopped");
    }
}

// ───────────────────────────────────────────────────────────────
// AccessPointPort
// ───────────────────────────────────────────────────────────────

impl AccessPointPort for WifiAdapter {
    fn start(&mut self) -> Result<Ipv4Addr, ConnectivityError> {
        if self.ip.is_some() {
            return Err(ConnectivityError::AlreadyStarted);
        }
        info!(
            "WiFi: starting AP '{}' on channel {} ({})",
            self.creds.ssid,
            self.creds.channel,
            if self.creds.is_open() { "open" } else { "WPA2" }
        );
        let ip = self.platform_start()?;
        self.ip = Some(ip);
        info!("WiFi: AP up at {}", ip);
        Ok(ip)
    }

    fn stop(&mut self) {
        if self.ip.take().is_some() {
            self.platform_stop();
        }
    }

    fn is_up(&self) -> bool {
        self.ip.is_some()
    }

    fn ip(&self) -> Option<Ipv4Addr> {
        self.ip
    }
}

// ───────────────────────────────────────────────────────────────
// Tests
// ───────────────────────────────────────────────────────────────
