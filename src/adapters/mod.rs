//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter       | Implements       | Connects to                |
//! |---------------|------------------|----------------------------|
//! | `hardware`    | SignalPort       | ESP32 GPIO + blocking delay|
//! | `log_sink`    | EventSink        | Serial log output          |
//! | `time`        | DelayNs          | FreeRTOS / ROM delay       |
//! | `wifi`        | AccessPointPort  | ESP-IDF WiFi soft-AP       |
//! | `http_server` | (driving)        | lwIP TCP socket            |

pub mod hardware;
pub mod http_server;
pub mod log_sink;
pub mod time;
pub(super) mod utils;
pub mod wifi;
