//! WebKeyer firmware entry point.
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │  WifiAdapter (soft-AP)         HttpServer (main thread)   │
//! │                                    │ decode               │
//! │                                    ▼                      │
//! │                                 TxQueue (depth 1)         │
//! │                                    │                      │
//! │  ────────────── worker thread ─────┼───────────────────   │
//! │                                    ▼                      │
//! │                      Worker ──▶ Engine ──▶ HardwareAdapter│
//! │                                          key + 2 LEDs     │
//! └───────────────────────────────────────────────────────────┘
//! ```

use anyhow::{Context, Result};
use esp_idf_hal::prelude::Peripherals;
use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::nvs::EspDefaultNvsPartition;
use log::{info, warn};

use webkeyer::adapters::hardware::HardwareAdapter;
use webkeyer::adapters::http_server::HttpServer;
use webkeyer::adapters::log_sink::LogEventSink;
use webkeyer::adapters::time::Esp32Clock;
use webkeyer::adapters::wifi::{AccessPointPort, WifiAdapter};
use webkeyer::app::events::AppEvent;
use webkeyer::app::ports::EventSink;
use webkeyer::app::worker::{TX_QUEUE, Worker};
use webkeyer::config::{EMBEDDED_CONFIG, KeyerConfig};
use webkeyer::drivers::key_line::KeyLine;
use webkeyer::drivers::status_led::StatusLed;
use webkeyer::drivers::task::spawn_task;
use webkeyer::morse::{CodeTable, Engine};

/// Above the HTTP server (main task, priority 5) so keying timing wins.
const WORKER_PRIORITY: u8 = 6;
const WORKER_STACK_KB: usize = 8;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  WebKeyer v{}                      ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    let config = KeyerConfig::load(EMBEDDED_CONFIG);

    // ── 2. Keying outputs ─────────────────────────────────────
    let key = KeyLine::new(config.key_gpio).context("key line")?;
    let dot = StatusLed::new(config.dot_led_gpio, config.leds_active_low).context("dot LED")?;
    let dash = StatusLed::new(config.dash_led_gpio, config.leds_active_low).context("dash LED")?;
    let hardware = HardwareAdapter::new(key, dot, dash, Esp32Clock::new());

    let engine = Engine::new(CodeTable::standard(), hardware, config.wpm());
    let speed = engine.speed_reader();

    // ── 3. Soft-AP ────────────────────────────────────────────
    let peripherals = Peripherals::take()?;
    let sysloop = EspSystemEventLoop::take()?;
    let nvs = match EspDefaultNvsPartition::take() {
        Ok(nvs) => Some(nvs),
        Err(e) => {
            warn!("NVS unavailable ({}), WiFi calibration will not persist", e);
            None
        }
    };
    let mut wifi = WifiAdapter::new(config.ap_credentials()?, peripherals.modem, sysloop, nvs)?;
    let ip = wifi.start()?;

    // ── 4. Server + worker ────────────────────────────────────
    let server = HttpServer::bind(config.http_port, config.read_timeout())?;
    let mut sink = LogEventSink::new();
    sink.emit(&AppEvent::Started { wpm: speed.get() });
    info!("Join '{}' and open http://{}/", config.ssid, ip);

    let worker = Worker::new(engine, LogEventSink::new());
    spawn_task(WORKER_PRIORITY, WORKER_STACK_KB, "tx-worker\0", move || {
        worker.run(&TX_QUEUE)
    })
    .context("spawning transmit worker")?;

    server.serve_forever(&TX_QUEUE, &speed, &mut sink)
}
