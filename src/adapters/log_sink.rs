//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing application events to the ESP-IDF
//! logger (UART / USB-CDC on the board, stderr on host).

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started { wpm } => {
                info!("START | keyer ready at {}", wpm);
            }
            AppEvent::TransmitStarted { message, speed } => {
                info!("TX | start speed={} msg={:?}", speed, message);
            }
            AppEvent::TransmitFinished(s) => {
                info!(
                    "TX | done {} | chars={} skipped={} pulses={} | {}ms",
                    s.wpm, s.characters, s.skipped, s.pulses, s.duration_ms
                );
            }
            AppEvent::TransmitFailed(e) => {
                warn!("TX | aborted, outputs released: {}", e);
            }
            AppEvent::CommandRejected { message } => {
                warn!("HTTP | busy, rejected msg={:?}", message);
            }
            AppEvent::EmptyCommand => {
                info!("HTTP | command without message");
            }
            AppEvent::PageServed => {
                info!("HTTP | control page served");
            }
        }
    }
}
