//! Port traits: the boundary between keying logic and the outside world.
//!
//! ```text
//!   Engine ──▶ SignalPort ──▶ HardwareAdapter (GPIO + delay)
//!   Worker ──▶ EventSink  ──▶ LogEventSink
//! ```

use crate::error::SignalError;
use crate::morse::Indicator;

// ───────────────────────────────────────────────────────────────
// Signal port (driven adapter: engine → keying hardware)
// ───────────────────────────────────────────────────────────────

/// Keying line, two status indicators, and a blocking delay.
pub trait SignalPort {
    /// Assert (`true`) or release the keying line.
    fn set_key(&mut self, keyed: bool) -> Result<(), SignalError>;

    /// Light or extinguish one status indicator.  Polarity is the
    /// adapter's concern.
    fn set_indicator(&mut self, indicator: Indicator, lit: bool) -> Result<(), SignalError>;

    /// Block for `ms` milliseconds.  Never yields to other work.
    fn hold(&mut self, ms: u32);

    /// Best-effort return to idle: key released, both indicators off.
    fn release(&mut self) {
        let _ = self.set_key(false);
        let _ = self.set_indicator(Indicator::Dot, false);
        let _ = self.set_indicator(Indicator::Dash, false);
    }
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
