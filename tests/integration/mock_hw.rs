//! Mock keying adapter for integration tests.
//!
//! Records every signal call so tests can assert on the exact keying
//! waveform without touching GPIO or sleeping.

use webkeyer::app::events::AppEvent;
use webkeyer::app::ports::{EventSink, SignalPort};
use webkeyer::error::SignalError;
use webkeyer::morse::Indicator;

// ── Signal call record ────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalCall {
    Key(bool),
    Led(Indicator, bool),
    Hold(u32),
}

// ── MockKeyer ─────────────────────────────────────────────────

#[derive(Default)]
pub struct MockKeyer {
    pub calls: Vec<SignalCall>,
    /// Fail the n-th (0-based) `set_key(true)`.
    pub fail_on_key_down: Option<usize>,
    key_downs: usize,
}

#[allow(dead_code)]
impl MockKeyer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on_key_down(n: usize) -> Self {
        Self {
            fail_on_key_down: Some(n),
            ..Self::default()
        }
    }

    /// Durations of every key-down period, in order.
    pub fn key_down_durations(&self) -> Vec<u32> {
        let mut out = Vec::new();
        let mut keyed = false;
        let mut acc = 0;
        for call in &self.calls {
            match *call {
                SignalCall::Key(true) => {
                    keyed = true;
                    acc = 0;
                }
                SignalCall::Key(false) if keyed => {
                    keyed = false;
                    out.push(acc);
                }
                SignalCall::Hold(ms) if keyed => acc += ms,
                _ => {}
            }
        }
        out
    }

    /// Silent holds between key-downs, merged where consecutive.
    pub fn gaps(&self) -> Vec<u32> {
        let mut out = Vec::new();
        let mut keyed = false;
        let mut acc: Option<u32> = None;
        for call in &self.calls {
            match *call {
                SignalCall::Key(k) => {
                    keyed = k;
                    if k {
                        if let Some(g) = acc.take() {
                            out.push(g);
                        }
                    }
                }
                SignalCall::Hold(ms) if !keyed => *acc.get_or_insert(0) += ms,
                _ => {}
            }
        }
        if let Some(g) = acc {
            out.push(g);
        }
        out
    }

    pub fn total_hold_ms(&self) -> u64 {
        self.calls
            .iter()
            .map(|c| match c {
                SignalCall::Hold(ms) => u64::from(*ms),
                _ => 0,
            })
            .sum()
    }

    /// Last level written to the key line (false if never written).
    pub fn key_is_down(&self) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                SignalCall::Key(k) => Some(*k),
                _ => None,
            })
            .unwrap_or(false)
    }

    pub fn led_is_lit(&self, which: Indicator) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                SignalCall::Led(i, lit) if *i == which => Some(*lit),
                _ => None,
            })
            .unwrap_or(false)
    }
}

impl SignalPort for MockKeyer {
    fn set_key(&mut self, keyed: bool) -> Result<(), SignalError> {
        if keyed {
            let n = self.key_downs;
            self.key_downs += 1;
            if self.fail_on_key_down == Some(n) {
                return Err(SignalError::GpioWriteFailed { gpio: 6, rc: -1 });
            }
        }
        self.calls.push(SignalCall::Key(keyed));
        Ok(())
    }

    fn set_indicator(&mut self, indicator: Indicator, lit: bool) -> Result<(), SignalError> {
        self.calls.push(SignalCall::Led(indicator, lit));
        Ok(())
    }

    fn hold(&mut self, ms: u32) {
        self.calls.push(SignalCall::Hold(ms));
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
