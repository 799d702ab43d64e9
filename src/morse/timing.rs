//! Keying speed and the timing profile derived from it.
//!
//! All durations are whole milliseconds on the PARIS standard:
//!
//! ```text
//! unit          = 1200 / wpm
//! dot           = 1 unit     element gap   = 1 unit
//! dash          = 3 units    character gap = 3 units
//!                            word gap      = 7 units
//! ```

use core::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use super::table::Symbol;

/// Milliseconds per unit at 1 WPM.
const PARIS_MS: u32 = 1200;

/// A keying speed in words per minute.  Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Wpm(u32);

impl Wpm {
    /// Speed used when nothing else is configured.
    pub const DEFAULT: Self = Self(20);

    /// Returns `None` for `value <= 0`.
    pub const fn new(value: i32) -> Option<Self> {
        if value > 0 {
            Some(Self(value as u32))
        } else {
            None
        }
    }

    pub const fn get(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for Wpm {
    type Error = ();

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        if value == 0 { Err(()) } else { Ok(Self(value)) }
    }
}

impl core::fmt::Display for Wpm {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} WPM", self.0)
    }
}

/// Per-transmission durations in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingProfile {
    pub unit_ms: u32,
    pub dot_ms: u32,
    pub dash_ms: u32,
    pub element_gap_ms: u32,
    pub char_gap_ms: u32,
    pub word_gap_ms: u32,
}

impl TimingProfile {
    pub const fn new(wpm: Wpm) -> Self {
        let unit = PARIS_MS / wpm.get();
        Self {
            unit_ms: unit,
            dot_ms: unit * Symbol::Dot.units(),
            dash_ms: unit * Symbol::Dash.units(),
            element_gap_ms: unit,
            char_gap_ms: unit * 3,
            word_gap_ms: unit * 7,
        }
    }

    /// Extra hold for a space.  The preceding character already ended
    /// with a character gap, so only the remainder of the word gap is
    /// added.
    pub const fn word_hold_ms(&self) -> u32 {
        self.word_gap_ms - self.char_gap_ms
    }
}

// ───────────────────────────────────────────────────────────────
// Current speed cell
// ───────────────────────────────────────────────────────────────

/// The last good speed.  Written by the engine only; readers get a
/// [`SpeedReader`].
#[derive(Debug)]
pub struct SpeedCell(Arc<AtomicU32>);

impl SpeedCell {
    pub fn new(initial: Wpm) -> Self {
        Self(Arc::new(AtomicU32::new(initial.get())))
    }

    pub fn get(&self) -> Wpm {
        Wpm(self.0.load(Ordering::Acquire))
    }

    pub(crate) fn set(&self, wpm: Wpm) {
        self.0.store(wpm.get(), Ordering::Release);
    }

    pub fn reader(&self) -> SpeedReader {
        SpeedReader(Arc::clone(&self.0))
    }
}

/// Read-only view of a [`SpeedCell`], safe to hand to other threads.
#[derive(Debug, Clone)]
pub struct SpeedReader(Arc<AtomicU32>);

impl SpeedReader {
    pub fn get(&self) -> Wpm {
        Wpm(self.0.load(Ordering::Acquire))
    }
}
