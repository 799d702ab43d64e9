//! Morse transmission engine.
//!
//! Turns text into a sequence of [`Action`]s and plays them against a
//! [`SignalPort`].  The call blocks until the last hold has elapsed.
//!
//! ```text
//!  "SOS" ──▶ uppercase ──▶ CodeTable ──▶ Action stream ──▶ SignalPort
//!                                         Pulse(Dot)        key + LED A
//!                                         Pulse(Dash)       key + LED B
//!                                         Gap(..)           hold
//! ```

use log::{debug, warn};

use crate::app::ports::SignalPort;
use crate::error::SignalError;

use super::table::{CodeTable, Entry, Symbol};
use super::timing::{SpeedCell, SpeedReader, TimingProfile, Wpm};

/// Silence that follows a pulse or a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gap {
    /// Between symbols of one character.
    Element,
    /// After the last symbol of a character.
    Character,
    /// A space: word gap minus the character gap already sent.
    Word,
}

/// One timed step of a transmission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Pulse(Symbol),
    Gap(Gap),
}

impl TimingProfile {
    pub const fn duration_of(&self, action: Action) -> u32 {
        match action {
            Action::Pulse(symbol) => self.unit_ms * symbol.units(),
            Action::Gap(Gap::Element) => self.element_gap_ms,
            Action::Gap(Gap::Character) => self.char_gap_ms,
            Action::Gap(Gap::Word) => self.word_hold_ms(),
        }
    }
}

/// Result of a completed transmission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransmitSummary {
    pub wpm: Wpm,
    /// Keyed characters (spaces excluded).
    pub characters: usize,
    /// Characters absent from the table.
    pub skipped: usize,
    pub pulses: usize,
    /// Sum of every pulse and hold.
    pub duration_ms: u64,
}

#[derive(Default)]
struct Tally {
    characters: usize,
    skipped: usize,
    pulses: usize,
}

/// Walk `text` and hand every action to `step`, stopping at the first error.
fn walk<E>(
    table: &CodeTable,
    text: &str,
    mut step: impl FnMut(Action) -> Result<(), E>,
) -> Result<Tally, E> {
    let mut tally = Tally::default();
    for c in text.chars().flat_map(char::to_uppercase) {
        match table.lookup(c) {
            Some(Entry::WordGap) => step(Action::Gap(Gap::Word))?,
            Some(Entry::Code(code)) => {
                for symbol in code.symbols() {
                    step(Action::Pulse(symbol))?;
                    step(Action::Gap(Gap::Element))?;
                    tally.pulses += 1;
                }
                step(Action::Gap(Gap::Character))?;
                tally.characters += 1;
            }
            None => tally.skipped += 1,
        }
    }
    Ok(tally)
}

fn execute(port: &mut impl SignalPort, action: Action, ms: u32) -> Result<(), SignalError> {
    match action {
        Action::Pulse(symbol) => {
            let indicator = symbol.indicator();
            port.set_key(true)?;
            port.set_indicator(indicator, true)?;
            port.hold(ms);
            port.set_key(false)?;
            port.set_indicator(indicator, false)?;
        }
        Action::Gap(_) => port.hold(ms),
    }
    Ok(())
}

/// Owns the keying outputs and the current speed.
pub struct Engine<P: SignalPort> {
    table: &'static CodeTable,
    port: P,
    speed: SpeedCell,
}

impl<P: SignalPort> Engine<P> {
    pub fn new(table: &'static CodeTable, port: P, default_wpm: Wpm) -> Self {
        Self {
            table,
            port,
            speed: SpeedCell::new(default_wpm),
        }
    }

    /// Speed used by the last transmission (or the default).
    pub fn current_speed(&self) -> Wpm {
        self.speed.get()
    }

    /// Read handle for the request decoder's fallback speed.
    pub fn speed_reader(&self) -> SpeedReader {
        self.speed.reader()
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    /// Actions `text` would produce, without touching the outputs.
    pub fn plan(&self, text: &str) -> Vec<Action> {
        let mut actions = Vec::new();
        let _ = walk::<()>(self.table, text, |a| {
            actions.push(a);
            Ok(())
        });
        actions
    }

    /// Key `text` at `speed` WPM and return once it has been sent.
    ///
    /// A non-positive `speed` is ignored and the current speed is used.
    /// On an output failure every output is released before returning.
    pub fn transmit(&mut self, text: &str, speed: i32) -> Result<TransmitSummary, SignalError> {
        let wpm = self.resolve_speed(speed);
        let timing = TimingProfile::new(wpm);
        debug!("engine: '{}' at {} (unit={}ms)", text, wpm, timing.unit_ms);

        let mut duration_ms = 0u64;
        let port = &mut self.port;
        let result = walk(self.table, text, |action| {
            let ms = timing.duration_of(action);
            duration_ms += u64::from(ms);
            execute(port, action, ms)
        });

        match result {
            Ok(tally) => Ok(TransmitSummary {
                wpm,
                characters: tally.characters,
                skipped: tally.skipped,
                pulses: tally.pulses,
                duration_ms,
            }),
            Err(e) => {
                self.port.release();
                Err(e)
            }
        }
    }

    fn resolve_speed(&mut self, speed: i32) -> Wpm {
        match Wpm::new(speed) {
            Some(wpm) => {
                self.speed.set(wpm);
                wpm
            }
            None => {
                let current = self.speed.get();
                warn!("engine: rejected speed {}, keeping {}", speed, current);
                current
            }
        }
    }
}
