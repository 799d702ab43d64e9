//! Morse code generation: code table, timing, and the transmission engine.

pub mod engine;
pub mod table;
pub mod timing;

pub use engine::{Action, Engine, Gap, TransmitSummary};
pub use table::{CodeTable, Indicator, Symbol};
pub use timing::{SpeedReader, TimingProfile, Wpm};
