//! Outbound application events.
//!
//! The worker and the HTTP server emit these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them.

use crate::error::SignalError;
use crate::morse::{TransmitSummary, Wpm};

#[derive(Debug, Clone)]
pub enum AppEvent {
    /// The keyer is up and serving.
    Started { wpm: Wpm },

    /// A command was accepted for transmission.
    TransmitStarted { message: String, speed: i32 },

    /// The last symbol has been keyed.
    TransmitFinished(TransmitSummary),

    /// A keying output failed mid-message; outputs were released.
    TransmitFailed(SignalError),

    /// A command arrived while another was still being keyed.
    CommandRejected { message: String },

    /// A command carried no usable message.
    EmptyCommand,

    /// Any non-command request was answered with the control page.
    PageServed,
}
