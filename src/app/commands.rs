//! Inbound transmit commands.
//!
//! Produced by the request decoder, consumed by the
//! [`Worker`](super::worker::Worker).  Never persisted.

/// Text to key and the speed to key it at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransmissionRequest {
    pub message: String,
    /// Words per minute.  Validated again by the engine.
    pub speed: i32,
}

impl TransmissionRequest {
    pub fn new(message: impl Into<String>, speed: i32) -> Self {
        Self {
            message: message.into(),
            speed,
        }
    }

    /// A request with nothing to send triggers no transmission.
    pub fn is_empty(&self) -> bool {
        self.message.is_empty()
    }
}
