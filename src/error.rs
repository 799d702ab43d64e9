//! Error types shared across the keyer core and its adapters.
//!
//! Each variant is small and `Copy` where possible so it can be logged,
//! emitted as an event, and returned without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Signal (keying output) errors
// ---------------------------------------------------------------------------

/// A keying line or indicator write failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalError {
    /// `gpio_set_level` rejected the write.
    GpioWriteFailed { gpio: i32, rc: i32 },
}

impl fmt::Display for SignalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GpioWriteFailed { gpio, rc } => {
                write!(f, "GPIO{gpio} write failed (rc={rc})")
            }
        }
    }
}

impl std::error::Error for SignalError {}

// ---------------------------------------------------------------------------
// Network (HTTP socket) errors
// ---------------------------------------------------------------------------

/// Failures of the HTTP listener and its connections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetError {
    /// Could not bind the listening socket.
    Bind(std::io::ErrorKind),
    /// `accept()` failed.
    Accept(std::io::ErrorKind),
    /// Read or write on an accepted connection failed.
    Io(std::io::ErrorKind),
}

impl fmt::Display for NetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bind(kind) => write!(f, "bind failed: {kind}"),
            Self::Accept(kind) => write!(f, "accept failed: {kind}"),
            Self::Io(kind) => write!(f, "connection I/O failed: {kind}"),
        }
    }
}

impl std::error::Error for NetError {}

impl From<std::io::Error> for NetError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.kind())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_mentions_pin_and_code() {
        let e = SignalError::GpioWriteFailed { gpio: 6, rc: 258 };
        let s = e.to_string();
        assert!(s.contains("GPIO6"));
        assert!(s.contains("258"));
    }

    #[test]
    fn io_error_maps_to_kind() {
        let e: NetError = std::io::Error::from(std::io::ErrorKind::TimedOut).into();
        assert_eq!(e, NetError::Io(std::io::ErrorKind::TimedOut));
    }
}
