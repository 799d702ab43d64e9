//! Fixed set of responses the keyer sends.

use std::io::{self, Write};

/// Control page served for every non-command request.
pub const CONTROL_PAGE: &str = include_str!("../../assets/index.html");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response {
    /// Command accepted (or empty, nothing to key).
    Ack,
    /// Another transmission is still being keyed.
    Busy,
    /// The control page.
    Page,
}

impl Response {
    pub fn status(self) -> &'static str {
        match self {
            Self::Ack | Self::Page => "200 OK",
            Self::Busy => "503 Service Unavailable",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            Self::Ack | Self::Busy => "text/plain",
            Self::Page => "text/html; charset=utf-8",
        }
    }

    pub fn body(self) -> &'static str {
        match self {
            Self::Ack => "OK",
            Self::Busy => "BUSY",
            Self::Page => CONTROL_PAGE,
        }
    }

    /// Serialise status line, headers and body to `w`.
    pub fn write_to<W: Write>(self, w: &mut W) -> io::Result<()> {
        let body = self.body();
        write!(
            w,
            "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            self.status(),
            self.content_type(),
            body.len()
        )?;
        w.write_all(body.as_bytes())?;
        w.flush()
    }
}
