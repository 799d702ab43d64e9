//! Single-connection HTTP/1.1 server for the control page and `/send`.
//!
//! One request per connection, answered and closed.  Transmit commands
//! are handed to the [`TxQueue`] and acknowledged immediately, so the
//! page stays responsive while a message is being keyed.
//!
//! ```text
//! accept ─▶ read ≤1 KiB ─▶ decode ─┬─ FetchPage ─────────▶ 200 page
//!                                  ├─ Transmit("")  ─────▶ 200 OK
//!                                  └─ Transmit(msg) ─▶ submit ─┬─ 200 OK
//!                                                              └─ 503 BUSY
//! ```

use std::io::{self, Read, Write};
use std::net::{SocketAddr, TcpListener};
use std::time::Duration;

use log::{debug, info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;
use crate::app::worker::TxQueue;
use crate::error::NetError;
use crate::http::{self, Request, Response};
use crate::morse::SpeedReader;

/// Largest request the server reads.  Longer requests are truncated.
pub const REQUEST_BUF_LEN: usize = 1024;

/// What happened to one connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Command handed to the worker.
    Queued,
    /// Worker busy; client told so.
    Rejected,
    /// Command carried no message.
    Ignored,
    PageServed,
}

/// Read until the request is complete, the buffer is full, the peer
/// closes, or the read times out.  Returns the number of bytes read.
pub fn read_request<S: Read>(stream: &mut S, buf: &mut [u8]) -> io::Result<usize> {
    let mut len = 0;
    while len < buf.len() {
        match stream.read(&mut buf[len..]) {
            Ok(0) => break,
            Ok(n) => {
                len += n;
                if http::request_complete(&buf[..len]) {
                    break;
                }
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) if len > 0 => {
                debug!("HTTP: read stopped after {} bytes: {}", len, e);
                break;
            }
            Err(e) => return Err(e),
        }
    }
    Ok(len)
}

/// Serve one request on an accepted stream.
pub fn handle_connection<S: Read + Write>(
    stream: &mut S,
    queue: &TxQueue,
    speed: &SpeedReader,
    sink: &mut impl EventSink,
) -> io::Result<Outcome> {
    let mut buf = [0u8; REQUEST_BUF_LEN];
    let len = read_request(stream, &mut buf)?;

    let (response, outcome) = match http::decode(&buf[..len], speed.get()) {
        Request::FetchPage => {
            sink.emit(&AppEvent::PageServed);
            (Response::Page, Outcome::PageServed)
        }
        Request::Transmit(request) if request.is_empty() => {
            sink.emit(&AppEvent::EmptyCommand);
            (Response::Ack, Outcome::Ignored)
        }
        Request::Transmit(request) => {
            let message = request.message.clone();
            match queue.submit(request) {
                Ok(()) => (Response::Ack, Outcome::Queued),
                Err(e) => {
                    debug!("HTTP: submit refused: {}", e);
                    sink.emit(&AppEvent::CommandRejected { message });
                    (Response::Busy, Outcome::Rejected)
                }
            }
        }
    };

    response.write_to(stream)?;
    Ok(outcome)
}

pub struct HttpServer {
    listener: TcpListener,
    read_timeout: Duration,
}

impl HttpServer {
    /// Listen on every interface at `port` (0 picks a free one).
    pub fn bind(port: u16, read_timeout: Duration) -> Result<Self, NetError> {
        let listener =
            TcpListener::bind(("0.0.0.0", port)).map_err(|e| NetError::Bind(e.kind()))?;
        Ok(Self {
            listener,
            read_timeout,
        })
    }

    /// Wrap an already-bound listener.
    pub fn from_listener(listener: TcpListener, read_timeout: Duration) -> Self {
        Self {
            listener,
            read_timeout,
        }
    }

    pub fn local_addr(&self) -> Result<SocketAddr, NetError> {
        self.listener.local_addr().map_err(NetError::from)
    }

    /// Accept and serve exactly one connection.
    pub fn serve_one(
        &self,
        queue: &TxQueue,
        speed: &SpeedReader,
        sink: &mut impl EventSink,
    ) -> Result<Outcome, NetError> {
        let (mut stream, peer) = self
            .listener
            .accept()
            .map_err(|e| NetError::Accept(e.kind()))?;
        stream.set_read_timeout(Some(self.read_timeout))?;
        let outcome = handle_connection(&mut stream, queue, speed, sink)?;
        debug!("HTTP: {} -> {:?}", peer, outcome);
        Ok(outcome)
    }

    /// Serve until power-off.  Connection errors are logged and dropped.
    pub fn serve_forever(
        &self,
        queue: &TxQueue,
        speed: &SpeedReader,
        sink: &mut impl EventSink,
    ) -> ! {
        match self.local_addr() {
            Ok(addr) => info!("HTTP: listening on {}", addr),
            Err(e) => warn!("HTTP: listening (address unknown: {})", e),
        }
        loop {
            if let Err(e) = self.serve_one(queue, speed, sink) {
                warn!("HTTP: connection dropped: {}", e);
            }
        }
    }
}
