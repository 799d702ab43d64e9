//! Single transmit worker and its depth-1 command queue.
//!
//! ```text
//! ┌──────────────┐  submit()   ┌─────────┐  next()   ┌──────────────┐
//! │ HTTP server  │────────────▶│ TxQueue │──────────▶│    Worker    │
//! │ (serving)    │◀── Busy ────│ depth 1 │           │ Engine + I/O │
//! └──────────────┘             └─────────┘           └──────────────┘
//! ```
//!
//! The keying line is one physical resource, so exactly one command may
//! be outstanding: queued or being keyed.  Anything submitted in that
//! window is rejected rather than queued behind it.

use core::sync::atomic::{AtomicBool, Ordering};

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use log::{info, warn};

use super::commands::TransmissionRequest;
use super::events::AppEvent;
use super::ports::{EventSink, SignalPort};
use crate::morse::Engine;

/// Why [`TxQueue::submit`] refused a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitError {
    /// A transmission is queued or in progress.
    Busy,
}

impl core::fmt::Display for SubmitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Busy => write!(f, "keyer busy"),
        }
    }
}

impl std::error::Error for SubmitError {}

/// Hand-off between the serving loop and the worker.
pub struct TxQueue {
    channel: Channel<CriticalSectionRawMutex, TransmissionRequest, 1>,
    in_flight: AtomicBool,
}

/// The queue shared by the firmware's server and worker threads.
pub static TX_QUEUE: TxQueue = TxQueue::new();

impl Default for TxQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl TxQueue {
    pub const fn new() -> Self {
        Self {
            channel: Channel::new(),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Queue a command unless one is already outstanding.
    pub fn submit(&self, request: TransmissionRequest) -> Result<(), SubmitError> {
        if self.in_flight.swap(true, Ordering::AcqRel) {
            return Err(SubmitError::Busy);
        }
        if self.channel.try_send(request).is_err() {
            self.in_flight.store(false, Ordering::Release);
            return Err(SubmitError::Busy);
        }
        Ok(())
    }

    /// `true` from a successful submit until the worker finishes it.
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Wait for the next command.
    pub async fn next(&self) -> TransmissionRequest {
        self.channel.receive().await
    }

    pub fn try_next(&self) -> Option<TransmissionRequest> {
        self.channel.try_receive().ok()
    }

    fn complete(&self) {
        self.in_flight.store(false, Ordering::Release);
    }
}

/// Owns the engine; the only writer of the keying outputs.
pub struct Worker<P: SignalPort, S: EventSink> {
    engine: Engine<P>,
    sink: S,
}

impl<P: SignalPort, S: EventSink> Worker<P, S> {
    pub fn new(engine: Engine<P>, sink: S) -> Self {
        Self { engine, sink }
    }

    pub fn engine(&self) -> &Engine<P> {
        &self.engine
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Key one command to completion and emit its outcome.
    pub fn process(&mut self, request: &TransmissionRequest) {
        self.sink.emit(&AppEvent::TransmitStarted {
            message: request.message.clone(),
            speed: request.speed,
        });
        match self.engine.transmit(&request.message, request.speed) {
            Ok(summary) => {
                info!(
                    "worker: sent {} chars in {}ms at {}",
                    summary.characters, summary.duration_ms, summary.wpm
                );
                self.sink.emit(&AppEvent::TransmitFinished(summary));
            }
            Err(e) => {
                warn!("worker: transmission aborted: {}", e);
                self.sink.emit(&AppEvent::TransmitFailed(e));
            }
        }
    }

    /// Process a pending command, if any.  Returns whether one ran.
    pub fn poll(&mut self, queue: &TxQueue) -> bool {
        match queue.try_next() {
            Some(request) => {
                self.process(&request);
                queue.complete();
                true
            }
            None => false,
        }
    }

    /// Worker thread body.
    pub fn run(mut self, queue: &TxQueue) -> ! {
        info!("worker: ready at {}", self.engine.current_speed());
        loop {
            let request = futures_lite::future::block_on(queue.next());
            self.process(&request);
            queue.complete();
        }
    }
}
