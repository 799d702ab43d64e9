//! Application core: transmit commands, events, ports and the worker.
//!
//! The [`worker`](worker::Worker) is the only owner of the keying
//! outputs.  Everything that talks to hardware goes through the port
//! traits in [`ports`], so the core is testable without real peripherals.

pub mod commands;
pub mod events;
pub mod ports;
pub mod worker;
