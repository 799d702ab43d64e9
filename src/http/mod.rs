//! HTTP surface of the keyer: request classification, form decoding and
//! the fixed response set.  Socket handling lives in
//! [`adapters::http_server`](crate::adapters::http_server).

pub mod decoder;
pub mod percent;
pub mod response;

pub use decoder::{COMMAND_PATH, Request, decode, request_complete};
pub use response::Response;
