//! Fuzz target: `http::decode`
//!
//! Drives arbitrary bytes through the request decoder and asserts that
//! it never panics and never yields a non-positive speed or a message
//! containing an apostrophe.
//!
//! cargo fuzz run fuzz_request_decoder

#![no_main]

use critical_section as _;
use libfuzzer_sys::fuzz_target;
use webkeyer::http::{Request, decode, request_complete};
use webkeyer::morse::Wpm;

fuzz_target!(|data: &[u8]| {
    let _ = request_complete(data);
    if let Request::Transmit(t) = decode(data, Wpm::DEFAULT) {
        assert!(t.speed > 0, "speed must stay positive");
        assert!(!t.message.contains('\''), "message must stop at apostrophe");
    }
});
