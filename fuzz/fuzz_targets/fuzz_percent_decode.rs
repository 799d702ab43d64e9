//! Fuzz target: `percent::decode_message`
//!
//! cargo fuzz run fuzz_percent_decode

#![no_main]

use critical_section as _;
use libfuzzer_sys::fuzz_target;
use webkeyer::http::percent::decode_message;

fuzz_target!(|data: &[u8]| {
    let input = String::from_utf8_lossy(data);
    let decoded = decode_message(&input);
    // Each escape or byte yields at most one replacement char.
    assert!(decoded.chars().count() <= input.chars().count());
});
