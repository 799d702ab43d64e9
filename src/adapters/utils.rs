//! Shared validation helpers for the adapter layer.

/// `true` if every byte of `s` is printable ASCII (`0x20..=0x7E`).
pub(super) fn is_printable_ascii(s: &str) -> bool {
    s.bytes().all(|b| (0x20..=0x7E).contains(&b))
}
