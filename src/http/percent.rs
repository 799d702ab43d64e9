//! `application/x-www-form-urlencoded` value decoding.
//!
//! Lenient by construction: a malformed escape is kept as a literal `%`
//! and scanning carries on with the next character.  Nothing here can
//! fail.

/// Decode `+` and `%XY` escapes.  Bytes that do not form valid UTF-8 are
/// replaced with U+FFFD.
pub fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' => match escape_at(bytes, i) {
                Some(byte) => {
                    out.push(byte);
                    i += 3;
                }
                None => {
                    out.push(b'%');
                    i += 1;
                }
            },
            b => {
                out.push(b);
                i += 1;
            }
        }
    }

    String::from_utf8_lossy(&out).into_owned()
}

/// The byte encoded by `%XY` at `i`, if two hex digits follow.
fn escape_at(bytes: &[u8], i: usize) -> Option<u8> {
    let hi = hex_value(*bytes.get(i + 1)?)?;
    let lo = hex_value(*bytes.get(i + 2)?)?;
    Some((hi << 4) | lo)
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

/// Everything before the first apostrophe.
pub fn truncate_at_apostrophe(s: &str) -> &str {
    s.split('\'').next().unwrap_or("")
}

/// Decode a `message` field value: percent-decode, then cut at the first
/// apostrophe (including one produced by `%27`).
pub fn decode_message(value: &str) -> String {
    let mut decoded = percent_decode(value);
    if let Some(pos) = decoded.find('\'') {
        decoded.truncate(pos);
    }
    decoded
}
