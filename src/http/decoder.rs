//! Request decoder.
//!
//! Classifies one raw HTTP request and, for a transmit command, pulls the
//! `message` and `speed` fields out of its form-encoded body.
//!
//! ```text
//! POST /send HTTP/1.1\r\n          ← request line: method + path
//! Content-Type: ...\r\n            ← headers (Content-Length honoured)
//! \r\n                             ← blank line
//! message=CQ+DE+K&speed=20         ← body: key=value pairs split on '&'
//! ```
//!
//! Every field fails independently.  A missing blank line means "no
//! message", a malformed pair is skipped, and a bad speed falls back to
//! the caller's current speed.  Nothing panics.

use log::debug;

use super::percent::{decode_message, truncate_at_apostrophe};
use crate::app::commands::TransmissionRequest;
use crate::morse::Wpm;

/// Path that carries transmit commands.
pub const COMMAND_PATH: &str = "/send";

const HEADER_END: &[u8] = b"\r\n\r\n";

/// What the server should do with a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Key the message (if non-empty).
    Transmit(TransmissionRequest),
    /// Anything else: answer with the control page.
    FetchPage,
}

/// Method and path of the request line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestLine<'a> {
    pub method: &'a str,
    /// Target with any query string removed.
    pub path: &'a str,
}

impl RequestLine<'_> {
    pub fn is_command(&self) -> bool {
        self.method == "POST" && self.path == COMMAND_PATH
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Parse the first line of `buf`.
pub fn parse_request_line(buf: &[u8]) -> Option<RequestLine<'_>> {
    let end = buf.iter().position(|&b| b == b'\n').unwrap_or(buf.len());
    let line = core::str::from_utf8(&buf[..end]).ok()?;
    let mut parts = line.trim_end_matches('\r').split_ascii_whitespace();
    let method = parts.next()?;
    let target = parts.next()?;
    let path = target.split('?').next().unwrap_or(target);
    Some(RequestLine { method, path })
}

/// Split at the blank line into `(head, body)`.
pub fn split_message(buf: &[u8]) -> Option<(&[u8], &[u8])> {
    let at = find(buf, HEADER_END)?;
    Some((&buf[..at], &buf[at + HEADER_END.len()..]))
}

/// Value of a `Content-Length` header, if present and numeric.
pub fn content_length(head: &[u8]) -> Option<usize> {
    String::from_utf8_lossy(head)
        .split("\r\n")
        .skip(1)
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse().ok())
}

/// Whether `buf` holds the whole request: headers terminated and, when
/// `Content-Length` is given, the full body received.
pub fn request_complete(buf: &[u8]) -> bool {
    match split_message(buf) {
        Some((head, body)) => content_length(head).is_none_or(|n| body.len() >= n),
        None => false,
    }
}

/// Decode one request.  `fallback` is used when the speed field is
/// absent or unusable.
pub fn decode(buf: &[u8], fallback: Wpm) -> Request {
    let fallback_speed = i32::try_from(fallback.get()).unwrap_or(i32::MAX);

    match parse_request_line(buf) {
        Some(line) if line.is_command() => {}
        _ => return Request::FetchPage,
    }

    let Some((head, body)) = split_message(buf) else {
        debug!("decoder: command without header terminator, ignoring body");
        return Request::Transmit(TransmissionRequest::new(String::new(), fallback_speed));
    };

    let body = match content_length(head) {
        Some(n) if n < body.len() => &body[..n],
        _ => body,
    };

    Request::Transmit(parse_form(&String::from_utf8_lossy(body), fallback_speed))
}

/// Extract `message` and `speed` from a form body.
pub fn parse_form(body: &str, fallback_speed: i32) -> TransmissionRequest {
    let mut request = TransmissionRequest::new(String::new(), fallback_speed);

    for pair in body.split('&') {
        let Some((key, value)) = pair.split_once('=') else {
            debug!("decoder: skipping pair without '='");
            continue;
        };
        match key {
            "message" => request.message = decode_message(value),
            "speed" => match parse_speed(value) {
                Some(wpm) => request.speed = wpm.get() as i32,
                None => debug!("decoder: unusable speed, keeping {}", request.speed),
            },
            _ => {}
        }
    }

    request
}

fn parse_speed(value: &str) -> Option<Wpm> {
    let n = truncate_at_apostrophe(value).trim().parse::<i32>().ok()?;
    Wpm::new(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wpm(v: i32) -> Wpm {
        Wpm::new(v).unwrap()
    }

    fn post(body: &str) -> Vec<u8> {
        format!(
            "POST /send HTTP/1.1\r\nHost: 192.168.71.1\r\n\
             Content-Type: application/x-www-form-urlencoded\r\n\r\n{body}"
        )
        .into_bytes()
    }

    fn transmit(buf: &[u8], fallback: i32) -> TransmissionRequest {
        match decode(buf, wpm(fallback)) {
            Request::Transmit(r) => r,
            Request::FetchPage => panic!("expected a transmit command"),
        }
    }

    #[test]
    fn decodes_message_and_speed() {
        let r = transmit(&post("message=CQ%20CQ+DE+BI1PRR&speed=25"), 20);
        assert_eq!(r.message, "CQ CQ DE BI1PRR");
        assert_eq!(r.speed, 25);
    }

    #[test]
    fn get_is_a_page_fetch() {
        assert_eq!(
            decode(b"GET / HTTP/1.1\r\n\r\n", wpm(20)),
            Request::FetchPage
        );
        assert_eq!(
            decode(b"GET /send HTTP/1.1\r\n\r\nmessage=SOS", wpm(20)),
            Request::FetchPage
        );
    }

    #[test]
    fn other_paths_and_garbage_are_page_fetches() {
        assert_eq!(decode(b"POST /sendx HTTP/1.1\r\n\r\n", wpm(20)), Request::FetchPage);
        assert_eq!(decode(b"", wpm(20)), Request::FetchPage);
        assert_eq!(decode(b"\xff\xfe\r\n\r\n", wpm(20)), Request::FetchPage);
        assert_eq!(decode(b"POST", wpm(20)), Request::FetchPage);
    }

    #[test]
    fn query_string_on_command_path_is_ignored() {
        let buf = b"POST /send?x=1 HTTP/1.1\r\n\r\nmessage=K";
        assert_eq!(transmit(buf, 20).message, "K");
    }

    #[test]
    fn missing_blank_line_means_no_message() {
        let r = transmit(b"POST /send HTTP/1.1\r\nHost: x\r\nmessage=SOS", 18);
        assert!(r.is_empty());
        assert_eq!(r.speed, 18);
    }

    #[test]
    fn bad_speed_falls_back() {
        assert_eq!(transmit(&post("message=E&speed=fast"), 22).speed, 22);
        assert_eq!(transmit(&post("message=E&speed=0"), 22).speed, 22);
        assert_eq!(transmit(&post("message=E&speed=-5"), 22).speed, 22);
        assert_eq!(transmit(&post("message=E"), 22).speed, 22);
    }

    #[test]
    fn speed_tolerates_whitespace_and_apostrophe() {
        assert_eq!(transmit(&post("message=E&speed= 30\r\n"), 20).speed, 30);
        assert_eq!(transmit(&post("message=E&speed=30'"), 20).speed, 30);
    }

    #[test]
    fn malformed_pairs_are_skipped() {
        let r = transmit(&post("junk&message=TEST&=&speed"), 20);
        assert_eq!(r.message, "TEST");
        assert_eq!(r.speed, 20);
    }

    #[test]
    fn value_may_contain_equals() {
        let r = transmit(&post("message=A=B&speed=20"), 20);
        assert_eq!(r.message, "A=B");
    }

    #[test]
    fn apostrophe_truncates_decoded_message() {
        let r = transmit(&post("message=HELLO'WORLD&speed=20"), 20);
        assert_eq!(r.message, "HELLO");
    }

    #[test]
    fn content_length_limits_body() {
        let buf = b"POST /send HTTP/1.1\r\ncontent-length: 9\r\n\r\nmessage=Kgarbage";
        assert_eq!(transmit(buf, 20).message, "K");
    }

    #[test]
    fn completeness_tracks_content_length() {
        assert!(!request_complete(b"GET / HTTP/1.1\r\nHost: x\r\n"));
        assert!(request_complete(b"GET / HTTP/1.1\r\n\r\n"));
        assert!(!request_complete(b"POST /send HTTP/1.1\r\nContent-Length: 10\r\n\r\nmessage"));
        assert!(request_complete(b"POST /send HTTP/1.1\r\nContent-Length: 9\r\n\r\nmessage=K"));
    }

    #[test]
    fn request_line_strips_query() {
        let line = parse_request_line(b"POST /send?a=b HTTP/1.1\r\n").unwrap();
        assert_eq!(line.method, "POST");
        assert_eq!(line.path, "/send");
        assert!(line.is_command());
    }
}
