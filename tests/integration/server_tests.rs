//! HTTP connection handling against in-memory and loopback streams.

use std::io::{self, Cursor, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::time::Duration;

use webkeyer::adapters::http_server::{HttpServer, Outcome, handle_connection};
use webkeyer::app::commands::TransmissionRequest;
use webkeyer::app::events::AppEvent;
use webkeyer::app::worker::TxQueue;
use webkeyer::morse::{CodeTable, Engine, SpeedReader, Wpm};

use super::mock_hw::{MockKeyer, RecordingSink};

/// Serves `chunks` one per `read` call and collects what is written.
struct FakeStream {
    chunks: Vec<Vec<u8>>,
    written: Vec<u8>,
}

impl FakeStream {
    fn new(request: &str) -> Self {
        Self::chunked(&[request])
    }

    fn chunked(parts: &[&str]) -> Self {
        Self {
            chunks: parts.iter().rev().map(|p| p.as_bytes().to_vec()).collect(),
            written: Vec::new(),
        }
    }

    fn response(&self) -> String {
        String::from_utf8_lossy(&self.written).into_owned()
    }
}

impl Read for FakeStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.chunks.pop() {
            Some(chunk) => Cursor::new(chunk).read(buf),
            None => Ok(0),
        }
    }
}

impl Write for FakeStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.written.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn speed(wpm: i32) -> SpeedReader {
    Engine::new(CodeTable::standard(), MockKeyer::new(), Wpm::new(wpm).unwrap()).speed_reader()
}

fn post(body: &str) -> String {
    format!(
        "POST /send HTTP/1.1\r\nContent-Type: application/x-www-form-urlencoded\r\n\
         Content-Length: {}\r\n\r\n{body}",
        body.len()
    )
}

#[test]
fn command_is_queued_and_acknowledged() {
    let queue = TxQueue::new();
    let mut sink = RecordingSink::default();
    let mut stream = FakeStream::new(&post("message=CQ+TEST&speed=25"));

    let outcome = handle_connection(&mut stream, &queue, &speed(20), &mut sink).unwrap();

    assert_eq!(outcome, Outcome::Queued);
    assert!(stream.response().starts_with("HTTP/1.1 200 OK"));
    assert!(stream.response().ends_with("OK"));
    assert_eq!(
        queue.try_next(),
        Some(TransmissionRequest::new("CQ TEST", 25))
    );
}

#[test]
fn missing_speed_uses_current_engine_speed() {
    let queue = TxQueue::new();
    let mut sink = RecordingSink::default();
    let mut stream = FakeStream::new(&post("message=K"));
    handle_connection(&mut stream, &queue, &speed(17), &mut sink).unwrap();
    assert_eq!(queue.try_next().map(|r| r.speed), Some(17));
}

#[test]
fn second_command_while_busy_gets_503() {
    let queue = TxQueue::new();
    let mut sink = RecordingSink::default();
    let reader = speed(20);

    let mut first = FakeStream::new(&post("message=SOS"));
    handle_connection(&mut first, &queue, &reader, &mut sink).unwrap();

    let mut second = FakeStream::new(&post("message=QRL%3F"));
    let outcome = handle_connection(&mut second, &queue, &reader, &mut sink).unwrap();

    assert_eq!(outcome, Outcome::Rejected);
    assert!(second.response().starts_with("HTTP/1.1 503"));
    assert!(second.response().ends_with("BUSY"));
    assert!(matches!(
        sink.events.last(),
        Some(AppEvent::CommandRejected { message }) if message == "QRL?"
    ));
}

#[test]
fn page_fetch_never_queues() {
    let queue = TxQueue::new();
    let mut sink = RecordingSink::default();
    let mut stream = FakeStream::new("GET / HTTP/1.1\r\nHost: 192.168.71.1\r\n\r\n");

    let outcome = handle_connection(&mut stream, &queue, &speed(20), &mut sink).unwrap();

    assert_eq!(outcome, Outcome::PageServed);
    assert!(!queue.is_busy());
    assert!(stream.response().contains("text/html"));
    assert!(stream.response().contains("<!DOCTYPE html>"));
}

#[test]
fn empty_message_is_acknowledged_but_not_queued() {
    let queue = TxQueue::new();
    let mut sink = RecordingSink::default();
    let mut stream = FakeStream::new(&post("message=&speed=20"));

    let outcome = handle_connection(&mut stream, &queue, &speed(20), &mut sink).unwrap();

    assert_eq!(outcome, Outcome::Ignored);
    assert!(!queue.is_busy());
    assert!(stream.response().ends_with("OK"));
    assert!(matches!(sink.events.last(), Some(AppEvent::EmptyCommand)));
}

#[test]
fn body_in_separate_segment_is_read() {
    let queue = TxQueue::new();
    let mut sink = RecordingSink::default();
    let mut stream = FakeStream::chunked(&[
        "POST /send HTTP/1.1\r\nContent-Length: 9\r\n\r\n",
        "message=R",
    ]);
    handle_connection(&mut stream, &queue, &speed(20), &mut sink).unwrap();
    assert_eq!(queue.try_next().map(|r| r.message), Some("R".to_string()));
}

#[test]
fn loopback_round_trip() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let server = HttpServer::from_listener(listener, Duration::from_millis(500));
    let addr = server.local_addr().unwrap();

    let client = std::thread::spawn(move || {
        let mut s = TcpStream::connect(addr).unwrap();
        s.write_all(post("message=73&speed=22").as_bytes()).unwrap();
        let mut reply = String::new();
        s.read_to_string(&mut reply).unwrap();
        reply
    });

    let queue = TxQueue::new();
    let mut sink = RecordingSink::default();
    let outcome = server.serve_one(&queue, &speed(20), &mut sink).unwrap();
    let reply = client.join().unwrap();

    assert_eq!(outcome, Outcome::Queued);
    assert!(reply.starts_with("HTTP/1.1 200 OK"));
    assert!(reply.contains("Connection: close"));
    assert_eq!(queue.try_next(), Some(TransmissionRequest::new("73", 22)));
}
