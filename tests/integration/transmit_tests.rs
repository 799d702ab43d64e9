//! End-to-end keying tests: worker + engine against the mock keyer.

use webkeyer::app::commands::TransmissionRequest;
use webkeyer::app::events::AppEvent;
use webkeyer::app::worker::{TxQueue, Worker};
use webkeyer::morse::{CodeTable, Engine, Indicator, Wpm};

use super::mock_hw::{MockKeyer, RecordingSink, SignalCall};

fn engine(port: MockKeyer) -> Engine<MockKeyer> {
    Engine::new(CodeTable::standard(), port, Wpm::new(20).unwrap())
}

#[test]
fn sos_at_20_wpm_has_exact_timing() {
    let mut e = engine(MockKeyer::new());
    let summary = e.transmit("SOS", 20).unwrap();

    let port = e.port();
    assert_eq!(
        port.key_down_durations(),
        vec![60, 60, 60, 180, 180, 180, 60, 60, 60]
    );
    assert_eq!(port.gaps(), vec![60, 60, 240, 60, 60, 240, 60, 60, 240]);
    assert_eq!(port.total_hold_ms(), 1980);
    assert_eq!(summary.duration_ms, 1980);
    assert_eq!(summary.characters, 3);
    assert_eq!(summary.pulses, 9);
}

#[test]
fn space_adds_word_hold_after_character_gap() {
    let mut e = engine(MockKeyer::new());
    e.transmit("A B", 20).unwrap();
    assert_eq!(e.port().gaps(), vec![60, 480, 60, 60, 60, 240]);
}

#[test]
fn dot_and_dash_light_their_own_indicator() {
    let mut e = engine(MockKeyer::new());
    e.transmit("A", 20).unwrap();
    let calls = &e.port().calls;
    assert_eq!(calls[1], SignalCall::Led(Indicator::Dot, true));
    assert!(calls.contains(&SignalCall::Led(Indicator::Dash, true)));
    assert!(!e.port().led_is_lit(Indicator::Dot));
    assert!(!e.port().led_is_lit(Indicator::Dash));
    assert!(!e.port().key_is_down());
}

#[test]
fn lowercase_keys_like_uppercase() {
    let mut lower = engine(MockKeyer::new());
    let mut upper = engine(MockKeyer::new());
    lower.transmit("cq de k", 25).unwrap();
    upper.transmit("CQ DE K", 25).unwrap();
    assert_eq!(lower.port().calls, upper.port().calls);
}

#[test]
fn unmapped_characters_are_silent() {
    let mut e = engine(MockKeyer::new());
    let summary = e.transmit("#@!", 20).unwrap();
    assert!(e.port().calls.is_empty());
    assert_eq!(summary.skipped, 3);
    assert_eq!(summary.pulses, 0);
}

#[test]
fn speed_persists_and_invalid_speed_is_ignored() {
    let mut e = engine(MockKeyer::new());
    let reader = e.speed_reader();
    e.transmit("E", 30).unwrap();
    assert_eq!(reader.get().get(), 30);

    let summary = e.transmit("E", 0).unwrap();
    assert_eq!(summary.wpm.get(), 30);
    assert_eq!(e.port().key_down_durations(), vec![40, 40]);
}

#[test]
fn output_failure_releases_everything() {
    let mut e = engine(MockKeyer::failing_on_key_down(1));
    assert!(e.transmit("EE", 20).is_err());
    assert!(!e.port().key_is_down());
    assert!(!e.port().led_is_lit(Indicator::Dot));
    assert_eq!(e.port().key_down_durations(), vec![60]);
}

#[test]
fn worker_drains_queue_and_reports() {
    let queue = TxQueue::new();
    let mut worker = Worker::new(engine(MockKeyer::new()), RecordingSink::default());

    queue.submit(TransmissionRequest::new("TEST", 20)).unwrap();
    assert!(worker.poll(&queue));
    assert!(!queue.is_busy());

    let events = &worker.sink().events;
    assert_eq!(events.len(), 2);
    match &events[1] {
        AppEvent::TransmitFinished(s) => assert_eq!(s.characters, 4),
        other => panic!("unexpected event {:?}", other),
    }
}

#[test]
fn worker_reports_failure_and_frees_queue() {
    let queue = TxQueue::new();
    let mut worker = Worker::new(
        engine(MockKeyer::failing_on_key_down(0)),
        RecordingSink::default(),
    );
    queue.submit(TransmissionRequest::new("K", 20)).unwrap();
    worker.poll(&queue);
    assert!(!queue.is_busy());
    assert!(matches!(
        worker.sink().events.last(),
        Some(AppEvent::TransmitFailed(_))
    ));
}
