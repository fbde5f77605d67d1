//! Alert senders composed through the registry.

use sharpedge::adapter::outbound::alert::LogAlertSender;
use sharpedge::port::{AlertRegistry, AlertSender};
use sharpedge::testkit::alert::{FailingAlertSender, RecordingAlertSender};
use sharpedge::testkit::domain::opportunity;
use tokio_test::{assert_err, assert_ok, block_on};

#[test]
fn registry_with_log_and_recording_senders() {
    let recording = RecordingAlertSender::new();
    let mut registry = AlertRegistry::new();
    registry.register(Box::new(LogAlertSender));
    registry.register(Box::new(recording.clone()));

    assert_ok!(block_on(registry.send_alert(&opportunity())));
    assert_eq!(recording.sent()[0].book.as_str(), "fanduel");
}

#[test]
fn registry_reports_failure_after_delivering_to_others() {
    let recording = RecordingAlertSender::new();
    let failing = FailingAlertSender::new();
    let mut registry = AlertRegistry::new();
    registry.register(Box::new(recording.clone()));
    registry.register(Box::new(failing.clone()));
    registry.register(Box::new(FailingAlertSender::new()));

    assert_err!(block_on(registry.send_alert(&opportunity())));
    assert_eq!(recording.count(), 1);
    assert_eq!(failing.attempts(), 1);
}
