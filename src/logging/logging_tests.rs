//! Tests for logging initialization and the events the core emits.

use super::*;
use crate::provider::{DeferredDispatcher, MockCatalog};
use crate::state::{ManualClock, SearchController, SearchSettings};
use chrono::NaiveDate;
use serial_test::serial;
use std::fs;
use std::io;
use std::sync::{Arc, Mutex};

/// In-memory log sink.
#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<u8>>>);

impl Capture {
    fn contents(&self) -> String {
        let bytes = self.0.lock().unwrap();
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl io::Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn capture(filter: &str, body: impl FnOnce()) -> String {
    let sink = Capture::default();
    let writer = sink.clone();
    let subscriber = subscriber(move || writer.clone(), EnvFilter::new(filter));
    tracing::subscriber::with_default(subscriber, body);
    sink.contents()
}

// ===== init =====

#[test]
#[serial(tracing_init)]
fn init_creates_log_directory_if_missing() {
    let test_dir = std::env::temp_dir().join("scambo_test_logs_create");
    let log_file = test_dir.join("test.log");
    let _ = fs::remove_dir_all(&test_dir);

    // May fail with SubscriberAlreadySet; the directory is created first.
    let _ = init(&log_file);

    assert!(test_dir.exists(), "Log directory should be created: {:?}", test_dir);
    let _ = fs::remove_dir_all(&test_dir);
}

#[test]
#[serial(tracing_init)]
fn init_rejects_path_without_file_name() {
    assert!(matches!(
        init(Path::new("/")),
        Err(LoggingError::InvalidPath(_))
    ));
}

#[test]
#[serial(tracing_init)]
fn second_init_reports_subscriber_already_set() {
    let test_dir = std::env::temp_dir().join("scambo_test_logs_twice");
    let log_file = test_dir.join("twice.log");

    let _ = init(&log_file);
    assert!(matches!(
        init(&log_file),
        Err(LoggingError::SubscriberAlreadySet)
    ));
    let _ = fs::remove_dir_all(&test_dir);
}

// ===== Core events =====

#[test]
fn query_start_is_logged_at_info() {
    let output = capture("info", || {
        let mut ctrl = SearchController::new(
            DeferredDispatcher::new(),
            ManualClock::new(),
            SearchSettings::default(),
        );
        ctrl.on_mount();
    });
    assert!(output.contains("Starting query"), "got: {output}");
    assert!(output.contains("epoch=1"), "got: {output}");
}

#[test]
fn stale_discard_is_logged_at_debug_only() {
    let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
    let catalog = MockCatalog::seeded(today).unwrap();

    let run = |filter: &str| {
        let catalog = catalog.clone();
        capture(filter, move || {
            let mut ctrl = SearchController::new(
                DeferredDispatcher::new(),
                ManualClock::new(),
                SearchSettings::default(),
            );
            ctrl.on_mount();
            ctrl.on_submit();
            ctrl.dispatcher_mut().resolve_all(&catalog);
            ctrl.pump();
        })
    };

    assert!(run("debug").contains("Discarding stale response"));
    assert!(!run("info").contains("Discarding stale response"));
}

#[test]
fn provider_failure_is_logged_as_warning() {
    let output = capture("warn", || {
        let mut ctrl = SearchController::new(
            DeferredDispatcher::new(),
            ManualClock::new(),
            SearchSettings::default(),
        );
        ctrl.on_mount();
        ctrl.dispatcher_mut()
            .fail_oldest(crate::model::ProviderError::WorkerDisconnected);
        ctrl.pump();
    });
    assert!(output.contains("WARN"), "got: {output}");
    assert!(output.contains("Fetch failed"), "got: {output}");
}
