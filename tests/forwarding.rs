// Copyright 2024 FastLabs Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use blslog::BlsAppender;
use blslog::BlsConfig;
use blslog::Error;
use blslog::RecordSink;
use blslog::Trap;
use blslog::record::LogType;
use blslog::record::PushLogRecordRequest;
use log::Level;

/// A sink that captures every submitted request, optionally failing after
/// the capture to simulate a transmission error.
#[derive(Debug, Default)]
struct CapturingSink {
    requests: Mutex<Vec<PushLogRecordRequest>>,
    fail: AtomicBool,
}

impl CapturingSink {
    fn requests(&self) -> Vec<PushLogRecordRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[derive(Debug, Clone, Default)]
struct SharedSink(Arc<CapturingSink>);

impl RecordSink for SharedSink {
    fn submit(&self, request: &PushLogRecordRequest) -> Result<(), Error> {
        self.0.requests.lock().unwrap().push(request.clone());
        if self.0.fail.load(Ordering::SeqCst) {
            return Err(Error::Transmission(anyhow::anyhow!(
                "simulated network error"
            )));
        }
        Ok(())
    }
}

/// A trap that counts how many errors it receives.
#[derive(Debug, Clone, Default)]
struct CountingTrap(Arc<AtomicUsize>);

impl Trap for CountingTrap {
    fn trap(&self, _err: &Error) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

fn test_config() -> BlsConfig {
    BlsConfig {
        endpoint: "test-endpoint.com".to_string(),
        logstore: "test-logstore".to_string(),
        project: "test-app".to_string(),
        access_key: "test-ak".to_string(),
        secret_key: "test-sk".to_string(),
    }
}

fn test_appender(sink: SharedSink, trap: CountingTrap) -> BlsAppender {
    let appender = BlsAppender::builder()
        .config(test_config())
        .sink(sink)
        .trap(trap)
        .build()
        .unwrap();
    appender.start();
    appender
}

fn emit(appender: &BlsAppender, level: Level, message: &str, logger: &str) {
    log::Log::log(
        appender,
        &log::Record::builder()
            .level(level)
            .target(logger)
            .args(format_args!("{message}"))
            .build(),
    );
}

#[test]
fn test_one_request_per_event() {
    let sink = SharedSink::default();
    let appender = test_appender(sink.clone(), CountingTrap::default());

    emit(&appender, Level::Info, "Test log message", "test.logger");

    let requests = sink.0.requests();
    assert_eq!(requests.len(), 1);

    let request = &requests[0];
    assert_eq!(request.project, "test-app");
    assert_eq!(request.logstore, "test-logstore");
    assert_eq!(request.log_type, LogType::Json);
    assert_eq!(request.log_stream_name, None);
    assert!(request.tags.is_none());
    assert_eq!(request.log_records.len(), 1);

    let content: serde_json::Value =
        serde_json::from_str(&request.log_records[0].message).unwrap();
    assert_eq!(
        content,
        serde_json::json!({
            "level": "INFO",
            "message": "Test log message",
            "logger": "test.logger",
        })
    );
}

#[test]
fn test_each_level_produces_an_independent_request() {
    let sink = SharedSink::default();
    let appender = test_appender(sink.clone(), CountingTrap::default());

    let levels = [Level::Debug, Level::Info, Level::Warn, Level::Error];
    for level in levels {
        emit(&appender, level, &format!("Test message for {level}"), "test.logger");
    }

    let requests = sink.0.requests();
    assert_eq!(requests.len(), 4);

    for (request, level) in requests.iter().zip(["DEBUG", "INFO", "WARN", "ERROR"]) {
        assert_eq!(request.log_records.len(), 1);
        let content: serde_json::Value =
            serde_json::from_str(&request.log_records[0].message).unwrap();
        assert_eq!(content["level"], level);
    }
}

#[test]
fn test_message_round_trips_non_ascii_and_markup() {
    let sink = SharedSink::default();
    let appender = test_appender(sink.clone(), CountingTrap::default());

    let message = "Warning message with special chars: 中文测试 & <script>";
    emit(&appender, Level::Warn, message, "com.test.SpecialLogger");

    let requests = sink.0.requests();
    let content: serde_json::Value =
        serde_json::from_str(&requests[0].log_records[0].message).unwrap();
    assert_eq!(content["level"], "WARN");
    assert_eq!(content["message"], message);
    assert_eq!(content["logger"], "com.test.SpecialLogger");
}

#[test]
fn test_empty_message_is_passed_through() {
    let sink = SharedSink::default();
    let appender = test_appender(sink.clone(), CountingTrap::default());

    emit(&appender, Level::Info, "", "test.logger");

    let requests = sink.0.requests();
    let content: serde_json::Value =
        serde_json::from_str(&requests[0].log_records[0].message).unwrap();
    assert_eq!(content["message"], "");
}

#[test]
fn test_timestamp_is_stamped_at_send_time() {
    let sink = SharedSink::default();
    let appender = test_appender(sink.clone(), CountingTrap::default());

    let before = jiff::Timestamp::now().as_millisecond();
    emit(&appender, Level::Info, "Timestamp test", "test.logger");
    let after = jiff::Timestamp::now().as_millisecond();

    let requests = sink.0.requests();
    let timestamp = requests[0].log_records[0].timestamp;
    assert!(
        (before..=after).contains(&timestamp),
        "timestamp {timestamp} outside [{before}, {after}]"
    );
}

#[test]
fn test_transmission_failure_is_trapped_not_propagated() {
    let sink = SharedSink::default();
    let trap = CountingTrap::default();
    let appender = test_appender(sink.clone(), trap.clone());

    sink.0.fail.store(true, Ordering::SeqCst);
    emit(&appender, Level::Error, "Test error message", "test.logger");

    // The request was still attempted before the simulated failure, and
    // exactly one error reached the trap.
    assert_eq!(sink.0.requests().len(), 1);
    assert_eq!(trap.0.load(Ordering::SeqCst), 1);

    // Subsequent events proceed normally.
    sink.0.fail.store(false, Ordering::SeqCst);
    emit(&appender, Level::Info, "after failure", "test.logger");
    assert_eq!(sink.0.requests().len(), 2);
    assert_eq!(trap.0.load(Ordering::SeqCst), 1);
}

#[test]
fn test_stopped_appender_ignores_events() {
    let sink = SharedSink::default();
    let appender = BlsAppender::builder()
        .config(test_config())
        .sink(sink.clone())
        .build()
        .unwrap();

    assert!(!appender.is_started());
    emit(&appender, Level::Info, "dropped", "test.logger");
    assert!(sink.0.requests().is_empty());

    appender.start();
    assert!(appender.is_started());
    emit(&appender, Level::Info, "accepted", "test.logger");
    assert_eq!(sink.0.requests().len(), 1);

    appender.stop();
    assert!(!appender.is_started());
    emit(&appender, Level::Info, "dropped again", "test.logger");
    assert_eq!(sink.0.requests().len(), 1);
}

#[test]
fn test_enabled_follows_lifecycle() {
    let sink = SharedSink::default();
    let appender = BlsAppender::builder()
        .config(test_config())
        .sink(sink)
        .build()
        .unwrap();

    let metadata = log::Metadata::builder()
        .level(Level::Info)
        .target("test.logger")
        .build();
    assert!(!log::Log::enabled(&appender, &metadata));

    appender.start();
    assert!(log::Log::enabled(&appender, &metadata));
}
