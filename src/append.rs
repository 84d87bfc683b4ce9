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

use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

use jiff::Timestamp;

use crate::Error;
use crate::client::BlsClient;
use crate::config::BlsConfig;
use crate::record::LogContent;
use crate::record::LogRecord;
use crate::record::LogType;
use crate::record::PushLogRecordRequest;
use crate::sink::RecordSink;
use crate::trap::DefaultTrap;
use crate::trap::Trap;

/// A builder to configure and create a [`BlsAppender`].
#[derive(Debug)]
pub struct BlsAppenderBuilder {
    config: Option<BlsConfig>,
    sink: Option<Box<dyn RecordSink>>,
    trap: Box<dyn Trap>,
}

impl BlsAppenderBuilder {
    /// Set the configuration.
    ///
    /// Default to [`BlsConfig::from_env`], resolved when the appender is
    /// built.
    ///
    /// # Examples
    ///
    /// ```
    /// use blslog::BlsAppender;
    /// use blslog::BlsConfig;
    ///
    /// let builder = BlsAppender::builder().config(BlsConfig::default());
    /// ```
    pub fn config(mut self, config: BlsConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the sink the push requests are submitted to.
    ///
    /// Default to a [`BlsClient`] constructed from the configuration. Tests
    /// inject a capturing fake here instead.
    pub fn sink(mut self, sink: impl Into<Box<dyn RecordSink>>) -> Self {
        self.sink = Some(sink.into());
        self
    }

    /// Set the trap for handling errors during forwarding.
    ///
    /// Default to [`DefaultTrap`].
    ///
    /// # Examples
    ///
    /// ```
    /// use blslog::BlsAppender;
    /// use blslog::DefaultTrap;
    ///
    /// let builder = BlsAppender::builder().trap(DefaultTrap::default());
    /// ```
    pub fn trap(mut self, trap: impl Into<Box<dyn Trap>>) -> Self {
        self.trap = trap.into();
        self
    }

    /// Build the [`BlsAppender`].
    ///
    /// Configuration is resolved exactly once here, and the client handle is
    /// constructed here; no network I/O happens until the first event is
    /// forwarded. The appender starts in the stopped state.
    ///
    /// # Errors
    ///
    /// Return an error if no sink is injected and the default client cannot
    /// be constructed.
    pub fn build(self) -> Result<BlsAppender, Error> {
        let config = self.config.unwrap_or_else(BlsConfig::from_env);
        let sink = match self.sink {
            Some(sink) => sink,
            None => Box::new(BlsClient::new(&config)?),
        };

        Ok(BlsAppender {
            project: config.project,
            logstore: config.logstore,
            sink,
            trap: self.trap,
            started: AtomicBool::new(false),
        })
    }
}

/// An appender that forwards every log record to BLS, one push request per
/// record.
///
/// The appender has exactly two states: stopped (initial, events are
/// ignored) and started. Forwarding happens synchronously on the emitting
/// thread; there is no buffering, batching, or retrying. A failure while
/// forwarding is reported through the configured [`Trap`] and never reaches
/// the caller.
///
/// # Examples
///
/// ```no_run
/// use blslog::BlsAppender;
///
/// let appender = BlsAppender::builder().build().unwrap();
/// appender.start();
/// appender.install().unwrap();
///
/// log::info!("forwarded to BLS");
/// ```
#[derive(Debug)]
pub struct BlsAppender {
    project: String,
    logstore: String,
    sink: Box<dyn RecordSink>,
    trap: Box<dyn Trap>,
    started: AtomicBool,
}

impl BlsAppender {
    /// Create a new [`BlsAppenderBuilder`].
    ///
    /// # Examples
    ///
    /// ```
    /// use blslog::BlsAppender;
    ///
    /// let builder = BlsAppender::builder();
    /// ```
    pub fn builder() -> BlsAppenderBuilder {
        BlsAppenderBuilder {
            config: None,
            sink: None,
            trap: Box::new(DefaultTrap::default()),
        }
    }

    /// Transition the appender from stopped to started.
    pub fn start(&self) {
        self.started.store(true, Ordering::Release);
    }

    /// Transition the appender from started to stopped.
    ///
    /// A stopped appender ignores events until started again.
    pub fn stop(&self) {
        self.started.store(false, Ordering::Release);
    }

    /// Whether the appender currently accepts events.
    pub fn is_started(&self) -> bool {
        self.started.load(Ordering::Acquire)
    }

    /// Forward one log record as a single push request.
    ///
    /// The record timestamp is stamped at send time, not at the event's own
    /// occurrence time; under a host that buffers events the two can drift
    /// apart.
    ///
    /// # Errors
    ///
    /// Return an error if encoding the content or submitting the request
    /// fails. The [`log::Log`] implementation catches this error and routes
    /// it to the trap; callers going through the `log` facade never see it.
    pub fn append(&self, record: &log::Record) -> Result<(), Error> {
        let timestamp = Timestamp::now().as_millisecond();

        let content = LogContent {
            level: record.level().to_string(),
            message: Some(record.args().to_string()),
            logger: record.target().to_string(),
        };
        let message = serde_json::to_string(&content)?;

        let request = PushLogRecordRequest {
            project: self.project.clone(),
            logstore: self.logstore.clone(),
            log_stream_name: None,
            log_type: LogType::Json,
            log_records: vec![LogRecord { timestamp, message }],
            tags: None,
        };

        self.sink.submit(&request)
    }

    /// Install the appender as the global logger for the `log` facade.
    ///
    /// # Errors
    ///
    /// Return an error if a global logger is already installed.
    pub fn install(self) -> Result<(), log::SetLoggerError> {
        log::set_max_level(log::LevelFilter::Trace);
        log::set_boxed_logger(Box::new(self))
    }
}

impl log::Log for BlsAppender {
    fn enabled(&self, _metadata: &log::Metadata) -> bool {
        self.is_started()
    }

    fn log(&self, record: &log::Record) {
        if !self.is_started() {
            return;
        }
        if let Err(err) = self.append(record) {
            self.trap.trap(&err);
        }
    }

    fn flush(&self) {}
}
