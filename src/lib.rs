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

//! Blslog forwards log records emitted through the [`log`] crate to Baidu
//! Cloud Log Service (BLS), one JSON-encoded push request per record.
//!
//! # Overview
//!
//! The appender is a thin adapter: for every emitted log line it builds a
//! small JSON document `{"level", "message", "logger"}`, wraps it with a
//! send-time timestamp into a log record, addresses it to a fixed
//! project/logstore pair, and submits it synchronously on the emitting
//! thread. There is no batching, queueing, retrying, or backpressure; a
//! failed push is reported through a [`Trap`] and the event is dropped.
//!
//! Configuration is resolved exactly once when the appender is built, from
//! an explicit [`BlsConfig`] or from the process environment, with
//! documented defaults for every key.
//!
//! # Examples
//!
//! ```no_run
//! use blslog::BlsAppender;
//! use blslog::BlsConfig;
//!
//! let appender = BlsAppender::builder()
//!     .config(BlsConfig::from_env())
//!     .build()
//!     .unwrap();
//! appender.start();
//! appender.install().unwrap();
//!
//! log::info!("This record is pushed to BLS.");
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

mod append;
mod client;
pub mod config;
mod error;
pub mod record;
mod sign;
mod sink;
mod trap;

pub use append::BlsAppender;
pub use append::BlsAppenderBuilder;
pub use client::BlsClient;
pub use config::BlsConfig;
pub use error::Error;
pub use sink::RecordSink;
pub use trap::DefaultTrap;
pub use trap::Trap;
