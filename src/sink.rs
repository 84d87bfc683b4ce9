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

use std::fmt;

use crate::Error;
use crate::record::PushLogRecordRequest;

/// A trait for submitting push requests to a log-record store.
///
/// This is the seam between the appender and the transport: production
/// injects a [`BlsClient`](crate::BlsClient), tests inject a capturing
/// fake. Implementations may block the calling thread on network I/O;
/// thread safety is their own concern.
pub trait RecordSink: fmt::Debug + Send + Sync + 'static {
    /// Submit one push request for transmission.
    fn submit(&self, request: &PushLogRecordRequest) -> Result<(), Error>;
}

impl<T: RecordSink> From<T> for Box<dyn RecordSink> {
    fn from(sink: T) -> Self {
        Box::new(sink)
    }
}
