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

/// The error type for failures on the append/push path.
///
/// Absent configuration is never an error: missing keys resolve to the
/// documented defaults. Both variants are caught at the [`log::Log`]
/// boundary and surfaced only through a [`Trap`](crate::Trap); they never
/// reach the application that emitted the log record.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Encoding the log content as JSON failed.
    #[error("failed to encode log content: {0}")]
    Serialization(#[from] serde_json::Error),
    /// Constructing the client or pushing the log record failed.
    #[error("failed to push log record: {0}")]
    Transmission(#[source] anyhow::Error),
}
