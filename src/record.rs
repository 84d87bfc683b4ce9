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

//! Wire-format types for the BLS push-log-record call.
//!
//! One request carries exactly one record, corresponding 1:1 to one log
//! event. All values are built fresh per append call and dropped after
//! submission.

use serde::Serialize;

/// The JSON document embedded in a [`LogRecord`] message.
///
/// An absent message serializes as an explicit `"message":null`; it is
/// never omitted.
#[derive(Debug, Clone, Serialize)]
pub struct LogContent {
    /// The log level in its display form, e.g. `"INFO"`.
    pub level: String,
    /// The formatted log message, passed through as-is.
    pub message: Option<String>,
    /// The name of the logger that emitted the event.
    pub logger: String,
}

/// A single log record as accepted by the BLS push endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct LogRecord {
    /// Epoch milliseconds, stamped at send time.
    pub timestamp: i64,
    /// The JSON-encoded [`LogContent`].
    pub message: String,
}

/// The declared format of the records in a push request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogType {
    /// Records are JSON documents.
    Json,
}

/// A tag attached to a push request.
#[derive(Debug, Clone, Serialize)]
pub struct LogTag {
    /// Tag name.
    pub key: String,
    /// Tag value.
    pub value: String,
}

/// A push request addressed to a fixed project/logstore pair.
///
/// `project` and `logstore` address the request (they travel in the URL,
/// not in the JSON body); absent optional fields are omitted from the body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PushLogRecordRequest {
    /// Name of the project the logstore belongs to.
    #[serde(skip)]
    pub project: String,
    /// Name of the logstore the records are appended to.
    #[serde(skip)]
    pub logstore: String,
    /// Name of the log stream; this appender never sets one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_stream_name: Option<String>,
    /// Format of the records; always [`LogType::Json`] here.
    #[serde(rename = "type")]
    pub log_type: LogType,
    /// The records to append; always exactly one here.
    pub log_records: Vec<LogRecord>,
    /// Tags attached to the request; this appender never sets any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<LogTag>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_message_encodes_as_explicit_null() {
        let content = LogContent {
            level: "INFO".to_string(),
            message: None,
            logger: "test.logger".to_string(),
        };

        let encoded = serde_json::to_string(&content).unwrap();
        assert_eq!(encoded, r#"{"level":"INFO","message":null,"logger":"test.logger"}"#);
    }

    #[test]
    fn test_log_type_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&LogType::Json).unwrap(), r#""JSON""#);
    }

    #[test]
    fn test_request_body_excludes_addressing_and_absent_fields() {
        let request = PushLogRecordRequest {
            project: "p".to_string(),
            logstore: "s".to_string(),
            log_stream_name: None,
            log_type: LogType::Json,
            log_records: vec![LogRecord {
                timestamp: 42,
                message: "{}".to_string(),
            }],
            tags: None,
        };

        let body = serde_json::to_value(&request).unwrap();
        let object = body.as_object().unwrap();
        assert_eq!(object.len(), 2);
        assert_eq!(body["type"], "JSON");
        assert_eq!(body["logRecords"][0]["timestamp"], 42);
        assert_eq!(body["logRecords"][0]["message"], "{}");
    }
}
