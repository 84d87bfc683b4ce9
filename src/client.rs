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

use jiff::Timestamp;

use crate::Error;
use crate::config::BlsConfig;
use crate::record::PushLogRecordRequest;
use crate::sign;
use crate::sink::RecordSink;

/// A client for the BLS push-log-record endpoint.
///
/// Construction is local and performs no network I/O; the first network
/// activity happens on the first submitted request. Submission blocks the
/// calling thread until the service responds. The client is safe to share
/// across threads.
///
/// # Examples
///
/// ```
/// use blslog::BlsClient;
/// use blslog::BlsConfig;
///
/// let client = BlsClient::new(&BlsConfig::default()).unwrap();
/// ```
#[derive(Debug)]
pub struct BlsClient {
    http: reqwest::blocking::Client,
    endpoint: String,
    access_key: String,
    secret_key: String,
}

impl BlsClient {
    /// Create a new client bound to the endpoint and credentials of the
    /// given configuration.
    ///
    /// # Errors
    ///
    /// Return an error if the underlying HTTP client cannot be constructed.
    pub fn new(config: &BlsConfig) -> Result<Self, Error> {
        let http = reqwest::blocking::Client::builder()
            .build()
            .map_err(|err| Error::Transmission(err.into()))?;

        Ok(Self {
            http,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            access_key: config.access_key.clone(),
            secret_key: config.secret_key.clone(),
        })
    }

    fn host(&self) -> &str {
        match self.endpoint.split_once("://") {
            Some((_, host)) => host,
            None => &self.endpoint,
        }
    }

    fn base_url(&self) -> String {
        if self.endpoint.contains("://") {
            self.endpoint.clone()
        } else {
            format!("https://{}", self.endpoint)
        }
    }
}

impl RecordSink for BlsClient {
    fn submit(&self, request: &PushLogRecordRequest) -> Result<(), Error> {
        let body = serde_json::to_vec(request)?;

        let path = format!("/v1/logstore/{}/logrecord", request.logstore);
        let date = Timestamp::now().strftime("%Y-%m-%dT%H:%M:%SZ").to_string();
        let authorization = sign::authorization(
            &self.access_key,
            &self.secret_key,
            "POST",
            &path,
            &[("project", request.project.as_str())],
            &[("host", self.host()), ("x-bce-date", date.as_str())],
            &date,
        );

        let url = format!(
            "{}{}?project={}",
            self.base_url(),
            sign::uri_encode(&path, false),
            sign::uri_encode(&request.project, true)
        );

        let response = self
            .http
            .post(url)
            .header("content-type", "application/json")
            .header("x-bce-date", date)
            .header("authorization", authorization)
            .body(body)
            .send()
            .map_err(|err| Error::Transmission(err.into()))?;

        response
            .error_for_status()
            .map_err(|err| Error::Transmission(err.into()))?;
        Ok(())
    }
}
