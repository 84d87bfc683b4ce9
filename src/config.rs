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

//! Configuration for the BLS appender.
//!
//! All five values are resolved exactly once, when the appender is built,
//! and are immutable afterwards. None of them is validated: malformed or
//! empty values are accepted silently and surface only as transmission
//! failures from the service.

/// Lookup key for the BLS endpoint.
pub const ENDPOINT_KEY: &str = "logging.bls.endpoint";
/// Lookup key for the logstore name.
pub const LOGSTORE_KEY: &str = "logging.bls.logstore";
/// Lookup key for the project name.
pub const PROJECT_KEY: &str = "spring.application.name";
/// Lookup key for the BCE access key.
pub const ACCESS_KEY_KEY: &str = "BAIDU_BCE_AK";
/// Lookup key for the BCE secret key.
pub const SECRET_KEY_KEY: &str = "BAIDU_BCE_SK";

const DEFAULT_ENDPOINT: &str = "bls-log.bj.baidubce.com";
const DEFAULT_LOGSTORE: &str = "oauth-app";
const DEFAULT_PROJECT: &str = "default";
const DEFAULT_ACCESS_KEY: &str = "default-ak";
const DEFAULT_SECRET_KEY: &str = "default-sk";

/// Configuration of a [`BlsAppender`](crate::BlsAppender).
///
/// # Examples
///
/// ```
/// use blslog::BlsConfig;
///
/// let config = BlsConfig {
///     project: "my-app".to_string(),
///     ..BlsConfig::default()
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlsConfig {
    /// Hostname of the BLS endpoint the records are pushed to.
    pub endpoint: String,
    /// Name of the logstore the records are appended to.
    pub logstore: String,
    /// Name of the project the logstore belongs to.
    pub project: String,
    /// BCE access key.
    pub access_key: String,
    /// BCE secret key.
    pub secret_key: String,
}

impl Default for BlsConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            logstore: DEFAULT_LOGSTORE.to_string(),
            project: DEFAULT_PROJECT.to_string(),
            access_key: DEFAULT_ACCESS_KEY.to_string(),
            secret_key: DEFAULT_SECRET_KEY.to_string(),
        }
    }
}

impl BlsConfig {
    /// Resolve the configuration from the process environment.
    ///
    /// The dotted keys are the host application's property names, retained
    /// verbatim and looked up in the environment map. Any absent key falls
    /// back to its documented default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve the configuration from a caller-supplied lookup.
    ///
    /// This is the seam that replaces ambient property reads: tests drive it
    /// with an in-memory map instead of mutating the process environment.
    ///
    /// # Examples
    ///
    /// ```
    /// use blslog::BlsConfig;
    ///
    /// let config = BlsConfig::from_lookup(|_| None);
    /// assert_eq!(config, BlsConfig::default());
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let resolve =
            |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Self {
            endpoint: resolve(ENDPOINT_KEY, DEFAULT_ENDPOINT),
            logstore: resolve(LOGSTORE_KEY, DEFAULT_LOGSTORE),
            project: resolve(PROJECT_KEY, DEFAULT_PROJECT),
            access_key: resolve(ACCESS_KEY_KEY, DEFAULT_ACCESS_KEY),
            secret_key: resolve(SECRET_KEY_KEY, DEFAULT_SECRET_KEY),
        }
    }
}
