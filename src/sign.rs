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

//! BCE `bce-auth-v1` request signing.
//!
//! A signature is an HMAC-SHA256 over a canonical rendition of the request,
//! keyed by an intermediate signing key derived from the secret key and the
//! signing timestamp.

use hmac::Hmac;
use hmac::Mac;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// How long a signature stays valid, in seconds.
const EXPIRATION_SECONDS: u32 = 1800;

/// Compute the `Authorization` header value for one request.
///
/// `timestamp` is the UTC signing time in `%Y-%m-%dT%H:%M:%SZ` form; it must
/// match the `x-bce-date` header sent with the request. `headers` lists the
/// headers included in the signature, unordered.
pub(crate) fn authorization(
    access_key: &str,
    secret_key: &str,
    method: &str,
    path: &str,
    query: &[(&str, &str)],
    headers: &[(&str, &str)],
    timestamp: &str,
) -> String {
    let prefix = format!("bce-auth-v1/{access_key}/{timestamp}/{EXPIRATION_SECONDS}");
    let signing_key = hmac_hex(secret_key.as_bytes(), prefix.as_bytes());

    let canonical_request = format!(
        "{}\n{}\n{}\n{}",
        method,
        uri_encode(path, false),
        canonical_query(query),
        canonical_headers(headers),
    );
    let signature = hmac_hex(signing_key.as_bytes(), canonical_request.as_bytes());

    let mut signed_headers = headers
        .iter()
        .map(|(name, _)| name.to_ascii_lowercase())
        .collect::<Vec<_>>();
    signed_headers.sort();

    format!("{prefix}/{}/{signature}", signed_headers.join(";"))
}

fn hmac_hex(key: &[u8], data: &[u8]) -> String {
    // HMAC-SHA256 accepts keys of any length.
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC accepts keys of any length");
    mac.update(data);
    hex::encode(mac.finalize().into_bytes())
}

fn canonical_query(query: &[(&str, &str)]) -> String {
    let mut pairs = query
        .iter()
        .map(|(key, value)| format!("{}={}", uri_encode(key, true), uri_encode(value, true)))
        .collect::<Vec<_>>();
    pairs.sort();
    pairs.join("&")
}

fn canonical_headers(headers: &[(&str, &str)]) -> String {
    let mut lines = headers
        .iter()
        .map(|(name, value)| {
            format!(
                "{}:{}",
                uri_encode(&name.to_ascii_lowercase(), true),
                uri_encode(value.trim(), true)
            )
        })
        .collect::<Vec<_>>();
    lines.sort();
    lines.join("\n")
}

/// Percent-encode a string per the BCE canonicalization rules.
///
/// Unreserved characters (alphanumerics, `-`, `_`, `.`, `~`) pass through;
/// everything else becomes an uppercase `%XX` escape. When `encode_slash`
/// is false, `/` also passes through (for URI paths).
pub(crate) fn uri_encode(input: &str, encode_slash: bool) -> String {
    let mut encoded = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                encoded.push(byte as char);
            }
            b'/' if !encode_slash => encoded.push('/'),
            _ => {
                encoded.push('%');
                encoded.push_str(&format!("{byte:02X}"));
            }
        }
    }
    encoded
}
