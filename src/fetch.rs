// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! HTTP transport for the raw index and description documents.
//!
//! Two well-known per-language paths under the manual root:
//!
//! - `GET {base}/manual/{language}/search-index.json`: array of
//!   `[name, heading]` pairs
//! - `GET {base}/manual/{language}/search-description.json`: object
//!   mapping page id to description
//!
//! The client is blocking with a short request timeout. The timeout is a
//! hardening addition over the browser original, which would happily hang
//! in a loading state forever; a typeahead that appears after a minute
//! might as well not appear.

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::classify::RawIndexItem;

/// Timeout for a single document fetch.
const HTTP_TIMEOUT_SECS: u64 = 10;

/// Transport-level failure: the request didn't happen, came back non-2xx,
/// or the body wasn't the expected JSON shape.
#[derive(Debug)]
pub enum TransportError {
    /// Connection, TLS, timeout, or other client-side failure.
    Http(reqwest::Error),
    /// The server answered with a non-success status.
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    /// The body arrived but is not the document we asked for.
    Decode {
        url: String,
        source: serde_json::Error,
    },
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Http(e) => write!(f, "request failed: {e}"),
            TransportError::Status { url, status } => {
                write!(f, "{url} returned {status}")
            }
            TransportError::Decode { url, source } => {
                write!(f, "{url} returned malformed JSON: {source}")
            }
        }
    }
}

impl std::error::Error for TransportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TransportError::Http(e) => Some(e),
            TransportError::Status { .. } => None,
            TransportError::Decode { source, .. } => Some(source),
        }
    }
}

/// Blocking HTTP client bound to one documentation site.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    /// Build a transport for the given site root, e.g.
    /// `https://www.php.net`. A trailing slash is tolerated.
    pub fn new(base_url: impl Into<String>) -> Result<Self, TransportError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .user_agent(concat!("shrike/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(TransportError::Http)?;
        Ok(HttpTransport {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn index_url(&self, language: &str) -> String {
        format!("{}/manual/{}/search-index.json", self.base_url, language)
    }

    pub fn description_url(&self, language: &str) -> String {
        format!("{}/manual/{}/search-description.json", self.base_url, language)
    }

    /// Fetch the raw index document for a language.
    pub fn fetch_index(&self, language: &str) -> Result<Vec<RawIndexItem>, TransportError> {
        self.get_json(self.index_url(language))
    }

    /// Fetch the id → description document for a language.
    pub fn fetch_descriptions(
        &self,
        language: &str,
    ) -> Result<HashMap<String, String>, TransportError> {
        self.get_json(self.description_url(language))
    }

    fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T, TransportError> {
        let response = self.client.get(&url).send().map_err(TransportError::Http)?;
        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status { url, status });
        }
        let body = response.text().map_err(TransportError::Http)?;
        serde_json::from_str(&body).map_err(|source| TransportError::Decode { url, source })
    }
}
