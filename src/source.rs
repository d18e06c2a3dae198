//! Byte-source collaborators: where raw image bytes come from.
//!
//! The loader only knows the [`ByteSource`] trait; the default implementation
//! fetches over HTTP, and `StaticSource` serves fixed byte maps for tests and
//! offline use.

use std::collections::HashMap;

use crate::{Error, Result};

/// A source of raw image bytes, addressed by opaque string identifiers.
///
/// Implementations are expected to enforce their own timeout; the loader
/// propagates a timed-out fetch as `SourceUnavailable` rather than waiting
/// forever. Retry policy, if any, lives in the implementation — the loader
/// never retries.
pub trait ByteSource: Send + Sync {
    /// Retrieve the raw bytes behind `identifier`.
    fn fetch(&self, identifier: &str) -> Result<Vec<u8>>;
}

/// HTTP byte-source backed by a shared blocking client.
#[cfg(feature = "http")]
pub struct HttpSource {
    client: reqwest::blocking::Client,
}

#[cfg(feature = "http")]
impl HttpSource {
    /// Build a source with the given user agent and per-request timeout.
    pub fn new(user_agent: &str, timeout_ms: u64) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(user_agent)
            .timeout(std::time::Duration::from_millis(timeout_ms))
            .build()
            .map_err(|e| Error::InitializationError(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

#[cfg(feature = "http")]
impl ByteSource for HttpSource {
    fn fetch(&self, identifier: &str) -> Result<Vec<u8>> {
        let unavailable = |reason: String| Error::SourceUnavailable {
            identifier: identifier.to_string(),
            reason,
        };

        let resp = self
            .client
            .get(identifier)
            .send()
            .map_err(|e| unavailable(format!("HTTP GET failed: {}", e)))?;

        if !resp.status().is_success() {
            return Err(unavailable(format!("HTTP status {}", resp.status())));
        }

        let bytes = resp
            .bytes()
            .map_err(|e| unavailable(format!("failed to read response body: {}", e)))?;
        Ok(bytes.to_vec())
    }
}

/// A fixed, in-memory byte-source.
///
/// Useful for tests and for batch runs over already-loaded bytes. Unknown
/// identifiers fail with `SourceUnavailable`, same as a dead URL would.
#[derive(Default)]
pub struct StaticSource {
    entries: HashMap<String, Vec<u8>>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `bytes` under `identifier`, replacing any previous entry.
    pub fn insert(&mut self, identifier: impl Into<String>, bytes: Vec<u8>) {
        self.entries.insert(identifier.into(), bytes);
    }
}

impl ByteSource for StaticSource {
    fn fetch(&self, identifier: &str) -> Result<Vec<u8>> {
        self.entries
            .get(identifier)
            .cloned()
            .ok_or_else(|| Error::SourceUnavailable {
                identifier: identifier.to_string(),
                reason: "no such entry".to_string(),
            })
    }
}
