// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! File-backed snapshot cache for processed backend sets.
//!
//! A snapshot is the fully classified, fully described `BackendSet` for
//! one language, written as one file per cache key. Reading a snapshot
//! skips fetching and classification entirely, which is the whole point:
//! the index for a large manual is a multi-megabyte download that changes
//! rarely.
//!
//! Caching is a pure optimization and must never block a load. Every
//! failure mode on this path (missing file, unreadable file, corrupt
//! envelope, unparseable JSON, invariant-violating data, full disk) is
//! absorbed: reads degrade to a miss, writes to a no-op. The only trace
//! left behind is a `tracing` event.
//!
//! # Envelope
//!
//! ```text
//! shrike-cache v1 <crc32-of-body, 8 hex digits>\n
//! <CacheRecord as JSON>
//! ```
//!
//! The checksum line makes truncation and bit rot detectable before the
//! JSON parser sees the body. A snapshot that decodes but fails
//! `BackendSet::validate` is equally untrusted; both downgrade to a miss.

use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::types::BackendSet;

/// Snapshots older than two weeks are not trusted.
pub const FRESHNESS_WINDOW_MS: i64 = 14 * 24 * 60 * 60 * 1000;

const MAGIC: &str = "shrike-cache";
const ENVELOPE_VERSION: u32 = 1;

/// Cache key for a language's snapshot.
pub fn cache_key(language: &str) -> String {
    format!("search-{language}")
}

/// Current wall-clock time in epoch milliseconds.
pub fn now_ms() -> i64 {
    let elapsed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX)
}

/// A timestamped snapshot of all backends for one language.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheRecord {
    /// Write time, epoch milliseconds.
    pub time: i64,
    /// The processed backends, keyed by category tag on the wire.
    pub data: BackendSet,
}

impl CacheRecord {
    /// Freshness is re-checked on every read; nothing proactively expires
    /// stored records. A record exactly at the window boundary is stale.
    pub fn is_fresh(&self, now_ms: i64) -> bool {
        now_ms - FRESHNESS_WINDOW_MS < self.time
    }

    /// Age of this record in whole days at `now_ms`.
    pub fn age_days(&self, now_ms: i64) -> i64 {
        (now_ms - self.time) / (24 * 60 * 60 * 1000)
    }
}

/// One-file-per-key snapshot store rooted at a directory.
#[derive(Debug, Clone)]
pub struct CacheStore {
    root: PathBuf,
}

impl CacheStore {
    /// Open the per-user default cache location. Returns `None` when no
    /// usable cache directory exists in this environment; callers treat
    /// that as "caching unavailable" and carry on without it.
    pub fn open_default() -> Option<Self> {
        let dirs = directories::ProjectDirs::from("xyz", "harryzorus", "shrike")?;
        let store = CacheStore {
            root: dirs.cache_dir().to_path_buf(),
        };
        if !store.is_available() {
            debug!("cache root {} is not usable", store.root.display());
            return None;
        }
        Some(store)
    }

    /// Use an explicit root directory instead of the per-user default.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        CacheStore { root: root.into() }
    }

    /// True when the backing directory exists or can be created.
    pub fn is_available(&self) -> bool {
        fs::create_dir_all(&self.root).is_ok()
    }

    /// Read a snapshot. Any anomaly (absent file, corrupt envelope, parse
    /// failure, invariant violation) is a miss, never an error.
    pub fn read(&self, key: &str) -> Option<CacheRecord> {
        let path = self.path_for(key);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
            Err(e) => {
                debug!("cache read failed for {key}: {e}");
                return None;
            }
        };

        let Some((header, body)) = raw.split_once('\n') else {
            debug!("cache entry {key} has no envelope header");
            return None;
        };
        if !envelope_matches(header, body) {
            debug!("cache entry {key} failed envelope check");
            return None;
        }

        let record: CacheRecord = match serde_json::from_str(body) {
            Ok(record) => record,
            Err(e) => {
                debug!("cache entry {key} failed to parse: {e}");
                return None;
            }
        };
        if let Err(e) = record.data.validate() {
            debug!("cache entry {key} failed validation: {e}");
            return None;
        }

        Some(record)
    }

    /// Write a snapshot. Failures (quota, permissions, serialization) are
    /// swallowed; a warning is the only signal.
    pub fn write(&self, key: &str, data: &BackendSet, timestamp_ms: i64) {
        let record = CacheRecord {
            time: timestamp_ms,
            data: data.clone(),
        };
        if let Err(e) = self.try_write(key, &record) {
            warn!("cache write failed for {key}: {e}");
        }
    }

    /// Delete a snapshot, if present. Failures are swallowed.
    pub fn remove(&self, key: &str) {
        let _ = fs::remove_file(self.path_for(key));
    }

    fn try_write(&self, key: &str, record: &CacheRecord) -> io::Result<()> {
        fs::create_dir_all(&self.root)?;
        let body = serde_json::to_string(record).map_err(io::Error::from)?;
        let crc = crc32fast::hash(body.as_bytes());
        let envelope = format!("{MAGIC} v{ENVELOPE_VERSION} {crc:08x}\n{body}");
        fs::write(self.path_for(key), envelope)
    }

    fn path_for(&self, key: &str) -> PathBuf {
        // Keys come from CLI input; keep them filesystem-safe.
        let safe: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '-'
                }
            })
            .collect();
        self.root.join(format!("{safe}.json"))
    }
}

fn envelope_matches(header: &str, body: &str) -> bool {
    let mut parts = header.split(' ');
    let (Some(magic), Some(version), Some(crc_hex), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return false;
    };
    if magic != MAGIC || version != format!("v{ENVELOPE_VERSION}") {
        return false;
    }
    let Ok(expected) = u32::from_str_radix(crc_hex, 16) else {
        return false;
    };
    crc32fast::hash(body.as_bytes()) == expected
}
