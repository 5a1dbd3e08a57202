// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Cache-or-fetch orchestration with language fallback.
//!
//! A load is a short, fixed sequence:
//!
//! ```text
//! CacheCheck ──hit──────────────────────────────▶ Done
//!     │ miss
//!     ▼
//! FetchIndex ──failure──▶ Fallback (once, to the default language)
//!     │ success
//!     ▼
//! FetchDescriptions ──failure──▶ Done (undescribed, uncached)
//!     │ success
//!     ▼
//! Classify → Merge → CacheWrite ────────────────▶ Done
//! ```
//!
//! The fallback is a single hop: a missing translation retries against the
//! default language, and if that fails too the caller gets the default
//! language's error. Nothing cascades further. A description failure never
//! fails the load; classified-but-undescribed results beat no results, they
//! just aren't worth caching.

use std::fmt;

use tracing::debug;

use crate::cache::{cache_key, now_ms, CacheStore};
use crate::classify::classify_index;
use crate::describe::merge_descriptions;
use crate::fetch::{HttpTransport, TransportError};
use crate::types::{BackendSet, Category, RankedCategory};

/// Language retried when the requested one cannot be fetched.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Default per-category display limit.
pub const DEFAULT_LIMIT: usize = 10;

/// Options for a load: which language, and how many entries per category
/// the collaborator will show before needing a "more results" affordance.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    pub language: String,
    pub limit: usize,
}

impl Default for LoadOptions {
    fn default() -> Self {
        LoadOptions {
            language: DEFAULT_LANGUAGE.to_string(),
            limit: DEFAULT_LIMIT,
        }
    }
}

/// A successful load: the processed backends plus how they were produced.
#[derive(Debug)]
pub struct LoadOutcome {
    /// The language that actually resolved; differs from the requested one
    /// after a fallback hop.
    pub language: String,
    pub backends: BackendSet,
    /// True when the backends were rebuilt from a fresh cache snapshot.
    pub from_cache: bool,
    /// False when the description fetch failed and entries carry no
    /// descriptions. Cached snapshots are always described, since only
    /// fully merged sets are written.
    pub described: bool,
}

impl LoadOutcome {
    /// The collaborator-facing shape: per category, ranked entries
    /// truncated to `limit`, with untruncated totals alongside.
    pub fn ranked(&self, limit: usize) -> Vec<(Category, RankedCategory)> {
        self.backends.ranked(limit)
    }
}

/// Terminal failure: the requested language and the default language both
/// failed to fetch. Carries the default language's transport error.
#[derive(Debug)]
pub struct LoadError {
    /// The language whose failure ended the sequence.
    pub language: String,
    pub source: TransportError,
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "failed to load search index for '{}': {}",
            self.language, self.source
        )
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// Orchestrates cache lookup, fetching, classification, description merge
/// and cache write-back for one documentation site.
pub struct LanguageLoader {
    transport: HttpTransport,
    cache: Option<CacheStore>,
}

impl LanguageLoader {
    /// `cache: None` disables snapshotting entirely; loads still work,
    /// they just refetch every time.
    pub fn new(transport: HttpTransport, cache: Option<CacheStore>) -> Self {
        LanguageLoader { transport, cache }
    }

    /// Load using an options bundle; `options.limit` is applied later by
    /// [`LoadOutcome::ranked`].
    pub fn load_with(&self, options: &LoadOptions) -> Result<LoadOutcome, LoadError> {
        self.load(&options.language)
    }

    /// Load the backends for `language`, falling back to
    /// [`DEFAULT_LANGUAGE`] once if its index cannot be fetched.
    pub fn load(&self, language: &str) -> Result<LoadOutcome, LoadError> {
        match self.load_language(language) {
            Ok(outcome) => Ok(outcome),
            Err(first) if language != DEFAULT_LANGUAGE => {
                debug!(
                    "index fetch failed for '{language}', retrying '{DEFAULT_LANGUAGE}': {}",
                    first.source
                );
                self.load_language(DEFAULT_LANGUAGE)
            }
            Err(terminal) => Err(terminal),
        }
    }

    /// One full pass of the sequence for a single language.
    fn load_language(&self, language: &str) -> Result<LoadOutcome, LoadError> {
        let key = cache_key(language);

        if let Some(backends) = self.cached(&key) {
            return Ok(LoadOutcome {
                language: language.to_string(),
                backends,
                from_cache: true,
                described: true,
            });
        }

        let items = self
            .transport
            .fetch_index(language)
            .map_err(|source| LoadError {
                language: language.to_string(),
                source,
            })?;
        let mut backends = classify_index(&items);

        let described = match self.transport.fetch_descriptions(language) {
            Ok(descriptions) => {
                merge_descriptions(&mut backends, &descriptions);
                if let Some(cache) = &self.cache {
                    cache.write(&key, &backends, now_ms());
                }
                true
            }
            Err(e) => {
                // Return the data without descriptions but don't cache it.
                debug!("description fetch failed for '{language}': {e}");
                false
            }
        };

        Ok(LoadOutcome {
            language: language.to_string(),
            backends,
            from_cache: false,
            described,
        })
    }

    /// Fresh-snapshot lookup. Staleness is decided here at read time; the
    /// store itself never expires anything.
    fn cached(&self, key: &str) -> Option<BackendSet> {
        let record = self.cache.as_ref()?.read(key)?;
        if !record.is_fresh(now_ms()) {
            debug!("cache entry {key} is stale");
            return None;
        }
        debug!("cache hit for {key}");
        Some(record.data)
    }
}
