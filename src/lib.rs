//! Typeahead index processing and ranking for documentation manuals.
//!
//! This crate turns a manual's raw page index into categorized, ranked,
//! cache-aware search backends: the data layer behind a navbar typeahead.
//! The UI layer (widget wiring, result templating) is a collaborator, not
//! part of this crate; it hands us a language and a display limit and gets
//! back ranked entries per category.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────┐    ┌──────────────┐    ┌──────────────┐
//! │  fetch.rs  │───▶│ classify.rs  │───▶│ describe.rs  │
//! │ (index +   │    │ (3-way       │    │ (id → text   │
//! │  desc docs)│    │  partition)  │    │  merge)      │
//! └────────────┘    └──────────────┘    └──────┬───────┘
//!        ▲                                     │
//!        │          ┌──────────────┐    ┌──────▼───────┐
//!        └──────────│  loader.rs   │◀──▶│  cache.rs    │
//!                   │ (fallback    │    │ (14-day      │
//!                   │  state flow) │    │  snapshots)  │
//!                   └──────────────┘    └──────────────┘
//!
//! types.rs (Entry / Backend / BackendSet) and rank.rs (display order)
//! underpin every stage.
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use shrike::{HttpTransport, LanguageLoader, CacheStore, LoadOptions};
//!
//! let transport = HttpTransport::new("https://www.php.net")?;
//! let loader = LanguageLoader::new(transport, CacheStore::open_default());
//!
//! let options = LoadOptions::default(); // language "en", limit 10
//! let outcome = loader.load(&options.language)?;
//! for (category, ranked) in outcome.backends.ranked(options.limit) {
//!     // render ranked.entries under category.label()
//! }
//! ```

// Module declarations
pub mod cache;
pub mod classify;
pub mod describe;
pub mod fetch;
pub mod loader;
pub mod rank;
pub mod types;

// Re-exports for public API
pub use cache::{cache_key, now_ms, CacheRecord, CacheStore, FRESHNESS_WINDOW_MS};
pub use classify::{classify_index, RawIndexItem};
pub use describe::merge_descriptions;
pub use fetch::{HttpTransport, TransportError};
pub use loader::{
    LanguageLoader, LoadError, LoadOptions, LoadOutcome, DEFAULT_LANGUAGE, DEFAULT_LIMIT,
};
pub use rank::{compare_names, is_method, METHOD_SEPARATOR};
pub use types::{
    Backend, BackendSet, Category, Entry, RankedCategory, SnapshotError, MIN_PATTERN_LEN,
};
