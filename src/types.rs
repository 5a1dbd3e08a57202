// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The building blocks of a typeahead index.
//!
//! A manual's search surface is three buckets of completions: functions,
//! classes, and everything else. Each bucket is a [`Backend`] holding
//! [`Entry`] values keyed by page id. Buckets travel together as a
//! [`BackendSet`], which is also the shape that gets snapshotted to the
//! cache and rebuilt from it.
//!
//! # Invariants (the stuff that breaks if you ignore it)
//!
//! - **Entry**: `tokens` always contains `name`. Classification seeds the
//!   token list with the display name; extra method tokens only add to it.
//! - **Backend**: `elements[id].id == id`. The map key and the entry id are
//!   the same page id (overwrite-by-id is allowed, duplication is not).
//! - **BackendSet**: every classified item lives in exactly one bucket.
//!
//! Snapshots coming back from disk are untrusted: [`BackendSet::validate`]
//! re-checks these invariants and a failure downgrades the snapshot to a
//! cache miss rather than letting a malformed entry reach the UI.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::rank::compare_names;

/// Minimum pattern length before the surrounding UI offers its
/// "more results" / "search the site" affordances. Matching itself starts
/// from the first character; this only gates the escape hatches, because
/// the site search requires at least three characters in the pattern.
pub const MIN_PATTERN_LEN: usize = 3;

/// One searchable completion: a page id, a display name, the tokens a
/// query may match against, and an optional one-line description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: String,
    pub name: String,
    pub tokens: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Entry {
    /// Case-insensitive prefix match against any of this entry's tokens.
    ///
    /// This mirrors what the autocomplete widget does with its local
    /// dataset: `forma` matches `DateTime::format` through its `format`
    /// token, and `::forma` matches through the `::format` token.
    pub fn matches(&self, pattern: &str) -> bool {
        let pattern = pattern.to_lowercase();
        self.tokens
            .iter()
            .any(|token| token.to_lowercase().starts_with(&pattern))
    }
}

/// Category tag for a backend. Every raw index item maps to exactly one of
/// these or is dropped during classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Function,
    Class,
    General,
}

impl Category {
    /// All categories, in display order.
    pub const ALL: [Category; 3] = [Category::Function, Category::Class, Category::General];

    /// The wire tag (`"function"`, `"class"`, `"general"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Function => "function",
            Category::Class => "class",
            Category::General => "general",
        }
    }

    /// Human label shown as a section header above results.
    pub fn label(self) -> &'static str {
        match self {
            Category::Function => "Functions",
            Category::Class => "Classes",
            Category::General => "Other Matches",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A backend, which encapsulates a set of completions, such as a list of
/// functions or classes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Backend {
    label: String,
    elements: HashMap<String, Entry>,
}

impl Backend {
    pub fn new(label: impl Into<String>) -> Self {
        Backend {
            label: label.into(),
            elements: HashMap::new(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Entry> {
        self.elements.get(id)
    }

    /// Iterate entries in arbitrary (map) order. Use [`Backend::export`]
    /// for display order.
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.elements.values()
    }

    /// Adds an item to the backend, overwriting any entry with the same id.
    /// The description starts absent and is filled in by a later merge.
    pub fn add_item(&mut self, id: &str, name: &str, tokens: Vec<String>) {
        self.elements.insert(
            id.to_string(),
            Entry {
                id: id.to_string(),
                name: name.to_string(),
                tokens,
                description: None,
            },
        );
    }

    /// Adds a description to the given item. If the id doesn't exist, this
    /// method will do nothing, successfully: description data routinely
    /// references page ids outside the shipped index.
    pub fn add_description(&mut self, id: &str, description: &str) {
        if let Some(entry) = self.elements.get_mut(id) {
            entry.description = Some(description.to_string());
        }
    }

    /// Returns the backend contents as a ranked list suitable for display.
    /// Ordering is applied here, at export time, not at insertion.
    pub fn export(&self) -> Vec<Entry> {
        let mut entries: Vec<Entry> = self.elements.values().cloned().collect();
        entries.sort_by(|a, b| compare_names(&a.name, &b.name));
        entries
    }
}

/// A ranked, truncated view of one backend, plus the total it was cut
/// from. `total > entries.len()` is the UI's cue to render an
/// "N more results" affordance.
#[derive(Debug, Clone)]
pub struct RankedCategory {
    pub total: usize,
    pub entries: Vec<Entry>,
}

/// The fixed three-backend set a loaded language session works against.
///
/// Serializes as an object keyed by category tag, which is exactly the
/// `data` mapping stored in a cache snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendSet {
    function: Backend,
    class: Backend,
    general: Backend,
}

impl BackendSet {
    pub fn new() -> Self {
        BackendSet {
            function: Backend::new(Category::Function.label()),
            class: Backend::new(Category::Class.label()),
            general: Backend::new(Category::General.label()),
        }
    }

    pub fn get(&self, category: Category) -> &Backend {
        match category {
            Category::Function => &self.function,
            Category::Class => &self.class,
            Category::General => &self.general,
        }
    }

    pub fn get_mut(&mut self, category: Category) -> &mut Backend {
        match category {
            Category::Function => &mut self.function,
            Category::Class => &mut self.class,
            Category::General => &mut self.general,
        }
    }

    /// Iterate `(category, backend)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &Backend)> {
        Category::ALL.iter().map(move |&category| (category, self.get(category)))
    }

    /// Total entry count across all backends.
    pub fn len(&self) -> usize {
        self.iter().map(|(_, backend)| backend.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Ranked display output: per category, entries in export order
    /// truncated to `limit`, with the untruncated total alongside.
    pub fn ranked(&self, limit: usize) -> Vec<(Category, RankedCategory)> {
        self.iter()
            .map(|(category, backend)| {
                let mut entries = backend.export();
                let total = entries.len();
                entries.truncate(limit);
                (category, RankedCategory { total, entries })
            })
            .collect()
    }

    /// Re-check the structural invariants on a set that was rebuilt from a
    /// serialized snapshot. A fresh classification always satisfies these;
    /// a snapshot is only trusted after it does too.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        for (category, backend) in self.iter() {
            for (key, entry) in &backend.elements {
                if *key != entry.id {
                    return Err(SnapshotError::IdMismatch {
                        category,
                        key: key.clone(),
                        id: entry.id.clone(),
                    });
                }
                if entry.name.is_empty() {
                    return Err(SnapshotError::EmptyName {
                        category,
                        id: entry.id.clone(),
                    });
                }
                if !entry.tokens.iter().any(|token| *token == entry.name) {
                    return Err(SnapshotError::MissingNameToken {
                        category,
                        id: entry.id.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

impl Default for BackendSet {
    fn default() -> Self {
        BackendSet::new()
    }
}

/// Error type for snapshot invariant violations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    /// A backend maps a key to an entry carrying a different id.
    IdMismatch {
        category: Category,
        key: String,
        id: String,
    },
    /// An entry has an empty display name.
    EmptyName { category: Category, id: String },
    /// An entry's token list does not contain its own name.
    MissingNameToken { category: Category, id: String },
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::IdMismatch { category, key, id } => {
                write!(
                    f,
                    "{} backend maps key '{}' to entry with id '{}'",
                    category, key, id
                )
            }
            SnapshotError::EmptyName { category, id } => {
                write!(f, "{} backend entry '{}' has an empty name", category, id)
            }
            SnapshotError::MissingNameToken { category, id } => {
                write!(
                    f,
                    "{} backend entry '{}' is missing its name token",
                    category, id
                )
            }
        }
    }
}

impl std::error::Error for SnapshotError {}
