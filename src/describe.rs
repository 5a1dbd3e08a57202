// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Merging supplementary descriptions onto classified backends.
//!
//! The description document is a flat id → description map shipped
//! separately from the index, and its ids are not scoped by category. Each
//! pair is offered to every backend; `Backend::add_description` is a no-op
//! for ids a backend doesn't hold, so the owning bucket picks the
//! description up and the other two shrug it off. Ids present in the
//! description data but absent from the index are tolerated the same way.

use std::collections::HashMap;

use crate::types::{BackendSet, Category};

/// Augment the given backends with descriptions. Idempotent; applying the
/// same map twice leaves the set unchanged.
pub fn merge_descriptions(set: &mut BackendSet, descriptions: &HashMap<String, String>) {
    for (id, description) in descriptions {
        for category in Category::ALL {
            set.get_mut(category).add_description(id, description);
        }
    }
}
