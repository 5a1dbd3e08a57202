// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Export-time ranking for backend entries.
//!
//! Only a few completions are visible at any one time, so the order has to
//! make the visible ones count. The rules, in priority order:
//!
//! 1. Plain identifiers beat methods: any name containing `::` sorts after
//!    every name that doesn't.
//! 2. Base forms beat variants: when one name is an exact prefix of the
//!    other, the shorter one wins (`date` before `date_format`).
//! 3. Lexicographic ascending otherwise.
//!
//! This is a single comparator producing a strict total order. No
//! popularity signal is mixed in; short common names surfacing first is a
//! deliberately simple stand-in for one, and a known limitation.

use std::cmp::Ordering;

/// The token separating a class name from a method name.
pub const METHOD_SEPARATOR: &str = "::";

/// True when a display name is method-style (`DateTime::format`).
pub fn is_method(name: &str) -> bool {
    name.contains(METHOD_SEPARATOR)
}

/// The display-order comparator applied by `Backend::export`.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    // Methods are always after regular functions.
    match (is_method(a), is_method(b)) {
        (true, false) => return Ordering::Greater,
        (false, true) => return Ordering::Less,
        _ => {}
    }

    // If one name is the exact prefix of the other, the shorter version
    // sorts first (mostly for things like date() versus date_format()).
    if a.len() < b.len() && b.starts_with(a) {
        return Ordering::Less;
    }
    if b.len() < a.len() && a.starts_with(b) {
        return Ordering::Greater;
    }

    a.cmp(b)
}
