// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Partitioning a raw page index into typed backends.
//!
//! The wire format is deliberately dumb: a JSON array of `[name, heading]`
//! pairs, where `name` is what the user sees and `heading` is the page id
//! doubling as a category hint (`function.strlen`, `class.datetime`, ...).
//! Classification is total over well-formed pairs: every item with a
//! non-empty name and a present heading lands in exactly one category.
//!
//! Malformed pairs are dropped silently. Upstream index generation has
//! shipped heading-less rows for years; tolerating them beats refusing to
//! load the whole manual over a few unreachable pages.

use std::fmt;

use serde::de::{Deserialize, Deserializer, IgnoredAny, SeqAccess, Visitor};
use tracing::trace;

use crate::rank::METHOD_SEPARATOR;
use crate::types::{BackendSet, Category};

/// Heading prefix marking a function page.
const FUNCTION_PREFIX: &str = "function.";

/// Heading prefix marking a class page.
const CLASS_PREFIX: &str = "class.";

/// One row of the raw index document.
///
/// Decodes from a JSON array, tolerating `null`s, short rows, and extra
/// trailing elements. Whether a row is usable is decided by
/// [`classify_index`], not by the decoder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawIndexItem {
    pub name: Option<String>,
    pub heading: Option<String>,
}

impl<'de> Deserialize<'de> for RawIndexItem {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ItemVisitor;

        impl<'de> Visitor<'de> for ItemVisitor {
            type Value = RawIndexItem;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a [name, heading] pair")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let name = seq.next_element::<Option<String>>()?.flatten();
                let heading = seq.next_element::<Option<String>>()?.flatten();
                // Drain anything after the pair; future index generators
                // may append fields.
                while seq.next_element::<IgnoredAny>()?.is_some() {}
                Ok(RawIndexItem { name, heading })
            }
        }

        deserializer.deserialize_seq(ItemVisitor)
    }
}

/// Split a method-style name into its bare method tokens.
///
/// `DateTime::format` yields `format` and `::format`, so users can search
/// for method names directly, or pin the search to methods by prefixing
/// their pattern with `::`. Matches the segment between the first and
/// second separator for names with several.
fn method_tokens(name: &str) -> Option<(String, String)> {
    let method = name.split(METHOD_SEPARATOR).nth(1)?;
    Some((method.to_string(), format!("{METHOD_SEPARATOR}{method}")))
}

/// Decide which backend a `(name, heading)` pair belongs in.
fn categorize(name: &str, heading: &str) -> Category {
    if heading.starts_with(FUNCTION_PREFIX) {
        Category::Function
    } else if name.contains(METHOD_SEPARATOR) {
        Category::Function
    } else if heading.starts_with(CLASS_PREFIX) {
        Category::Class
    } else {
        // Most remaining items lack a recognizable heading, which is
        // probably an upstream gap, but those that reach here still get
        // surfaced under Other Matches.
        Category::General
    }
}

/// Processes a raw index document and returns the populated backend set.
///
/// The heading is the stored id and lookup key; the name is only the
/// display and sort key. Rows without a name or without a heading are
/// skipped without error.
pub fn classify_index(items: &[RawIndexItem]) -> BackendSet {
    let mut set = BackendSet::new();

    for item in items {
        let Some(name) = item.name.as_deref().filter(|name| !name.is_empty()) else {
            continue;
        };
        let Some(heading) = item.heading.as_deref() else {
            trace!("dropping index row '{name}' with no heading");
            continue;
        };

        let mut tokens = vec![name.to_string()];
        if let Some((method, prefixed)) = method_tokens(name) {
            tokens.push(method);
            tokens.push(prefixed);
        }

        let category = categorize(name, heading);
        set.get_mut(category).add_item(heading, name, tokens);
    }

    set
}
