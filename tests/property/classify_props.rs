//! Classification and merge tolerances under arbitrary inputs.

use std::collections::HashMap;

use proptest::prelude::*;
use shrike::{classify_index, merge_descriptions, Category, RawIndexItem};

fn row() -> impl Strategy<Value = RawIndexItem> {
    let name = prop_oneof![
        Just(None),
        Just(Some(String::new())),
        "[a-zA-Z_:]{1,12}".prop_map(Some),
    ];
    let heading = prop_oneof![
        Just(None),
        "(function\\.|class\\.|)[a-z.-]{1,12}".prop_map(Some),
    ];
    (name, heading).prop_map(|(name, heading)| RawIndexItem { name, heading })
}

proptest! {
    #[test]
    fn classification_never_panics_and_always_validates(
        rows in prop::collection::vec(row(), 0..60)
    ) {
        let set = classify_index(&rows);
        prop_assert!(set.validate().is_ok());

        // Only rows with a usable name and a heading can be stored.
        let usable = rows
            .iter()
            .filter(|r| r.name.as_deref().is_some_and(|n| !n.is_empty()) && r.heading.is_some())
            .count();
        prop_assert!(set.len() <= usable);
    }

    #[test]
    fn merge_with_arbitrary_ids_preserves_structure(
        descriptions in prop::collection::hash_map("[a-z.-]{1,16}", "[ -~]{0,40}", 0..20)
    ) {
        let items: Vec<RawIndexItem> =
            serde_json::from_str(&crate::common::sample_index_json()).unwrap();
        let mut set = classify_index(&items);
        let len_before = set.len();

        merge_descriptions(&mut set, &descriptions);

        prop_assert_eq!(set.len(), len_before);
        prop_assert!(set.validate().is_ok());
    }

    #[test]
    fn merge_twice_equals_merge_once(
        description in "[ -~]{1,40}"
    ) {
        let items: Vec<RawIndexItem> =
            serde_json::from_str(&crate::common::sample_index_json()).unwrap();
        let mut once = classify_index(&items);
        let descriptions =
            HashMap::from([("function.strlen".to_string(), description)]);

        merge_descriptions(&mut once, &descriptions);
        let mut twice = once.clone();
        merge_descriptions(&mut twice, &descriptions);

        for category in Category::ALL {
            prop_assert_eq!(once.get(category).export(), twice.get(category).export());
        }
    }
}
