//! The comparator must behave like an order, not just like a function.

use std::cmp::Ordering;

use proptest::prelude::*;
use shrike::{compare_names, is_method, Backend};

fn plain_name() -> impl Strategy<Value = String> {
    "[a-z_]{1,12}"
}

fn method_name() -> impl Strategy<Value = String> {
    "[A-Z][a-z]{1,6}::[a-z]{1,8}"
}

fn any_name() -> impl Strategy<Value = String> {
    prop_oneof![plain_name(), method_name()]
}

proptest! {
    #[test]
    fn every_method_sorts_after_every_plain_name(
        plain in plain_name(),
        method in method_name(),
    ) {
        prop_assert_eq!(compare_names(&plain, &method), Ordering::Less);
        prop_assert_eq!(compare_names(&method, &plain), Ordering::Greater);
    }

    #[test]
    fn true_prefixes_sort_first(
        base in plain_name(),
        suffix in "[a-z_]{1,8}",
    ) {
        let extended = format!("{base}{suffix}");
        prop_assert_eq!(compare_names(&base, &extended), Ordering::Less);
        prop_assert_eq!(compare_names(&extended, &base), Ordering::Greater);
    }

    #[test]
    fn comparator_is_antisymmetric(a in any_name(), b in any_name()) {
        prop_assert_eq!(compare_names(&a, &b), compare_names(&b, &a).reverse());
    }

    #[test]
    fn comparator_is_reflexive(a in any_name()) {
        prop_assert_eq!(compare_names(&a, &a), Ordering::Equal);
    }

    #[test]
    fn export_is_deterministic_and_partitioned(
        names in prop::collection::hash_set(any_name(), 0..30)
    ) {
        let mut backend = Backend::new("Functions");
        for (i, name) in names.iter().enumerate() {
            backend.add_item(&format!("id-{i}"), name, vec![name.clone()]);
        }

        let first = backend.export();
        let second = backend.export();
        prop_assert_eq!(&first, &second);

        // Once a method appears, everything after it is a method.
        let mut seen_method = false;
        for entry in &first {
            if is_method(&entry.name) {
                seen_method = true;
            } else {
                prop_assert!(!seen_method, "plain name after a method");
            }
        }
    }
}
