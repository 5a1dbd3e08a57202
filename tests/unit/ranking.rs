//! Backend export ordering and mutation semantics.

use shrike::{Backend, Category};

use crate::common::sample_backend_set;

fn backend_with(names: &[&str]) -> Backend {
    let mut backend = Backend::new("Functions");
    for (i, name) in names.iter().enumerate() {
        backend.add_item(&format!("id-{i}"), name, vec![name.to_string()]);
    }
    backend
}

#[test]
fn export_puts_methods_after_plain_names() {
    let backend = backend_with(&[
        "DateTime::format",
        "array_map",
        "ArrayObject::count",
        "zlib_encode",
    ]);
    let names: Vec<String> = backend.export().into_iter().map(|e| e.name).collect();
    assert_eq!(
        names,
        ["array_map", "zlib_encode", "ArrayObject::count", "DateTime::format"]
    );
}

#[test]
fn export_prefers_base_forms_over_variants() {
    let backend = backend_with(&["date_format", "date", "date_create"]);
    let names: Vec<String> = backend.export().into_iter().map(|e| e.name).collect();
    assert_eq!(names, ["date", "date_create", "date_format"]);
}

#[test]
fn export_of_sample_set_interleaves_nothing() {
    let set = sample_backend_set();
    let functions: Vec<String> = set
        .get(Category::Function)
        .export()
        .into_iter()
        .map(|e| e.name)
        .collect();
    // Plain functions first, then the method.
    assert_eq!(functions, ["str_replace", "strlen", "DateTime::format"]);
}

#[test]
fn add_item_overwrites_by_id() {
    let mut backend = Backend::new("Functions");
    backend.add_item("function.strlen", "strlen", vec!["strlen".into()]);
    backend.add_item("function.strlen", "mb_strlen", vec!["mb_strlen".into()]);

    assert_eq!(backend.len(), 1);
    assert_eq!(backend.get("function.strlen").unwrap().name, "mb_strlen");
}

#[test]
fn overwrite_clears_description() {
    let mut backend = Backend::new("Functions");
    backend.add_item("function.strlen", "strlen", vec!["strlen".into()]);
    backend.add_description("function.strlen", "Get string length");
    backend.add_item("function.strlen", "strlen", vec!["strlen".into()]);

    assert!(backend.get("function.strlen").unwrap().description.is_none());
}

#[test]
fn add_description_is_idempotent_and_tolerant() {
    let mut backend = Backend::new("Functions");
    backend.add_item("function.strlen", "strlen", vec!["strlen".into()]);

    backend.add_description("function.strlen", "Get string length");
    let once = backend.get("function.strlen").unwrap().clone();
    backend.add_description("function.strlen", "Get string length");
    assert_eq!(backend.get("function.strlen").unwrap(), &once);

    // Missing id: a no-op both times, never an error.
    backend.add_description("function.ghost", "nothing");
    backend.add_description("function.ghost", "nothing");
    assert_eq!(backend.len(), 1);
}
