//! Determinism and cross-backend equivalence.
//!
//! The slot identifier set is a contract between every backend's output and
//! the binding descriptor; these suites check the set matches everywhere
//! and that rebuilds are byte-identical.

mod common;

use common::fixtures::{COUNTER, TODO_LIST};
use common::{Compiled, compile_ok};
use std::collections::BTreeSet;

fn markers_in(text: &str) -> BTreeSet<String> {
    let mut found = BTreeSet::new();
    for chunk in text.split("data-slot=\"") {
        if let Some(end) = chunk.find('"') {
            for marker in chunk[..end].split(' ') {
                if marker.starts_with("slot_") {
                    found.insert(marker.to_string());
                }
            }
        }
    }
    found
}

fn descriptor_ids(compiled: &Compiled) -> BTreeSet<String> {
    compiled
        .descriptor_slots()
        .iter()
        .map(|slot| slot["id"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn test_rebuild_is_byte_identical() {
    for source in [COUNTER, TODO_LIST] {
        let first = compile_ok(source);
        let second = compile_ok(source);
        assert_eq!(
            first.component.artifacts.len(),
            second.component.artifacts.len()
        );
        for (a, b) in first
            .component
            .artifacts
            .iter()
            .zip(&second.component.artifacts)
        {
            assert_eq!(a.file_name, b.file_name);
            assert_eq!(a.contents, b.contents, "artifact {} differs", a.file_name);
        }
    }
}

#[test]
fn test_backends_mark_the_same_slot_set() {
    for source in [COUNTER, TODO_LIST] {
        let compiled = compile_ok(source);
        let jsx_markers = markers_in(compiled.jsx());
        let html_markers = markers_in(compiled.html());
        assert_eq!(jsx_markers, html_markers);
        assert_eq!(jsx_markers, descriptor_ids(&compiled));
    }
}

#[test]
fn test_static_sibling_does_not_shift_identifiers() {
    let without = compile_ok(
        r#"component C() {
            let count = signal(0);
            <div><span>{count}</span><button onClick={count = 0}>x</button></div>
        }"#,
    );
    let with = compile_ok(
        r#"component C() {
            let count = signal(0);
            <div><em>label</em><span>{count}</span><button onClick={count = 0}>x</button></div>
        }"#,
    );
    assert_eq!(descriptor_ids(&without), descriptor_ids(&with));
}

#[test]
fn test_attribute_slots_precede_child_slots() {
    let compiled = compile_ok(
        r#"component C() {
            let state = signal(0);
            <div class={state} onClick={state = 1}>
                <span>{state}</span>
            </div>
        }"#,
    );
    let slots = compiled.descriptor_slots();
    let kinds: Vec<&str> = slots.iter().map(|s| s["kind"].as_str().unwrap()).collect();
    // Attributes in source order first, then children in document order.
    assert_eq!(kinds, vec!["attribute", "event", "text"]);
}
