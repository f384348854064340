//! End-to-end pipeline coverage: one component source in, every artifact
//! out, checked against the wire contract shared by both backends.

mod common;

use common::fixtures::{COUNTER, SERVER_PAGE, TODO_LIST};
use common::{TestResult, compile_ok};

#[test]
fn test_counter_artifacts_and_slot_table() -> TestResult {
    let compiled = compile_ok(COUNTER);
    assert_eq!(compiled.component.component, "Counter");
    assert_eq!(compiled.component.artifacts.len(), 3);

    let slots = compiled.descriptor_slots();
    assert_eq!(slots.len(), 5);

    // Identifiers are dense, zero-based, in document order.
    for (i, slot) in slots.iter().enumerate() {
        assert_eq!(slot["id"], format!("slot_{}", i));
    }

    // Two text slots first, and both resolve to the `count` signal even
    // though the second reads `doubled`.
    for slot in &slots[..2] {
        assert_eq!(slot["kind"], "text");
        assert_eq!(slot["update"], "replaceText");
        assert_eq!(slot["deps"], serde_json::json!(["count"]));
    }
    assert_eq!(slots[1]["expr"], "doubled");

    // Three event slots, omitted by the server backend only.
    for slot in &slots[2..] {
        assert_eq!(slot["kind"], "event");
        assert_eq!(slot["update"], "addEventListener");
        assert_eq!(slot["name"], "onClick");
        assert_eq!(slot["omittedIn"], serde_json::json!(["ssr"]));
    }
    Ok(())
}

#[test]
fn test_counter_scope_marker_in_both_backends() {
    let compiled = compile_ok(COUNTER);
    assert!(compiled.jsx().contains("data-scope=\"Counter\""));
    assert!(compiled.html().contains("data-scope=\"Counter\""));
}

#[test]
fn test_counter_descriptor_binding_table() -> TestResult {
    let descriptor = compile_ok(COUNTER).descriptor();
    assert_eq!(descriptor["component"], "Counter");
    assert_eq!(descriptor["scope"], "Counter");
    assert_eq!(descriptor["mode"], "client");

    let bindings = descriptor["bindings"].as_array().unwrap();
    assert_eq!(bindings.len(), 2);
    assert_eq!(bindings[0]["name"], "count");
    assert_eq!(bindings[0]["kind"], "signal");
    assert_eq!(bindings[0]["init"], "0");
    assert_eq!(bindings[1]["name"], "doubled");
    assert_eq!(bindings[1]["kind"], "derived");
    assert_eq!(bindings[1]["reads"], serde_json::json!(["count"]));
    Ok(())
}

#[test]
fn test_event_handlers_present_in_dom_absent_in_ssr() {
    let compiled = compile_ok(COUNTER);
    assert!(compiled.jsx().contains("onClick={__marq.handler(\"slot_2\")}"));
    assert!(!compiled.html().contains("onClick"));
    // The marker still identifies the element for hydration.
    assert!(compiled.html().contains("<button data-slot=\"slot_2\">"));
}

#[test]
fn test_control_blocks_are_single_slots() {
    let compiled = compile_ok(TODO_LIST);
    let slots = compiled.descriptor_slots();
    let kinds: Vec<&str> = slots.iter().map(|s| s["kind"].as_str().unwrap()).collect();
    assert_eq!(kinds, vec!["attribute", "block", "block"]);

    // Region internals carry no markers in either backend.
    assert!(!compiled.jsx().contains("slot_3"));
    assert!(!compiled.html().contains("slot_3"));
    assert!(compiled.html().contains("{% for item in items %}"));
    assert!(compiled.jsx().contains("__marq.each(items,"));
}

#[test]
fn test_static_interpolation_has_no_marker() {
    let compiled = compile_ok(TODO_LIST);
    // `title` is a plain parameter: rendered inline, never a slot.
    assert!(compiled.jsx().contains("{title}"));
    assert!(compiled.html().contains("{{ title }}"));
    for slot in compiled.descriptor_slots() {
        assert_ne!(slot["expr"], "title");
    }
}

#[test]
fn test_server_only_component_skips_dom() {
    let compiled = compile_ok(SERVER_PAGE);
    assert!(!compiled.has_artifact(".client.jsx"));
    assert!(compiled.has_artifact(".server.html"));
    assert!(compiled.has_artifact(".bindings.json"));
    assert_eq!(compiled.descriptor()["mode"], "server-only");
}

#[test]
fn test_attribute_slot_round_trip() -> TestResult {
    let compiled = compile_ok(TODO_LIST);
    let slots = compiled.descriptor_slots();
    assert_eq!(slots[0]["kind"], "attribute");
    assert_eq!(slots[0]["name"], "value");
    assert_eq!(slots[0]["update"], "setAttribute");
    assert_eq!(slots[0]["deps"], serde_json::json!(["filter"]));

    assert!(compiled.jsx().contains("value={__marq.attr(\"slot_0\")}"));
    assert!(compiled.html().contains("value=\"{{ filter }}\""));
    Ok(())
}
