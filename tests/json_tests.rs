//! End-to-end tests for the JSON document library.
//!
//! These pin the externally observable contract: parsing, tree access
//! and mutation, structural equality, serialization policy, and the
//! error behavior callers are allowed to rely on.

use std::env;
use std::fs;

use jsontree::{parse, parse_file, parse_str, InputMode, JsonError, JsonType, Value};

fn pair(key: &str, value: Value) -> Value {
    Value::Array(vec![Value::from(key), value])
}

// ============================================================================
// End-to-end scenario
// ============================================================================

#[test]
fn parse_simple_document() {
    let doc = parse_str(r#"{"happy":true,"pi":3.141}"#).unwrap();

    assert!(doc.is_object());
    assert_eq!(doc.len().unwrap(), 2);
    assert_eq!(doc["pi"].as_f64().unwrap(), 3.141);
    assert_eq!(doc["happy"].as_bool().unwrap(), true);
}

#[test]
fn build_mutate_and_read_back() {
    let mut doc = Value::empty(JsonType::Object);
    doc.push_back(pair("name", Value::from("widget"))).unwrap();
    doc.push_back(pair("tags", Value::Array(vec![]))).unwrap();
    doc["tags"].push_back(Value::from("new")).unwrap();
    doc["tags"].push_back(Value::from("shiny")).unwrap();
    doc["count"] = Value::from(2);

    assert_eq!(doc.at("tags").unwrap().len().unwrap(), 2);
    assert_eq!(doc["tags"][1], Value::from("shiny"));
    assert_eq!(doc.at("count").unwrap().as_i64().unwrap(), 2);
}

// ============================================================================
// Round-trip: parse(stringify(v)) == v
// ============================================================================

#[test]
fn roundtrip_nested_tree() {
    let doc = parse_str(
        r#"{
            "name": "fixture",
            "enabled": true,
            "missing": null,
            "counts": [1, 2, 3],
            "ratios": [0.5, -2.25, 1e3],
            "nested": {"inner": [{"deep": false}]}
        }"#,
    )
    .unwrap();

    let text = doc.stringify().unwrap();
    let reparsed = parse_str(&text).unwrap();
    assert_eq!(reparsed, doc, "round-trip must preserve structure");
}

#[test]
fn roundtrip_escape_heavy_strings() {
    let doc = Value::from_list(vec![
        pair("quotes", Value::from("say \"hi\"")),
        pair("path", Value::from("C:\\temp\\x")),
        pair("multi", Value::from("line1\nline2\ttabbed")),
        pair("unicode", Value::from("héllo \u{1F600}")),
        pair("control", Value::from("\u{1}\u{2}")),
    ]);

    let text = doc.stringify().unwrap();
    let reparsed = parse_str(&text).unwrap();
    assert_eq!(reparsed, doc);
}

#[test]
fn escaped_and_raw_spellings_parse_equal() {
    // Escapes are decoded into their semantic characters, so the escaped
    // and raw spellings of the same string yield equal trees.
    let escaped = parse_str(r#"["\u0041\uD83D\uDE00 \n"]"#).unwrap();
    let raw = parse_str("[\"A\u{1F600} \\n\"]").unwrap();
    assert_eq!(escaped, raw);
    assert_eq!(escaped[0].as_str().unwrap(), "A\u{1F600} \n");
}

#[test]
fn roundtrip_built_tree_matches_parsed_tree() {
    let mut built = Value::empty(JsonType::Object);
    built.push_back(pair("a", Value::Integer(1))).unwrap();
    built
        .push_back(pair(
            "b",
            Value::Array(vec![Value::Bool(true), Value::Null]),
        ))
        .unwrap();

    let parsed = parse_str(r#"{"a": 1, "b": [true, null]}"#).unwrap();
    assert_eq!(built, parsed);
    assert_eq!(built.stringify().unwrap(), parsed.stringify().unwrap());
}

// ============================================================================
// Construction ambiguity: the "looks like a pair" rule
// ============================================================================

#[test]
fn single_pair_with_array_value_yields_object() {
    // {{"a", {1,2}}} - one pair whose value is itself array-shaped.
    let value = Value::from_list(vec![pair(
        "a",
        Value::Array(vec![Value::Integer(1), Value::Integer(2)]),
    )]);

    assert!(value.is_object());
    assert_eq!(value.len().unwrap(), 1);
    assert_eq!(
        value["a"],
        Value::Array(vec![Value::Integer(1), Value::Integer(2)])
    );
}

#[test]
fn non_string_firsts_yield_array_of_tuples() {
    // {{1,2},{3,4}} - no element's first item is a string.
    let value = Value::from_list(vec![
        Value::Array(vec![Value::Integer(1), Value::Integer(2)]),
        Value::Array(vec![Value::Integer(3), Value::Integer(4)]),
    ]);

    assert!(value.is_array(), "must not silently become an object");
    assert_eq!(value.len().unwrap(), 2);
    assert_eq!(value[0].len().unwrap(), 2);
}

// ============================================================================
// Equality
// ============================================================================

#[test]
fn equality_ignores_key_insertion_order() {
    let a = parse_str(r#"{"x": 1, "y": [2, 3]}"#).unwrap();
    let b = parse_str(r#"{"y": [2, 3], "x": 1}"#).unwrap();

    assert_eq!(a, a, "reflexive");
    assert_eq!(a, b);
    assert_eq!(b, a, "symmetric");

    let c = parse_str(r#"{"y": [2,3], "x": 1}"#).unwrap();
    assert_eq!(b, c);
    assert_eq!(a, c, "transitive");
}

#[test]
fn equality_is_structural_not_identity() {
    let a = parse_str(r#"[{"k": "v"}]"#).unwrap();
    let b = a.clone();
    assert_eq!(a, b);

    let different = parse_str(r#"[{"k": "w"}]"#).unwrap();
    assert_ne!(a, different);
}

// ============================================================================
// Error conditions
// ============================================================================

#[test]
fn at_with_key_on_array_is_contract_violation() {
    let err = Value::empty(JsonType::Array).at("key").unwrap_err();
    assert!(err.is_contract_violation());
    assert!(!err.is_malformed_input());
}

#[test]
fn missing_value_after_colon_is_malformed() {
    let err = parse_str(r#"{"a":}"#).unwrap_err();
    assert!(err.is_malformed_input());
}

#[test]
fn bare_scalar_root_is_malformed() {
    let err = parse_str("true").unwrap_err();
    assert!(matches!(err, JsonError::NonContainerRoot { line: 1 }));
}

#[test]
fn trailing_comma_is_malformed() {
    // Strict-grammar policy: pinned as rejected.
    let err = parse_str(r#"{"a":1,}"#).unwrap_err();
    assert!(err.is_malformed_input());
}

#[test]
fn no_partial_tree_on_failure() {
    // A failing parse yields only the error, never a value.
    let result = parse_str(r#"{"good": 1, "bad": }"#);
    assert!(result.is_err());
}

// ============================================================================
// Line tracking
// ============================================================================

#[test]
fn multiline_error_reports_offending_line() {
    let input = "{\n  \"a\": 1,\n  \"b\": 2,\n  \"c\": @\n}";
    let err = parse_str(input).unwrap_err();
    assert_eq!(err.line(), Some(4), "line of first offending token");
}

#[test]
fn multiline_unterminated_string_reports_line() {
    let input = "[\n  1,\n  \"open";
    let err = parse_str(input).unwrap_err();
    assert_eq!(err.line(), Some(3));
}

// ============================================================================
// Input sources
// ============================================================================

#[test]
fn file_mode_parses_file_contents() {
    let path = env::temp_dir().join(format!("jsontree-test-{}.json", std::process::id()));
    fs::write(&path, "{\n  \"from_file\": [10, 20]\n}\n").unwrap();

    let doc = parse_file(&path).unwrap();
    fs::remove_file(&path).unwrap();

    assert_eq!(doc["from_file"][1], Value::Integer(20));

    // Same contents through the mode-flag entry point.
    let via_mode = parse(
        path.to_str().unwrap_or_default(),
        InputMode::File,
    );
    assert!(via_mode.is_err(), "file was removed; read must now fail");
}

#[test]
fn file_mode_missing_file_is_io_error() {
    let err = parse("/definitely/not/here.json", InputMode::File).unwrap_err();
    assert!(matches!(err, JsonError::Io { .. }));
}

#[test]
fn text_mode_never_touches_filesystem() {
    // A string that happens to look like a path parses as text and fails
    // as malformed input, not as an I/O error.
    let err = parse("/etc/passwd", InputMode::Text).unwrap_err();
    assert!(err.is_malformed_input());
}
