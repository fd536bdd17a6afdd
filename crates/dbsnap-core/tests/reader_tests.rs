#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{person, MemorySource};
use dbsnap_core::errors::ExErrorKind;
use dbsnap_core::{capture, Row, SqlValue};
use std::collections::BTreeSet;

fn ignore(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_capture_includes_non_empty_tables() {
    let db = MemorySource::new();
    db.insert("people", person(1, "Ada"));
    db.insert("people", person(2, "Grace"));

    let state = capture(&db, &ignore(&[])).unwrap();

    assert_eq!(state.len(), 1);
    assert_eq!(state["people"], vec![person(1, "Ada"), person(2, "Grace")]);
}

// P1: idempotent read
#[test]
fn test_capture_twice_without_writes_is_identical() {
    let db = MemorySource::new();
    db.insert("people", person(1, "Ada"));
    db.insert("pets", Row::from([("id", 1)]));

    let first = capture(&db, &ignore(&[])).unwrap();
    let second = capture(&db, &ignore(&[])).unwrap();

    assert_eq!(first, second);
}

// P2: empty tables never appear
#[test]
fn test_empty_table_is_omitted() {
    let db = MemorySource::new();
    db.create_table("empty");
    db.insert("people", person(1, "Ada"));

    let state = capture(&db, &ignore(&[])).unwrap();

    assert!(!state.contains_key("empty"));
    assert!(state.contains_key("people"));
}

// P3: ignored tables never appear
#[test]
fn test_ignored_table_is_excluded_even_with_rows() {
    let db = MemorySource::new();
    db.insert(
        "ignored",
        Row::from([("id", SqlValue::from(1)), ("value", SqlValue::from("Ignored Data"))]),
    );
    db.insert("people", person(1, "Ada"));

    let state = capture(&db, &ignore(&["ignored"])).unwrap();

    assert!(!state.contains_key("ignored"));
    assert!(state.contains_key("people"));
}

#[test]
fn test_ignore_match_is_exact() {
    let db = MemorySource::new();
    db.insert("ignored_table", Row::from([("id", 1)]));

    let state = capture(&db, &ignore(&["ignored", "IGNORED_TABLE"])).unwrap();

    assert!(state.contains_key("ignored_table"));
}

#[test]
fn test_capture_preserves_source_row_order() {
    let db = MemorySource::new();
    db.insert("people", person(3, "c"));
    db.insert("people", person(1, "a"));
    db.insert("people", person(2, "b"));

    let state = capture(&db, &ignore(&[])).unwrap();
    let ids: Vec<i64> = state["people"]
        .iter()
        .map(|r| r.get("id").and_then(|v| v.as_i64()).unwrap())
        .collect();

    assert_eq!(ids, vec![3, 1, 2]);
}

#[test]
fn test_all_empty_or_ignored_gives_empty_state() {
    let db = MemorySource::new();
    db.create_table("a");
    db.insert("b", Row::from([("id", 1)]));

    let state = capture(&db, &ignore(&["b"])).unwrap();

    assert!(state.is_empty());
}

#[test]
fn test_closed_handle_is_connection_error() {
    let db = MemorySource::new();
    db.insert("people", person(1, "Ada"));
    db.close();

    let err = capture(&db, &ignore(&[])).unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::Connection);
    assert_eq!(err.code(), "ERR_CONNECTION");
}

#[test]
fn test_vanished_table_aborts_whole_capture() {
    let db = MemorySource::new();
    db.insert("a_first", Row::from([("id", 1)]));
    db.insert("b_gone", Row::from([("id", 2)]));
    db.vanish_on_scan("b_gone");

    let err = capture(&db, &ignore(&[])).unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::Scan);
    assert_eq!(err.table(), Some("b_gone"));
}

#[test]
fn test_ignored_table_is_never_scanned() {
    let db = MemorySource::new();
    db.insert("people", person(1, "Ada"));
    db.insert("broken", Row::from([("id", 1)]));
    db.vanish_on_scan("broken");

    let state = capture(&db, &ignore(&["broken"])).unwrap();

    assert_eq!(state.len(), 1);
}
