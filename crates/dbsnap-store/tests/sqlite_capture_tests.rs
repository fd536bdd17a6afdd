// State reader against a real SQLite connection

mod common;

use common::{exec, setup_data, setup_db};
use dbsnap_core::{calculate_diff, capture, ExErrorKind, SqlValue, StateSource};
use dbsnap_store::SqliteSource;
use serde_json::json;
use std::collections::BTreeSet;

fn no_ignores() -> BTreeSet<String> {
    BTreeSet::new()
}

#[test]
fn test_table_names_lists_user_tables_sorted() {
    let conn = setup_db();

    let names = SqliteSource::new(&conn).table_names().unwrap();

    assert_eq!(names, vec!["dynamic_table", "ignored_table", "important_table"]);
}

#[test]
fn test_internal_sqlite_tables_are_not_listed() {
    let conn = setup_db();
    exec(
        &conn,
        "CREATE TABLE counters (id INTEGER PRIMARY KEY AUTOINCREMENT, n INTEGER);
         INSERT INTO counters (n) VALUES (1);",
    );

    let names = SqliteSource::new(&conn).table_names().unwrap();

    assert!(names.contains(&"counters".to_string()));
    assert!(!names.iter().any(|n| n.starts_with("sqlite_")));
}

#[test]
fn test_capture_reads_rows_with_column_names() {
    let conn = setup_db();
    setup_data(&conn).unwrap();

    let state = capture(&SqliteSource::new(&conn), &no_ignores()).unwrap();

    assert_eq!(state.keys().collect::<Vec<_>>(), vec!["important_table"]);
    assert_eq!(
        serde_json::to_value(&state).unwrap(),
        json!({"important_table": [{"id": 1, "name": "Initial Name"}]})
    );
}

// P1
#[test]
fn test_capture_is_idempotent() {
    let conn = setup_db();
    setup_data(&conn).unwrap();
    exec(&conn, "INSERT INTO dynamic_table VALUES (1, 'a'), (2, 'b');");
    let source = SqliteSource::new(&conn);

    let first = capture(&source, &no_ignores()).unwrap();
    let second = capture(&source, &no_ignores()).unwrap();

    assert_eq!(first, second);
}

// P2
#[test]
fn test_empty_tables_are_omitted() {
    let conn = setup_db();

    let state = capture(&SqliteSource::new(&conn), &no_ignores()).unwrap();

    assert!(state.is_empty());
}

// P3
#[test]
fn test_ignored_tables_are_excluded() {
    let conn = setup_db();
    setup_data(&conn).unwrap();
    exec(&conn, "INSERT INTO ignored_table VALUES (1, 'Ignored Data');");
    let ignore: BTreeSet<String> = ["ignored_table".to_string()].into_iter().collect();

    let state = capture(&SqliteSource::new(&conn), &ignore).unwrap();

    assert!(!state.contains_key("ignored_table"));
    assert!(state.contains_key("important_table"));
}

#[test]
fn test_value_types_are_preserved() {
    let conn = setup_db();
    exec(
        &conn,
        "CREATE TABLE mixed (i INTEGER, r REAL, t TEXT, b BLOB, n TEXT);
         INSERT INTO mixed VALUES (7, 2.5, 'txt', X'CAFE', NULL);",
    );

    let state = capture(&SqliteSource::new(&conn), &no_ignores()).unwrap();
    let row = &state["mixed"][0];

    assert_eq!(row.get("i"), Some(&SqlValue::Integer(7)));
    assert_eq!(row.get("r"), Some(&SqlValue::Real(2.5)));
    assert_eq!(row.get("t"), Some(&SqlValue::Text("txt".to_string())));
    assert_eq!(row.get("b"), Some(&SqlValue::Blob(vec![0xca, 0xfe])));
    assert_eq!(row.get("n"), Some(&SqlValue::Null));
    let columns: Vec<&str> = row.columns().map(|(name, _)| name).collect();
    assert_eq!(columns, vec!["i", "r", "t", "b", "n"]);
}

#[test]
fn test_non_utf8_text_update_shows_in_diff() {
    let conn = setup_db();
    exec(
        &conn,
        "CREATE TABLE raw (id INTEGER, t TEXT);
         INSERT INTO raw VALUES (1, CAST(X'FF' AS TEXT));",
    );
    let source = SqliteSource::new(&conn);

    let before = capture(&source, &no_ignores()).unwrap();
    exec(&conn, "UPDATE raw SET t = CAST(X'FE' AS TEXT) WHERE id = 1;");
    let after = capture(&source, &no_ignores()).unwrap();

    assert_eq!(before["raw"][0].get("t"), Some(&SqlValue::Blob(vec![0xff])));
    assert_ne!(before, after);
    let diff = calculate_diff(&before, &after);
    assert_eq!(diff["raw"].added.len(), 1);
    assert_eq!(diff["raw"].removed.len(), 1);
}

#[test]
fn test_quoted_table_names_are_scanned() {
    let conn = setup_db();
    exec(
        &conn,
        r#"CREATE TABLE "order items" (id INTEGER);
           INSERT INTO "order items" VALUES (1);"#,
    );

    let state = capture(&SqliteSource::new(&conn), &no_ignores()).unwrap();

    assert_eq!(state["order items"].len(), 1);
}

#[test]
fn test_scan_of_dropped_table_is_scan_error() {
    let conn = setup_db();
    let source = SqliteSource::new(&conn);
    let listed = source.table_names().unwrap();
    exec(&conn, "DROP TABLE dynamic_table;");

    assert!(listed.contains(&"dynamic_table".to_string()));
    let err = source.scan_table("dynamic_table").unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::Scan);
    assert_eq!(err.table(), Some("dynamic_table"));
    assert_eq!(err.message(), "Table vanished before scan");
}

#[test]
fn test_capture_sees_uncommitted_transaction_writes() {
    let conn = setup_db();
    let tx = conn.unchecked_transaction().unwrap();
    tx.execute_batch("INSERT INTO dynamic_table VALUES (1, 'pending');")
        .unwrap();

    let inside = capture(&SqliteSource::new(&tx), &no_ignores()).unwrap();
    tx.rollback().unwrap();
    let after = capture(&SqliteSource::new(&conn), &no_ignores()).unwrap();

    assert!(inside.contains_key("dynamic_table"));
    assert!(!after.contains_key("dynamic_table"));
}
