//! SQLite implementation of the state reader's source.
//!
//! Tables come from `sqlite_master` of the `main` schema, minus SQLite's
//! internal `sqlite_*` tables. Each scan is an unordered `SELECT *`.

#![allow(clippy::result_large_err)]

use crate::errors::{enumeration_error, scan_error, Result};
use dbsnap_core::{Row, SqlValue, StateSource};
use rusqlite::types::ValueRef;
use rusqlite::Connection;

const LIST_TABLES_SQL: &str = "SELECT name FROM main.sqlite_master
     WHERE type = 'table' AND name NOT LIKE 'sqlite~_%' ESCAPE '~'
     ORDER BY name";

/// A borrowed connection viewed as a [`StateSource`].
///
/// Works with a `Transaction` too, through its `Deref` to `Connection`, so
/// captures see the transaction's uncommitted writes.
#[derive(Clone, Copy)]
pub struct SqliteSource<'c> {
    conn: &'c Connection,
}

impl<'c> SqliteSource<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    pub fn connection(&self) -> &'c Connection {
        self.conn
    }
}

impl StateSource for SqliteSource<'_> {
    fn table_names(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare(LIST_TABLES_SQL)
            .map_err(enumeration_error)?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(enumeration_error)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(enumeration_error)?;

        tracing::debug!(table_count = names.len(), "listed tables");
        Ok(names)
    }

    fn scan_table(&self, table: &str) -> Result<Vec<Row>> {
        let sql = format!("SELECT * FROM {}", quote_identifier(table));
        let mut stmt = self.conn.prepare(&sql).map_err(|e| scan_error(table, e))?;
        let columns: Vec<String> = stmt
            .column_names()
            .into_iter()
            .map(String::from)
            .collect();

        let mut rows = stmt.query([]).map_err(|e| scan_error(table, e))?;
        let mut records = Vec::new();
        while let Some(row) = rows.next().map_err(|e| scan_error(table, e))? {
            let mut record = Row::with_capacity(columns.len());
            for (idx, column) in columns.iter().enumerate() {
                let value = row.get_ref(idx).map_err(|e| scan_error(table, e))?;
                record.push(column.clone(), to_sql_value(value));
            }
            records.push(record);
        }

        Ok(records)
    }
}

/// Quote a table name for interpolation into SQL
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// TEXT that is not valid UTF-8 is kept byte-exact as a blob, so distinct
/// stored values never collapse into one.
fn to_sql_value(value: ValueRef<'_>) -> SqlValue {
    match value {
        ValueRef::Null => SqlValue::Null,
        ValueRef::Integer(v) => SqlValue::Integer(v),
        ValueRef::Real(v) => SqlValue::Real(v),
        ValueRef::Text(bytes) => match std::str::from_utf8(bytes) {
            Ok(text) => SqlValue::Text(text.to_string()),
            Err(_) => SqlValue::Blob(bytes.to_vec()),
        },
        ValueRef::Blob(bytes) => SqlValue::Blob(bytes.to_vec()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_identifier_escapes_quotes() {
        assert_eq!(quote_identifier("users"), "\"users\"");
        assert_eq!(quote_identifier("we\"ird"), "\"we\"\"ird\"");
    }

    #[test]
    fn test_value_mapping() {
        assert_eq!(to_sql_value(ValueRef::Null), SqlValue::Null);
        assert_eq!(to_sql_value(ValueRef::Integer(4)), SqlValue::Integer(4));
        assert_eq!(to_sql_value(ValueRef::Real(0.25)), SqlValue::Real(0.25));
        assert_eq!(
            to_sql_value(ValueRef::Text(b"hi")),
            SqlValue::Text("hi".to_string())
        );
        assert_eq!(
            to_sql_value(ValueRef::Blob(&[1, 2])),
            SqlValue::Blob(vec![1, 2])
        );
    }

    #[test]
    fn test_invalid_utf8_text_keeps_exact_bytes() {
        assert_eq!(to_sql_value(ValueRef::Text(&[0xff])), SqlValue::Blob(vec![0xff]));
        assert_ne!(
            to_sql_value(ValueRef::Text(&[0xff])),
            to_sql_value(ValueRef::Text(&[0xfe]))
        );
    }
}
