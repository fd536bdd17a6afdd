//! Dynamic row model.
//!
//! Columns are discovered at scan time, so rows are ordered name/value
//! records over the [`SqlValue`] sum type rather than typed structs.
//! Collections keyed by table name use `BTreeMap` for deterministic
//! serialization.

use base64::Engine as _;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

/// Rows of one table, in the order the store returned them.
pub type TableState = Vec<Row>;

/// Table name to rows, for every non-empty, non-ignored table.
pub type DatabaseState = BTreeMap<String, TableState>;

/// JSON key wrapping base64-encoded blob values.
pub const BLOB_KEY: &str = "$blob";

/// JSON key wrapping non-finite reals (`"NaN"`, `"inf"`, `"-inf"`), which
/// plain JSON numbers cannot carry.
pub const REAL_KEY: &str = "$real";

/// A single column value as marshalled from the store.
///
/// Equality is exact: reals compare by bit pattern, so `NaN == NaN` and
/// `0.0 != -0.0`. Row identity is built on this.
#[derive(Debug, Clone)]
pub enum SqlValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
    Boolean(bool),
}

impl SqlValue {
    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null)
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            SqlValue::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            SqlValue::Text(v) => Some(v),
            _ => None,
        }
    }
}

impl PartialEq for SqlValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (SqlValue::Null, SqlValue::Null) => true,
            (SqlValue::Integer(a), SqlValue::Integer(b)) => a == b,
            (SqlValue::Real(a), SqlValue::Real(b)) => a.to_bits() == b.to_bits(),
            (SqlValue::Text(a), SqlValue::Text(b)) => a == b,
            (SqlValue::Blob(a), SqlValue::Blob(b)) => a == b,
            (SqlValue::Boolean(a), SqlValue::Boolean(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for SqlValue {}

impl Hash for SqlValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            SqlValue::Null => {}
            SqlValue::Integer(v) => v.hash(state),
            SqlValue::Real(v) => v.to_bits().hash(state),
            SqlValue::Text(v) => v.hash(state),
            SqlValue::Blob(v) => v.hash(state),
            SqlValue::Boolean(v) => v.hash(state),
        }
    }
}

impl Serialize for SqlValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SqlValue::Null => serializer.serialize_unit(),
            SqlValue::Integer(v) => serializer.serialize_i64(*v),
            SqlValue::Real(v) if v.is_finite() => serializer.serialize_f64(*v),
            SqlValue::Real(v) => {
                let tag = if v.is_nan() {
                    "NaN"
                } else if v.is_sign_positive() {
                    "inf"
                } else {
                    "-inf"
                };
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(REAL_KEY, tag)?;
                map.end()
            }
            SqlValue::Text(v) => serializer.serialize_str(v),
            SqlValue::Boolean(v) => serializer.serialize_bool(*v),
            SqlValue::Blob(v) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(
                    BLOB_KEY,
                    &base64::engine::general_purpose::STANDARD.encode(v),
                )?;
                map.end()
            }
        }
    }
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        SqlValue::Integer(v)
    }
}

impl From<i32> for SqlValue {
    fn from(v: i32) -> Self {
        SqlValue::Integer(i64::from(v))
    }
}

impl From<f64> for SqlValue {
    fn from(v: f64) -> Self {
        SqlValue::Real(v)
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        SqlValue::Text(v.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        SqlValue::Text(v)
    }
}

impl From<bool> for SqlValue {
    fn from(v: bool) -> Self {
        SqlValue::Boolean(v)
    }
}

impl From<Vec<u8>> for SqlValue {
    fn from(v: Vec<u8>) -> Self {
        SqlValue::Blob(v)
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(SqlValue::Null)
    }
}

/// One database record: column name to value, in result-set column order.
///
/// Two rows are the same row only if every column name and value matches in
/// order. There is no primary-key matching.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Row {
    columns: Vec<(String, SqlValue)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            columns: Vec::with_capacity(capacity),
        }
    }

    /// Append a column; order of calls is the column order
    pub fn push(&mut self, column: impl Into<String>, value: impl Into<SqlValue>) {
        self.columns.push((column.into(), value.into()));
    }

    /// Value of the first column with this name
    pub fn get(&self, column: &str) -> Option<&SqlValue> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, &SqlValue)> {
        self.columns.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl<K: Into<String>, V: Into<SqlValue>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            columns: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

impl<K: Into<String>, V: Into<SqlValue>, const N: usize> From<[(K, V); N]> for Row {
    fn from(columns: [(K, V); N]) -> Self {
        columns.into_iter().collect()
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (name, value) in &self.columns {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
