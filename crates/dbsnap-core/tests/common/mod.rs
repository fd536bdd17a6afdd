use dbsnap_core::errors::{ExError, ExErrorKind, SnapshotError};
use dbsnap_core::{Result, Row, StateSource};
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

/// In-memory table store for driving the reader and ledger without SQL.
///
/// Interior mutability lets a test mutate tables while a ledger borrows it,
/// the same way a SQL connection accepts writes through `&self`.
#[derive(Default)]
#[allow(dead_code)]
pub struct MemorySource {
    tables: RefCell<BTreeMap<String, Vec<Row>>>,
    fail_scan_of: RefCell<Option<String>>,
    closed: Cell<bool>,
}

#[allow(dead_code)]
impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create (or keep) an empty table
    pub fn create_table(&self, table: &str) {
        self.tables
            .borrow_mut()
            .entry(table.to_string())
            .or_default();
    }

    pub fn insert(&self, table: &str, row: Row) {
        self.tables
            .borrow_mut()
            .entry(table.to_string())
            .or_default()
            .push(row);
    }

    /// Remove rows matching `predicate`
    pub fn delete_where<F: Fn(&Row) -> bool>(&self, table: &str, predicate: F) {
        if let Some(rows) = self.tables.borrow_mut().get_mut(table) {
            rows.retain(|row| !predicate(row));
        }
    }

    /// Replace rows matching `predicate` with `replacement`, in place
    pub fn update_where<F: Fn(&Row) -> bool>(&self, table: &str, predicate: F, replacement: Row) {
        if let Some(rows) = self.tables.borrow_mut().get_mut(table) {
            for row in rows.iter_mut().filter(|row| predicate(row)) {
                *row = replacement.clone();
            }
        }
    }

    /// Make the next scans of `table` fail as if it had been dropped
    pub fn vanish_on_scan(&self, table: &str) {
        *self.fail_scan_of.borrow_mut() = Some(table.to_string());
    }

    /// Make enumeration fail as if the handle had been closed
    pub fn close(&self) {
        self.closed.set(true);
    }
}

impl StateSource for MemorySource {
    fn table_names(&self) -> Result<Vec<String>> {
        if self.closed.get() {
            return Err(SnapshotError::TableEnumerationFailed {
                reason: "handle is closed".to_string(),
            }
            .into());
        }
        Ok(self.tables.borrow().keys().cloned().collect())
    }

    fn scan_table(&self, table: &str) -> Result<Vec<Row>> {
        if self.fail_scan_of.borrow().as_deref() == Some(table) {
            return Err(SnapshotError::TableVanished {
                table: table.to_string(),
            }
            .into());
        }
        self.tables.borrow().get(table).cloned().ok_or_else(|| {
            ExError::new(ExErrorKind::Scan)
                .with_op("scan_table")
                .with_table(table)
                .with_message("no such table")
        })
    }
}

/// Row `{id, name}` as used across scenarios
#[allow(dead_code)]
pub fn person(id: i64, name: &str) -> Row {
    let mut row = Row::new();
    row.push("id", id);
    row.push("name", name);
    row
}
