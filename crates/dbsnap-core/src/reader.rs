//! State reader: materializes every interesting table into a [`DatabaseState`].
//!
//! The reader is storage-agnostic. Backends implement [`StateSource`] with
//! two capabilities: list the tables of the current schema, and run an
//! unordered full scan of one table.

#![allow(clippy::result_large_err)]

use crate::errors::Result;
use crate::model::{DatabaseState, Row};
use std::collections::BTreeSet;

/// A live database handle the reader can enumerate and scan.
///
/// Implementations must not open or close transactions; they read through
/// whatever transactional scope the caller has established.
pub trait StateSource {
    /// All table names visible in the handle's current schema.
    ///
    /// # Errors
    ///
    /// `Connection` if the handle is invalid or the catalog query fails.
    fn table_names(&self) -> Result<Vec<String>>;

    /// Every row of `table`, in the store's natural scan order.
    ///
    /// # Errors
    ///
    /// `Scan` if the table no longer exists or the query fails.
    fn scan_table(&self, table: &str) -> Result<Vec<Row>>;
}

impl<S: StateSource + ?Sized> StateSource for &S {
    fn table_names(&self) -> Result<Vec<String>> {
        (**self).table_names()
    }

    fn scan_table(&self, table: &str) -> Result<Vec<Row>> {
        (**self).scan_table(table)
    }
}

/// Capture the current state of every table not in `ignore_tables`.
///
/// Tables whose scan returns no rows are left out entirely. Row order is
/// whatever the source returned; nothing is sorted.
///
/// # Errors
///
/// Propagates the first enumeration or scan failure. No partial state is
/// returned.
pub fn capture<S: StateSource + ?Sized>(
    source: &S,
    ignore_tables: &BTreeSet<String>,
) -> Result<DatabaseState> {
    let tables = source.table_names()?;

    let mut state = DatabaseState::new();
    for table in tables {
        if ignore_tables.contains(&table) {
            tracing::debug!(table = %table, "skipping ignored table");
            continue;
        }

        let rows = source.scan_table(&table)?;
        if rows.is_empty() {
            tracing::debug!(table = %table, "skipping empty table");
            continue;
        }

        tracing::debug!(table = %table, row_count = rows.len(), "captured table");
        state.insert(table, rows);
    }

    Ok(state)
}
