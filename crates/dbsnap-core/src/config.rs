//! Per-test snapshot configuration.

use std::collections::BTreeSet;

/// How a test's captures are taken and finalized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnapshotConfig {
    /// Tables excluded from every capture (exact name match)
    pub ignore_tables: BTreeSet<String>,
    /// Finalize as consecutive diffs instead of full states
    pub diff_snapshots: bool,
}

impl SnapshotConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exclude one more table from every capture
    pub fn ignore_table(mut self, table: impl Into<String>) -> Self {
        self.ignore_tables.insert(table.into());
        self
    }

    /// Exclude several tables from every capture
    pub fn ignore_tables<I, T>(mut self, tables: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.ignore_tables
            .extend(tables.into_iter().map(Into::into));
        self
    }

    pub fn diff_snapshots(mut self, enabled: bool) -> Self {
        self.diff_snapshots = enabled;
        self
    }
}
