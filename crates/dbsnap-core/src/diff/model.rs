//! Diff output types.

use crate::model::Row;
use serde::Serialize;
use std::collections::BTreeMap;

/// Changes to one table between two captures.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct TableDiff {
    /// Rows present in the later capture but not the earlier one
    pub added: Vec<Row>,
    /// Rows present in the earlier capture but not the later one
    pub removed: Vec<Row>,
}

impl TableDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Table name to changes; only tables with at least one change appear.
pub type DatabaseDiff = BTreeMap<String, TableDiff>;
