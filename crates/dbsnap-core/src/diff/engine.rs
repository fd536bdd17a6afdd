//! Diff computation.

use crate::diff::model::{DatabaseDiff, TableDiff};
use crate::model::{DatabaseState, Row};
use std::collections::{BTreeSet, HashSet};

/// Compute the per-table row diff from `previous` to `current`.
///
/// Tables are taken from the union of both states; a table missing on one
/// side counts as having no rows there. Duplicate rows within one table
/// collapse to a single identity, keeping the first occurrence.
///
/// Pure and infallible.
pub fn calculate_diff(previous: &DatabaseState, current: &DatabaseState) -> DatabaseDiff {
    let tables: BTreeSet<&String> = previous.keys().chain(current.keys()).collect();

    let mut diff = DatabaseDiff::new();
    for table in tables {
        let prev_rows = previous.get(table).map(Vec::as_slice).unwrap_or_default();
        let curr_rows = current.get(table).map(Vec::as_slice).unwrap_or_default();

        let table_diff = diff_rows(prev_rows, curr_rows);
        if !table_diff.is_empty() {
            diff.insert(table.clone(), table_diff);
        }
    }

    diff
}

fn diff_rows(previous: &[Row], current: &[Row]) -> TableDiff {
    let prev_set: HashSet<&Row> = previous.iter().collect();
    let curr_set: HashSet<&Row> = current.iter().collect();

    TableDiff {
        added: only_in(current, &prev_set),
        removed: only_in(previous, &curr_set),
    }
}

/// Rows of `rows` absent from `other`, deduplicated, in `rows` order.
fn only_in(rows: &[Row], other: &HashSet<&Row>) -> Vec<Row> {
    let mut seen: HashSet<&Row> = HashSet::new();
    rows.iter()
        .filter(|row| !other.contains(*row) && seen.insert(*row))
        .cloned()
        .collect()
}
