//! Snapshot ledger: the ordered captures taken during one test.
//!
//! A ledger holds one [`StateSource`] (usually a borrowed handle) for its
//! whole life, appends a named [`Snapshot`] on every
//! [`record`](SnapshotLedger::record), and is consumed by
//! [`finalize`](SnapshotLedger::finalize).
//!
//! ## Documented quirks
//!
//! - A capture with no qualifying tables is not appended, so its name never
//!   reaches the final result.
//! - Duplicate names (or duplicate `<name>_diff` keys) resolve last-writer-wins.

#![allow(clippy::result_large_err)]

use crate::config::SnapshotConfig;
use crate::diff::{calculate_diff, DatabaseDiff};
use crate::errors::{ExError, Result};
use crate::model::DatabaseState;
use crate::reader::{capture, StateSource};
use crate::{log_op_end, log_op_error, log_op_start};
use serde::Serialize;
use std::collections::BTreeMap;

/// Suffix appended to a snapshot name to form its diff key.
pub const DIFF_KEY_SUFFIX: &str = "_diff";

/// One named capture.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Snapshot {
    pub name: String,
    pub state: DatabaseState,
}

/// The finalized ledger, ready for baseline comparison.
///
/// Serializes as a plain JSON object keyed by snapshot name (full mode) or
/// by `<name>_diff` (diff mode).
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum FinalResult {
    /// Snapshot name to captured state
    Full(BTreeMap<String, DatabaseState>),
    /// `<name>_diff` to changes since the preceding capture
    Diff(BTreeMap<String, DatabaseDiff>),
}

impl FinalResult {
    pub fn is_diff(&self) -> bool {
        matches!(self, FinalResult::Diff(_))
    }

    /// Top-level keys in result order
    pub fn keys(&self) -> Vec<&str> {
        match self {
            FinalResult::Full(states) => states.keys().map(String::as_str).collect(),
            FinalResult::Diff(diffs) => diffs.keys().map(String::as_str).collect(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            FinalResult::Full(states) => states.len(),
            FinalResult::Diff(diffs) => diffs.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn full(&self) -> Option<&BTreeMap<String, DatabaseState>> {
        match self {
            FinalResult::Full(states) => Some(states),
            FinalResult::Diff(_) => None,
        }
    }

    pub fn diffs(&self) -> Option<&BTreeMap<String, DatabaseDiff>> {
        match self {
            FinalResult::Diff(diffs) => Some(diffs),
            FinalResult::Full(_) => None,
        }
    }
}

/// Ordered captures for one test, bound to one source.
pub struct SnapshotLedger<S: StateSource> {
    source: S,
    config: SnapshotConfig,
    snapshots: Vec<Snapshot>,
}

impl<S: StateSource> SnapshotLedger<S> {
    /// Create an empty ledger over `source`
    pub fn new(source: S, config: SnapshotConfig) -> Self {
        Self {
            source,
            config,
            snapshots: Vec::new(),
        }
    }

    /// Capture the current state and append it under `name`.
    ///
    /// Returns `false` when the capture was empty and nothing was appended.
    ///
    /// # Errors
    ///
    /// Propagates `Connection` or `Scan` failures from the source, tagged
    /// with the snapshot name. The ledger is unchanged on error.
    pub fn record(&mut self, name: impl Into<String>) -> Result<bool> {
        let name = name.into();
        log_op_start!("record_snapshot", snapshot = %name);
        let start = std::time::Instant::now();

        let state = capture(&self.source, &self.config.ignore_tables).map_err(|e| {
            let err = ExError::new(e.kind())
                .with_op("record_snapshot")
                .with_snapshot(name.clone())
                .with_message("capture failed")
                .with_source(e);
            log_op_error!(
                "record_snapshot",
                err.clone(),
                duration_ms = start.elapsed().as_millis() as u64,
                snapshot = %name
            );
            err
        })?;

        let appended = !state.is_empty();
        let table_count = state.len();
        if appended {
            self.snapshots.push(Snapshot {
                name: name.clone(),
                state,
            });
        } else {
            tracing::debug!(snapshot = %name, "capture is empty, not appended");
        }

        log_op_end!(
            "record_snapshot",
            duration_ms = start.elapsed().as_millis() as u64,
            snapshot = %name,
            table_count = table_count,
            appended = appended
        );

        Ok(appended)
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn config(&self) -> &SnapshotConfig {
        &self.config
    }

    /// Consume the ledger into its final form.
    ///
    /// Full mode maps each name to its state. Diff mode maps
    /// `<name>_diff` to the diff from the preceding capture; the first
    /// capture has no key of its own. Performs no I/O.
    pub fn finalize(self) -> FinalResult {
        tracing::debug!(
            ledger_len = self.snapshots.len(),
            diff_snapshots = self.config.diff_snapshots,
            "finalizing ledger"
        );

        if !self.config.diff_snapshots {
            let mut states = BTreeMap::new();
            for snapshot in self.snapshots {
                states.insert(snapshot.name, snapshot.state);
            }
            return FinalResult::Full(states);
        }

        let mut diffs = BTreeMap::new();
        for pair in self.snapshots.windows(2) {
            let (previous, current) = (&pair[0], &pair[1]);
            diffs.insert(
                format!("{}{}", current.name, DIFF_KEY_SUFFIX),
                calculate_diff(&previous.state, &current.state),
            );
        }
        FinalResult::Diff(diffs)
    }
}
