//! dbsnap Core - Row-level database snapshots and diffs for tests
//!
//! This crate provides the storage-agnostic snapshot/diff engine:
//! - Dynamic row model (`SqlValue`, `Row`, `DatabaseState`)
//! - The `StateSource` seam and the state reader (`capture`)
//! - Full-row set-difference diffs between two states
//! - The snapshot ledger with full-state and diff finalization
//! - Error and logging facilities shared by the workspace
//!
//! Storage backends live in `dbsnap-store`.

pub mod config;
pub mod diff;
pub mod errors;
pub mod ledger;
pub mod logging_facility;
pub mod model;
pub mod reader;

// Re-export commonly used types
pub use config::SnapshotConfig;
pub use diff::{calculate_diff, DatabaseDiff, TableDiff};
pub use errors::{ExError, ExErrorKind, Result, SnapshotError};
pub use ledger::{FinalResult, Snapshot, SnapshotLedger};
pub use model::{DatabaseState, Row, SqlValue, TableState};
pub use reader::{capture, StateSource};
