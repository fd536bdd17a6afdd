//! dbsnap Store - SQLite backend, baselines, and the test harness
//!
//! Provides:
//! - `SqliteSource`: the state reader's view of a `rusqlite` connection
//! - Connection helpers for file and in-memory databases
//! - File-backed baselines compared against finalized ledgers
//! - `SnapshotHarness`: setup, before/after captures, and baseline assertion
//!   composed explicitly around a test body

pub mod baseline;
pub mod db;
pub mod errors;
pub mod harness;
pub mod sqlite_source;

// Re-export key types
pub use baseline::{BaselineMode, BaselineOutcome, BaselineStore};
pub use errors::Result;
pub use harness::SnapshotHarness;
pub use sqlite_source::SqliteSource;
