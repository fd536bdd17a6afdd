//! File-backed baselines
//!
//! Provides:
//! - One JSON baseline per test name under an explicit directory
//! - Atomic writes on first run or when updating
//! - Structural JSON comparison against a finalized ledger

mod atomic;
mod fs_store;
mod naming;

pub use fs_store::{BaselineMode, BaselineOutcome, BaselineStore, UPDATE_ENV_VAR};
pub use naming::baseline_path;
