//! Snapshot harness: explicit composition around a test body.
//!
//! `run` performs, in order:
//! 1. the optional setup callback
//! 2. capture `"db_before"`
//! 3. the test body, which may record its own named snapshots
//! 4. capture `"db_after"`
//! 5. finalize and assert against the baseline for the test name
//!
//! The harness never opens, commits, or rolls back transactions. Pass a
//! `Transaction` (it derefs to `Connection`) to keep a test's writes scoped.
//!
//! ## Logging Ownership
//!
//! `run` owns `snapshot_test` start/end events; the ledger owns
//! `record_snapshot`.

#![allow(clippy::result_large_err)]

use crate::baseline::{BaselineMode, BaselineStore};
use crate::errors::Result;
use crate::sqlite_source::SqliteSource;
use dbsnap_core::{log_op_end, log_op_error, log_op_start};
use dbsnap_core::{FinalResult, SnapshotConfig, SnapshotLedger};
use rusqlite::Connection;
use std::path::PathBuf;

/// Name of the capture taken before the test body
pub const BEFORE_SNAPSHOT: &str = "db_before";
/// Name of the capture taken after the test body
pub const AFTER_SNAPSHOT: &str = "db_after";

/// Callback run against the connection before the first capture
pub type SetupFn = Box<dyn Fn(&Connection) -> Result<()>>;

/// Ledger type handed to test bodies
pub type SqliteLedger<'c> = SnapshotLedger<SqliteSource<'c>>;

/// Per-suite snapshot configuration plus the baseline location.
pub struct SnapshotHarness {
    baselines: BaselineStore,
    config: SnapshotConfig,
    mode: BaselineMode,
    setup: Option<SetupFn>,
}

impl SnapshotHarness {
    /// Harness storing baselines under `baseline_dir`.
    ///
    /// The baseline mode is read from `DBSNAP_UPDATE_BASELINES`.
    pub fn new(baseline_dir: impl Into<PathBuf>) -> Self {
        Self {
            baselines: BaselineStore::new(baseline_dir),
            config: SnapshotConfig::default(),
            mode: BaselineMode::from_env(),
            setup: None,
        }
    }

    pub fn with_config(mut self, config: SnapshotConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_mode(mut self, mode: BaselineMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_setup<F>(mut self, setup: F) -> Self
    where
        F: Fn(&Connection) -> Result<()> + 'static,
    {
        self.setup = Some(Box::new(setup));
        self
    }

    pub fn baselines(&self) -> &BaselineStore {
        &self.baselines
    }

    pub fn config(&self) -> &SnapshotConfig {
        &self.config
    }

    /// Run `body` between before/after captures and assert the result.
    ///
    /// Returns the finalized result when it matches (or was written as) the
    /// baseline.
    ///
    /// # Errors
    ///
    /// - Errors from setup or body, unchanged; the baseline is untouched
    /// - `Connection` / `Scan` from any capture
    /// - `AssertionMismatch` when the result differs from the baseline
    pub fn run<'c, F>(&self, test_name: &str, conn: &'c Connection, body: F) -> Result<FinalResult>
    where
        F: FnOnce(&'c Connection, &mut SqliteLedger<'c>) -> Result<()>,
    {
        log_op_start!("snapshot_test", test_name = %test_name);
        let start = std::time::Instant::now();

        let result = self.run_impl(test_name, conn, body).map_err(|e| {
            log_op_error!(
                "snapshot_test",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64,
                test_name = %test_name
            );
            e
        })?;

        log_op_end!(
            "snapshot_test",
            duration_ms = start.elapsed().as_millis() as u64,
            test_name = %test_name,
            result_keys = result.len()
        );

        Ok(result)
    }

    fn run_impl<'c, F>(&self, test_name: &str, conn: &'c Connection, body: F) -> Result<FinalResult>
    where
        F: FnOnce(&'c Connection, &mut SqliteLedger<'c>) -> Result<()>,
    {
        if let Some(setup) = &self.setup {
            setup(conn)?;
        }

        let mut ledger = SnapshotLedger::new(SqliteSource::new(conn), self.config.clone());
        ledger.record(BEFORE_SNAPSHOT)?;
        body(conn, &mut ledger)?;
        ledger.record(AFTER_SNAPSHOT)?;

        let result = ledger.finalize();
        self.baselines.assert_matches(test_name, &result, self.mode)?;
        Ok(result)
    }
}
