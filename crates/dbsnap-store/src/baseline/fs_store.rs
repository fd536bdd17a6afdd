//! Filesystem baseline store
//!
//! Reads, writes, and compares JSON baselines keyed by test name

#![allow(clippy::result_large_err)]

use crate::baseline::atomic::atomic_write;
use crate::baseline::naming::baseline_path;
use crate::errors::{io_error, serialization_error, Result};
use dbsnap_core::errors::SnapshotError;
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that switches baselines to update mode
pub const UPDATE_ENV_VAR: &str = "DBSNAP_UPDATE_BASELINES";

/// Whether an existing baseline is compared against or overwritten
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BaselineMode {
    /// Compare against an existing baseline; write only if none exists
    #[default]
    Compare,
    /// Accept the new result as the baseline
    Update,
}

impl BaselineMode {
    /// Read the mode from `DBSNAP_UPDATE_BASELINES`
    pub fn from_env() -> Self {
        Self::from_env_value(std::env::var(UPDATE_ENV_VAR).ok().as_deref())
    }

    /// `1`, `true`, or `yes` (any case) select `Update`; anything else `Compare`
    pub fn from_env_value(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()) {
            Some(v) if v == "1" || v == "true" || v == "yes" => BaselineMode::Update,
            _ => BaselineMode::Compare,
        }
    }
}

/// What `assert_matches` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaselineOutcome {
    /// Existing baseline equals the result
    Matched,
    /// Baseline was created or replaced
    Written,
}

/// JSON baselines under one root directory
pub struct BaselineStore {
    root: PathBuf,
}

impl BaselineStore {
    /// Create a store rooted at `root`; the directory is created on first write
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Baseline file for a test name
    pub fn path_for(&self, test_name: &str) -> Result<PathBuf> {
        baseline_path(&self.root, test_name)
    }

    /// Load a stored baseline, if one exists
    pub fn load(&self, test_name: &str) -> Result<Option<Value>> {
        let path = self.path_for(test_name)?;
        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path).map_err(|e| io_error("read_baseline", e))?;
        let value = serde_json::from_slice(&bytes)
            .map_err(|e| serialization_error("parse_baseline", e))?;
        Ok(Some(value))
    }

    /// Write `actual` as the baseline for `test_name`
    pub fn write<T: Serialize>(&self, test_name: &str, actual: &T) -> Result<PathBuf> {
        let path = self.path_for(test_name)?;
        let mut bytes = serde_json::to_vec_pretty(actual)
            .map_err(|e| serialization_error("serialize_baseline", e))?;
        bytes.push(b'\n');
        atomic_write(&path, &bytes)?;
        Ok(path)
    }

    /// Compare `actual` with the stored baseline.
    ///
    /// Writes the baseline when none exists or `mode` is `Update`.
    /// Comparison is structural, so object key order does not matter.
    ///
    /// # Errors
    ///
    /// - `AssertionMismatch`: baseline exists and differs
    /// - `Io` / `Serialization`: baseline could not be read or written
    pub fn assert_matches<T: Serialize>(
        &self,
        test_name: &str,
        actual: &T,
        mode: BaselineMode,
    ) -> Result<BaselineOutcome> {
        let actual = serde_json::to_value(actual)
            .map_err(|e| serialization_error("serialize_baseline", e))?;

        let expected = match (mode, self.load(test_name)?) {
            (BaselineMode::Compare, Some(expected)) => expected,
            (_, existing) => {
                let path = self.write(test_name, &actual)?;
                tracing::debug!(
                    test_name = %test_name,
                    path = %path.display(),
                    replaced = existing.is_some(),
                    "baseline written"
                );
                return Ok(BaselineOutcome::Written);
            }
        };

        if expected == actual {
            return Ok(BaselineOutcome::Matched);
        }

        Err(SnapshotError::BaselineMismatch {
            test_name: test_name.to_string(),
            expected: pretty(&expected),
            actual: pretty(&actual),
        }
        .into())
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
