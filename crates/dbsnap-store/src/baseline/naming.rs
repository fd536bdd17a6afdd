//! Baseline file naming
//!
//! Maps a test name to `<root>/<escaped>.json`. ASCII letters, digits and
//! `-` are kept, `_` becomes `__`, and every other byte becomes `_XX`
//! (uppercase hex). The mapping is injective and never yields a path
//! separator, so distinct test names always get distinct files inside the
//! root.

#![allow(clippy::result_large_err)]

use crate::errors::Result;
use dbsnap_core::errors::SnapshotError;
use std::path::{Path, PathBuf};

/// Compute the baseline path for a test name
pub fn baseline_path(root: &Path, test_name: &str) -> Result<PathBuf> {
    if test_name.trim().is_empty() {
        return Err(SnapshotError::InvalidBaselineName {
            reason: "test name is empty".to_string(),
        }
        .into());
    }

    let mut file_stem = String::with_capacity(test_name.len());
    for byte in test_name.bytes() {
        match byte {
            b'_' => file_stem.push_str("__"),
            b'-' => file_stem.push('-'),
            b if b.is_ascii_alphanumeric() => file_stem.push(char::from(b)),
            b => file_stem.push_str(&format!("_{:02X}", b)),
        }
    }

    Ok(root.join(format!("{}.json", file_stem)))
}
