//! Atomic write primitives
//!
//! Uses temp→rename so a baseline is never left half-written

#![allow(clippy::result_large_err)]

use crate::errors::{io_error, Result};
use std::fs;
use std::path::Path;

/// Atomically write bytes to a file, creating parent directories
pub fn atomic_write(target_path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = target_path.parent() {
        fs::create_dir_all(parent).map_err(|e| io_error("create_baseline_dir", e))?;
    }

    let temp_path = target_path.with_extension("json.tmp");
    fs::write(&temp_path, content).map_err(|e| io_error("write_baseline_temp", e))?;
    fs::rename(&temp_path, target_path).map_err(|e| io_error("rename_baseline_temp", e))?;

    Ok(())
}
