//! Error handling for dbsnap-store
//!
//! Wraps dbsnap-core ExError with store-specific helpers

use dbsnap_core::errors::{ExError, ExErrorKind, SnapshotError};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create a database error from rusqlite::Error
pub fn from_rusqlite(err: rusqlite::Error) -> ExError {
    ExError::new(ExErrorKind::Connection)
        .with_op("sqlite")
        .with_message(err.to_string())
}

/// Map a catalog query failure to a connection error
pub fn enumeration_error(err: rusqlite::Error) -> ExError {
    SnapshotError::TableEnumerationFailed {
        reason: err.to_string(),
    }
    .into()
}

/// Map a scan failure, recognising tables dropped since enumeration
pub fn scan_error(table: &str, err: rusqlite::Error) -> ExError {
    let reason = err.to_string();
    if reason.contains("no such table") {
        SnapshotError::TableVanished {
            table: table.to_string(),
        }
        .into()
    } else {
        SnapshotError::ScanFailed {
            table: table.to_string(),
            reason,
        }
        .into()
    }
}

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}

/// Create a serialization error for a baseline operation
pub fn serialization_error(operation: &str, err: serde_json::Error) -> ExError {
    ExError::from(SnapshotError::from(err)).with_op(operation.to_string())
}
