use thiserror::Error;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code usable for programmatic handling
/// and test assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Caller input
    InvalidInput,

    // Data access
    /// Database handle is invalid or closed, or table enumeration failed
    Connection,
    /// A table vanished between enumeration and scan, or a scan query failed
    Scan,

    // Baseline comparison
    /// Finalized result differs from the stored baseline
    AssertionMismatch,

    // Integration/IO
    Io,
    Serialization,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::Connection => "ERR_CONNECTION",
            ExErrorKind::Scan => "ERR_SCAN",
            ExErrorKind::AssertionMismatch => "ERR_ASSERTION_MISMATCH",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Classification fields for programmatic handling plus context for debugging.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    table: Option<String>,
    snapshot: Option<String>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            table: None,
            snapshot: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add table name context
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    /// Add snapshot name context
    pub fn with_snapshot(mut self, name: impl Into<String>) -> Self {
        self.snapshot = Some(name.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn table(&self) -> Option<&str> {
        self.table.as_deref()
    }

    pub fn snapshot(&self) -> Option<&str> {
        self.snapshot.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(table) = &self.table {
            write!(f, " (table: {})", table)?;
        }
        if let Some(snapshot) = &self.snapshot {
            write!(f, " (snapshot: {})", snapshot)?;
        }
        if let Some(source) = &self.source {
            write!(f, "; caused by {}", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Domain errors raised while capturing and comparing snapshots
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SnapshotError {
    /// Tables could not be enumerated from the handle
    #[error("Cannot enumerate tables: {reason}")]
    TableEnumerationFailed { reason: String },

    /// Table was listed but no longer exists at scan time
    #[error("Table vanished before scan: {table}")]
    TableVanished { table: String },

    /// Scan query failed
    #[error("Scan of table {table} failed: {reason}")]
    ScanFailed { table: String, reason: String },

    /// Finalized result differs from the stored baseline
    #[error("Snapshot for {test_name} does not match baseline")]
    BaselineMismatch {
        test_name: String,
        expected: String,
        actual: String,
    },

    /// Baseline name cannot be mapped to a file
    #[error("Invalid baseline name: {reason}")]
    InvalidBaselineName { reason: String },

    /// Serialization failed
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl From<SnapshotError> for ExError {
    fn from(err: SnapshotError) -> Self {
        match err {
            SnapshotError::TableEnumerationFailed { reason } => {
                ExError::new(ExErrorKind::Connection)
                    .with_op("list_tables")
                    .with_message(format!("Cannot enumerate tables: {}", reason))
            }

            SnapshotError::TableVanished { table } => ExError::new(ExErrorKind::Scan)
                .with_op("scan_table")
                .with_message("Table vanished before scan")
                .with_table(table),

            SnapshotError::ScanFailed { table, reason } => ExError::new(ExErrorKind::Scan)
                .with_op("scan_table")
                .with_message(reason)
                .with_table(table),

            SnapshotError::BaselineMismatch {
                test_name,
                expected,
                actual,
            } => ExError::new(ExErrorKind::AssertionMismatch)
                .with_op("assert_baseline")
                .with_message(format!(
                    "snapshot for {} does not match baseline\n--- expected\n{}\n+++ actual\n{}",
                    test_name, expected, actual
                )),

            SnapshotError::InvalidBaselineName { reason } => {
                ExError::new(ExErrorKind::InvalidInput)
                    .with_op("baseline_path")
                    .with_message(format!("Invalid baseline name: {}", reason))
            }

            SnapshotError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
        }
    }
}

impl From<serde_json::Error> for SnapshotError {
    fn from(err: serde_json::Error) -> Self {
        SnapshotError::Serialization {
            message: err.to_string(),
        }
    }
}
