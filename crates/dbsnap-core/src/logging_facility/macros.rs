//! Operation boundary logging macros
//!
//! Each operation emits exactly one `start` and one `end` or `end_error`
//! event, tagged with `component`, `op` and `event`. Extra fields are passed
//! through to `tracing` unchanged (`snapshot = %name`, `table_count = 3`).
//!
//! Crates using these macros must depend on `dbsnap-core-types` and
//! `tracing`.

#[doc(hidden)]
#[macro_export]
macro_rules! __log_op {
    ($level:ident, $event:ident, $op:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            component = module_path!(),
            op = $op,
            event = dbsnap_core_types::schema::$event,
            $($($field)*)?
        )
    };
}

/// Log the start of an operation
///
/// ```
/// # use dbsnap_core::log_op_start;
/// log_op_start!("record_snapshot");
/// log_op_start!("record_snapshot", snapshot = "db_before");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)*)?) => {
        $crate::__log_op!(info, EVENT_START, $op $(, $($field)*)?);
    };
}

/// Log the successful end of an operation; `duration_ms` is required
///
/// ```
/// # use dbsnap_core::log_op_end;
/// log_op_end!("record_snapshot", duration_ms = 3);
/// log_op_end!("record_snapshot", duration_ms = 3, table_count = 2);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {
        $crate::__log_op!(info, EVENT_END, $op, duration_ms = $duration $(, $($field)*)?);
    };
}

/// Log a failed operation with the error's kind and stable code
///
/// `$err` is anything convertible into `ExError`.
///
/// ```
/// # use dbsnap_core::log_op_error;
/// # use dbsnap_core::errors::SnapshotError;
/// let err = SnapshotError::TableVanished { table: "users".to_string() };
/// log_op_error!("record_snapshot", err, duration_ms = 10);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        $crate::__log_op!(
            error,
            EVENT_END_ERROR,
            $op,
            duration_ms = $duration,
            err.kind = ?ex_err.kind(),
            err.code = ex_err.code()
            $(, $($field)*)?
        );
    }};
}
