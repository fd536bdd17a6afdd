//! Canonical schema constants for structured logging and events
//!
//! `tracing` macros take field names as literal identifiers, so call sites
//! spell them out; these constants are the names log consumers (and the test
//! capture layer) read back.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// record_snapshot / snapshot_test context
pub const FIELD_SNAPSHOT_NAME: &str = "snapshot";
pub const FIELD_TEST_NAME: &str = "test_name";
pub const FIELD_TABLE_COUNT: &str = "table_count";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
