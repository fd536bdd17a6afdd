//! Structured logging facility for dbsnap
//!
//! This module provides a canonical logging facility with:
//! - Single initialization point via `init(profile)`
//! - Structured logging macros (`log_op_start!`, `log_op_end!`, `log_op_error!`)
//! - Test capture mode for deterministic assertions
//!
//! # Usage
//!
//! ```rust
//! use dbsnap_core::logging_facility::{init, Profile};
//!
//! // Initialize once, e.g. from a test binary's first test
//! init(Profile::Development);
//! ```
//!
//! # Logging Ownership
//!
//! Ledger `record` and harness `run` own start/end events. The state reader
//! and storage backends only emit `tracing::debug!` details.

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
