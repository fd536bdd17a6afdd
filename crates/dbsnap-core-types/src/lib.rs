//! Core types shared across dbsnap facilities
//!
//! - **Schema constants**: Canonical field keys and event names used by the
//!   logging macros and the error facility

pub mod schema;
