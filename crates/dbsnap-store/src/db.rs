//! Database connection management
//!
//! Opening helpers for the connections a harness snapshots. Transaction
//! scope stays with the caller.

#![allow(clippy::result_large_err)]

use crate::errors::{from_rusqlite, Result};
use rusqlite::Connection;
use std::path::Path;

/// Open a SQLite database at the given path
pub fn open<P: AsRef<Path>>(path: P) -> Result<Connection> {
    Connection::open(path).map_err(from_rusqlite)
}

/// Open an in-memory SQLite database (for testing)
pub fn open_in_memory() -> Result<Connection> {
    Connection::open_in_memory().map_err(from_rusqlite)
}

/// Run a batch of schema or fixture SQL
pub fn execute_batch(conn: &Connection, sql: &str) -> Result<()> {
    conn.execute_batch(sql).map_err(from_rusqlite)
}
