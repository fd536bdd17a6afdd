//! Row-level diff engine.
//!
//! Compares two captured [`DatabaseState`](crate::model::DatabaseState)s
//! table by table and reports rows added and removed.
//!
//! ## Entry point
//!
//! ```
//! use dbsnap_core::diff::calculate_diff;
//! use dbsnap_core::model::{DatabaseState, Row};
//!
//! let mut before = DatabaseState::new();
//! before.insert("t".to_string(), vec![Row::from([("id", 1)])]);
//! let mut after = before.clone();
//! after.get_mut("t").unwrap().push(Row::from([("id", 2)]));
//!
//! let diff = calculate_diff(&before, &after);
//! assert_eq!(diff["t"].added, vec![Row::from([("id", 2)])]);
//! assert!(diff["t"].removed.is_empty());
//! ```
//!
//! ## Guarantees
//!
//! - **Full-row identity**: rows match only when every column matches; an
//!   updated row shows up as one removal plus one addition.
//! - **Order**: added rows keep the later state's order, removed rows keep
//!   the earlier state's order.
//! - **Quiet tables omitted**: tables with no added or removed rows are absent.

pub mod engine;
pub mod model;

pub use engine::calculate_diff;
pub use model::{DatabaseDiff, TableDiff};
