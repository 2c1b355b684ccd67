//! # Shelf Metrics
//!
//! Turns the reading-list sheet into dated [`Metrics`](shelf_common::Metrics)
//! snapshots.
//!
//! - [`normalizer`] validates one raw row.
//! - [`engine`] folds all rows into a snapshot in a single pass.
//! - [`source`] fetches rows from a workbook export.
//! - [`store`] persists snapshots by date.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod ages;
pub mod engine;
pub mod normalizer;
pub mod source;
pub mod store;

pub use ages::*;
pub use engine::*;
pub use normalizer::*;
pub use source::*;
pub use store::*;
