//! # Shelf Graphs
//!
//! Presentation projection of a snapshot for the report pages.
//!
//! This crate turns one [`Metrics`](shelf_common::Metrics) snapshot into a
//! [`ViewModel`]: sorted source, year and month summaries, highlight badges
//! and the JSON payloads consumed by Chart.js.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod badges;
pub mod charts;
pub mod colors;
pub mod view;

pub use badges::*;
pub use charts::*;
pub use colors::*;
pub use view::*;
