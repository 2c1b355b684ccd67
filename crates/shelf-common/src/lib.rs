//! # Shelf Common
//!
//! Shared snapshot types, errors, logging and utilities for Shelf.
//!
//! This crate provides the foundational types used across all other crates
//! in the Shelf workspace: the [`Metrics`] snapshot and its parts, the
//! [`ShelfError`] type and the tracing bootstrap.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod logging;
pub mod types;
pub mod utils;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use error::*;
pub use logging::*;
pub use types::*;
pub use utils::*;
