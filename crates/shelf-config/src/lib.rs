//! # Shelf Config
//!
//! Validated YAML configuration for Shelf.
//!
//! This crate provides the configuration schema, its defaults, loading
//! from `shelf.yaml` with `SHELF_*` environment overrides, and validation.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod defaults;
pub mod loader;
pub mod schema;
pub mod validation;

pub use defaults::*;
pub use loader::*;
pub use schema::*;
pub use validation::*;
