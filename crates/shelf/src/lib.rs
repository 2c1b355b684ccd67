//! # Shelf
//!
//! Command line front end for Shelf.
//!
//! `shelf metrics` turns the exported reading-list workbook into a dated
//! snapshot; `shelf analytics` regenerates the static report site and its
//! per-date archive from every stored snapshot.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod commands;
pub mod error;

pub use cli::*;
pub use commands::*;
pub use error::*;
