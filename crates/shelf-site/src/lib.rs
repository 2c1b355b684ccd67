//! # Shelf Site
//!
//! Static report site for Shelf snapshots.
//!
//! [`Regenerator`] walks every stored snapshot, projects it through
//! [`shelf_graphs::ViewModel`] and hands it to a [`SiteRenderer`]. The
//! bundled [`HtmlRenderer`] writes plain HTML pages that draw their charts
//! with Chart.js.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod evolution;
pub mod html;
pub mod regenerator;
pub mod render;

pub use evolution::*;
pub use html::*;
pub use regenerator::*;
pub use render::*;
