//! Domain models for combine-docs.
//!
//! # Core Concepts
//!
//! - [`Document`]: A discovered markdown or text file eligible for combination.
//!   Immutable once discovered.
//! - [`Manifest`]: Optional ordering file (`reading_order.json`) listing
//!   [`ManifestEntry`] items whose order becomes the output order.
//! - [`CombineStyle`]: How documents are delimited in the combined output.
//! - [`CombineReport`] / [`Outcome`]: Result of a single run.
//!
//! Everything here is built fresh per invocation and discarded afterwards;
//! the combined output file is the only thing that persists.

mod document;
mod manifest;
mod report;
mod style;

pub use document::*;
pub use manifest::*;
pub use report::*;
pub use style::*;
