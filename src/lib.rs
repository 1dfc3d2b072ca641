//! Combine markdown and text documents from a directory tree into a single file.
//!
//! The pipeline is linear: [`discovery`] finds eligible documents, [`manifest`]
//! loads the optional `reading_order.json`, [`ordering`] resolves the final
//! order and [`combine`] writes the output.

pub mod combine;
pub mod config;
pub mod discovery;
pub mod error;
pub mod manifest;
pub mod models;
pub mod ordering;

pub use combine::{plan, run, write_combined};
pub use config::{CombineConfig, DiscoveryPolicy, ManifestSource, OutputMatch, SubdirectoryPolicy};
pub use error::CombineError;
