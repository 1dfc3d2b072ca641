//! Loading of the optional `reading_order.json` manifest.
//!
//! A missing manifest is normal. A malformed one (bad JSON, or no
//! `reading_order` key) is reported with a warning and treated as missing;
//! it never aborts the run.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::{ManifestSource, MANIFEST_FILE};
use crate::models::{Manifest, ManifestFile};

/// Why a manifest file could not be used.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Failed to read manifest: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid manifest JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Manifest has no `reading_order` key")]
    MissingKey,
}

/// Manifest path for a source, or `None` when manifests are disabled.
pub fn resolve_source(root: &Path, source: &ManifestSource) -> Option<PathBuf> {
    match source {
        ManifestSource::Default => Some(root.join(MANIFEST_FILE)),
        ManifestSource::Path(path) => Some(path.clone()),
        ManifestSource::Disabled => None,
    }
}

/// Read the manifest at `path`.
///
/// `Ok(None)` if the file does not exist.
pub fn try_load_manifest(path: &Path) -> Result<Option<Manifest>, ManifestError> {
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)?;
    let file: ManifestFile = serde_json::from_str(&content)?;
    let entries = file.reading_order.ok_or(ManifestError::MissingKey)?;

    Ok(Some(Manifest::new(entries)))
}

/// Read the manifest at `path`, downgrading every failure to "no manifest".
pub fn load_manifest(path: &Path) -> Option<Manifest> {
    match try_load_manifest(path) {
        Ok(Some(manifest)) => {
            tracing::info!(
                "Found {}, using specified document order ({} entries)",
                path.display(),
                manifest.entries.len()
            );
            Some(manifest)
        }
        Ok(None) => {
            tracing::debug!("No manifest at {}", path.display());
            None
        }
        Err(e) => {
            tracing::warn!(
                "{} found but could not be parsed properly: {}",
                path.display(),
                e
            );
            None
        }
    }
}
