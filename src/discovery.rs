//! Recursive discovery of candidate documents under a root directory.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::{DiscoveryPolicy, OutputMatch, SubdirectoryPolicy, DEFAULT_MASTER_MARKER};
use crate::error::{CombineError, Result};
use crate::models::Document;

/// Why a file was not admitted as a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    Extension,
    Master,
    Output,
    Subdirectory,
}

impl Rejection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Extension => "extension not allowed",
            Self::Master => "master file",
            Self::Output => "output file",
            Self::Subdirectory => "outside allowed subdirectories",
        }
    }
}

/// The configured output, in the forms the exclusion rules compare against.
#[derive(Debug, Clone)]
pub struct OutputTarget {
    file_name: Option<String>,
    path: PathBuf,
}

impl OutputTarget {
    pub fn new(output: &Path) -> Self {
        Self {
            file_name: output
                .file_name()
                .map(|name| name.to_string_lossy().into_owned()),
            path: absolute_path(output),
        }
    }

    fn matches(&self, doc: &Document, mode: OutputMatch) -> bool {
        match mode {
            OutputMatch::FileName => self.file_name.as_deref() == Some(doc.file_name()),
            OutputMatch::FullPath => self.path == doc.path,
        }
    }
}

impl DiscoveryPolicy {
    /// Check one document against the policy.
    ///
    /// `pinned` documents are named by the manifest and bypass the
    /// subdirectory rule only; extension, master and output exclusions always apply.
    pub fn rejection(
        &self,
        doc: &Document,
        output: &OutputTarget,
        pinned: bool,
    ) -> Option<Rejection> {
        if !self.extensions.iter().any(|ext| *ext == doc.extension) {
            return Some(Rejection::Extension);
        }

        let name = doc.file_name().to_lowercase();
        let marker = self.master_marker.to_lowercase();
        if name.contains(DEFAULT_MASTER_MARKER) || (!marker.is_empty() && name.contains(&marker)) {
            return Some(Rejection::Master);
        }

        if output.matches(doc, self.output_match) {
            return Some(Rejection::Output);
        }

        let in_scope = doc.is_top_level()
            || pinned
            || match &self.subdirectories {
                SubdirectoryPolicy::All => true,
                SubdirectoryPolicy::None => false,
                SubdirectoryPolicy::Only(names) => names.iter().any(|n| n == doc.file_name()),
            };
        if !in_scope {
            return Some(Rejection::Subdirectory);
        }

        None
    }

    pub fn admits(&self, doc: &Document, output: &OutputTarget, pinned: bool) -> bool {
        self.rejection(doc, output, pinned).is_none()
    }
}

/// Walk `root` and return every file the policy admits, sorted by relative path.
///
/// `pinned` holds normalized relative paths named by the manifest.
pub fn discover(
    root: &Path,
    output: &Path,
    policy: &DiscoveryPolicy,
    pinned: &HashSet<String>,
) -> Result<Vec<Document>> {
    if !root.exists() {
        return Err(CombineError::RootNotFound(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(CombineError::NotADirectory(root.to_path_buf()));
    }

    let root = fs::canonicalize(root).map_err(|source| CombineError::Read {
        path: root.to_path_buf(),
        source,
    })?;
    let output = OutputTarget::new(output);

    let mut documents = Vec::new();
    for entry in WalkDir::new(&root).min_depth(1).follow_links(true) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() > 0 => {
                tracing::warn!("Skipping unreadable entry: {}", e);
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let Some(doc) = Document::from_paths(&root, entry.path()) else {
            continue;
        };

        let is_pinned = pinned.contains(&doc.relative_path);
        match policy.rejection(&doc, &output, is_pinned) {
            None => {
                tracing::debug!(path = %doc.relative_path, "Found document");
                documents.push(doc);
            }
            Some(reason) => {
                tracing::debug!(
                    path = %doc.relative_path,
                    reason = reason.as_str(),
                    "Skipping file"
                );
            }
        }
    }

    documents.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
    Ok(documents)
}

/// Absolute form of `path` without requiring it to exist.
///
/// The parent directory is canonicalized when possible so the result is
/// comparable with walked paths.
fn absolute_path(path: &Path) -> PathBuf {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        match std::env::current_dir() {
            Ok(cwd) => cwd.join(path),
            Err(_) => path.to_path_buf(),
        }
    };

    if let Ok(canonical) = fs::canonicalize(&absolute) {
        return canonical;
    }
    if let (Some(parent), Some(name)) = (absolute.parent(), absolute.file_name()) {
        if let Ok(parent) = fs::canonicalize(parent) {
            return parent.join(name);
        }
    }
    absolute
}
