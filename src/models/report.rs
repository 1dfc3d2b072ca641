use std::fmt;
use std::path::PathBuf;

use super::Document;

/// Printed when discovery finds nothing to combine.
pub const NO_DOCUMENTS_MESSAGE: &str = "No valid files found in the repository.";

/// Documents in their final order, plus the manifest entries that matched nothing.
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    pub documents: Vec<Document>,
    /// Whether a manifest took part in ordering.
    pub manifest_used: bool,
    /// Manifest entries with no matching discovered document, as written.
    pub missing: Vec<String>,
}

/// Summary of a successful combine.
#[derive(Debug, Clone)]
pub struct CombineReport {
    pub output: PathBuf,
    pub documents: Vec<Document>,
    pub manifest_used: bool,
    pub missing: Vec<String>,
}

impl CombineReport {
    pub fn file_count(&self) -> usize {
        self.documents.len()
    }
}

/// Result of a run.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// Output was written.
    Combined(CombineReport),
    /// Nothing eligible was found; no output was written.
    NoDocuments,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Combined(report) => write!(
                f,
                "Combined {} files into {}",
                report.file_count(),
                report.output.display()
            ),
            Self::NoDocuments => f.write_str(NO_DOCUMENTS_MESSAGE),
        }
    }
}
