//! Concatenation of resolved documents into the combined output, and the
//! discover → order → concatenate → write pipeline.

use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::config::CombineConfig;
use crate::discovery;
use crate::error::{CombineError, Result};
use crate::manifest;
use crate::models::{CombineReport, CombineStyle, Document, Outcome, Resolution};
use crate::ordering;

/// Separator between documents in [`CombineStyle::Headings`] output.
const HEADING_SEPARATOR: &str = "\n\n---\n\n";
/// Separator between documents in [`CombineStyle::Plain`] output.
const PLAIN_SEPARATOR: &str = "\n\n\n\n\n\n\n\n";

/// Start marker line for a document. `path` is the canonical absolute path.
pub fn start_marker(path: &Path) -> String {
    format!("<!-- START OF FILE: {} -->", path.display())
}

/// End marker line for a document.
pub fn end_marker(path: &Path) -> String {
    format!("<!-- END OF FILE: {} -->", path.display())
}

/// Render one document's section. `index` is its position in the output.
fn render_section(style: CombineStyle, doc: &Document, content: &str, index: usize) -> String {
    match style {
        CombineStyle::Markers => format!(
            "\n{}\n\n{}\n\n{}\n",
            start_marker(&doc.path),
            content,
            end_marker(&doc.path)
        ),
        CombineStyle::Headings => {
            let separator = if index > 0 { HEADING_SEPARATOR } else { "" };
            format!("{}# {}\n\n{}", separator, doc.relative_path, content)
        }
        CombineStyle::Plain => {
            let separator = if index > 0 { PLAIN_SEPARATOR } else { "" };
            format!("{}{}", separator, content)
        }
    }
}

/// Create (or overwrite) `output` and write every document into it in order.
///
/// Any unreadable document aborts the write. Returns the number of documents written.
pub fn write_combined(documents: &[Document], output: &Path, style: CombineStyle) -> Result<usize> {
    let write_err = |source| CombineError::Write {
        path: output.to_path_buf(),
        source,
    };

    let file = File::create(output).map_err(write_err)?;
    let mut writer = BufWriter::new(file);

    for (index, doc) in documents.iter().enumerate() {
        let content = fs::read_to_string(&doc.path).map_err(|source| CombineError::Read {
            path: doc.path.clone(),
            source,
        })?;

        writer
            .write_all(render_section(style, doc, &content, index).as_bytes())
            .map_err(write_err)?;
        tracing::debug!(path = %doc.relative_path, bytes = content.len(), "Wrote document");
    }

    writer.flush().map_err(write_err)?;
    Ok(documents.len())
}

/// Discover and order documents for `config` without writing anything.
pub fn plan(config: &CombineConfig) -> Result<Resolution> {
    let manifest = manifest::resolve_source(&config.root, &config.manifest)
        .and_then(|path| manifest::load_manifest(&path));

    let pinned: HashSet<String> = manifest
        .as_ref()
        .map(|m| m.paths().collect())
        .unwrap_or_default();

    let documents = discovery::discover(&config.root, &config.output, &config.policy, &pinned)?;
    tracing::debug!("Discovered {} documents", documents.len());

    Ok(ordering::resolve(documents, manifest.as_ref()))
}

/// Run the whole pipeline for `config`.
///
/// When nothing is eligible, returns [`Outcome::NoDocuments`] and leaves the
/// output untouched.
pub fn run(config: &CombineConfig) -> Result<Outcome> {
    let resolution = plan(config)?;

    if resolution.documents.is_empty() {
        tracing::debug!("No documents under {}", config.root.display());
        return Ok(Outcome::NoDocuments);
    }

    let count = write_combined(&resolution.documents, &config.output, config.style)?;
    tracing::info!(
        "Wrote {} documents to {} ({} style)",
        count,
        config.output.display(),
        config.style.as_str()
    );

    Ok(Outcome::Combined(CombineReport {
        output: config.output.clone(),
        documents: resolution.documents,
        manifest_used: resolution.manifest_used,
        missing: resolution.missing,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(files: &[(&str, &str)]) -> (tempfile::TempDir, Vec<Document>) {
        let dir = tempfile::tempdir().unwrap();
        let docs = files
            .iter()
            .map(|(name, content)| {
                let path = dir.path().join(name);
                fs::write(&path, content).unwrap();
                Document::from_paths(dir.path(), &path).unwrap()
            })
            .collect();
        (dir, docs)
    }

    #[test]
    fn test_markers_format() {
        let (dir, docs) = setup(&[("a.md", "# A\nbody")]);
        let output = dir.path().join("out.md");

        let count = write_combined(&docs, &output, CombineStyle::Markers).unwrap();
        assert_eq!(count, 1);

        let path = docs[0].path.display();
        let expected = format!(
            "\n<!-- START OF FILE: {path} -->\n\n# A\nbody\n\n<!-- END OF FILE: {path} -->\n"
        );
        assert_eq!(fs::read_to_string(&output).unwrap(), expected);
    }

    #[test]
    fn test_headings_format() {
        let (dir, docs) = setup(&[("a.md", "alpha"), ("b.md", "beta")]);
        let output = dir.path().join("out.md");

        write_combined(&docs, &output, CombineStyle::Headings).unwrap();
        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "# a.md\n\nalpha\n\n---\n\n# b.md\n\nbeta"
        );
    }

    #[test]
    fn test_plain_format() {
        let (dir, docs) = setup(&[("a.txt", "one"), ("b.txt", "two")]);
        let output = dir.path().join("out.txt");

        write_combined(&docs, &output, CombineStyle::Plain).unwrap();
        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "one\n\n\n\n\n\n\n\ntwo"
        );
    }

    #[test]
    fn test_overwrites_existing_output() {
        let (dir, docs) = setup(&[("a.txt", "fresh")]);
        let output = dir.path().join("out.txt");
        fs::write(&output, "stale content that is longer than the new one").unwrap();

        write_combined(&docs, &output, CombineStyle::Plain).unwrap();
        assert_eq!(fs::read_to_string(&output).unwrap(), "fresh");
    }

    #[test]
    fn test_unreadable_document_fails() {
        let (dir, mut docs) = setup(&[("a.md", "a")]);
        let ghost = dir.path().join("ghost.md");
        docs.push(Document::from_paths(dir.path(), &ghost).unwrap());

        let result = write_combined(&docs, &dir.path().join("out.md"), CombineStyle::Markers);
        match result {
            Err(CombineError::Read { path, .. }) => assert_eq!(path, ghost),
            other => panic!("expected read error, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_utf8_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bin.txt");
        fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();
        let docs = vec![Document::from_paths(dir.path(), &path).unwrap()];

        let result = write_combined(&docs, &dir.path().join("out.md"), CombineStyle::Markers);
        assert!(matches!(result, Err(CombineError::Read { .. })));
    }
}
