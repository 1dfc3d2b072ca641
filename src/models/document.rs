use std::path::{Path, PathBuf};

/// A markdown or text file found under the root directory.
///
/// `relative_path` always uses `/` separators regardless of platform, so it
/// can be compared directly against manifest entries and sorted
/// deterministically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Absolute path to the file.
    pub path: PathBuf,
    /// Path relative to the root, `/`-separated.
    pub relative_path: String,
    /// File extension without the leading dot.
    pub extension: String,
}

impl Document {
    /// Build a document from its absolute path and the root it was found under.
    ///
    /// Returns `None` when `path` is not inside `root` or has no extension.
    pub fn from_paths(root: &Path, path: &Path) -> Option<Self> {
        let relative = path.strip_prefix(root).ok()?;
        let extension = path.extension()?.to_str()?.to_string();

        let relative_path = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        Some(Self {
            path: path.to_path_buf(),
            relative_path,
            extension,
        })
    }

    /// The file name component (e.g. `intro.md`).
    pub fn file_name(&self) -> &str {
        self.relative_path
            .rsplit('/')
            .next()
            .unwrap_or(&self.relative_path)
    }

    /// Whether the document sits directly in the root directory.
    pub fn is_top_level(&self) -> bool {
        !self.relative_path.contains('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_path_uses_forward_slashes() {
        let root = Path::new("/docs");
        let path = root.join("guide").join("intro.md");
        let doc = Document::from_paths(root, &path).unwrap();

        assert_eq!(doc.relative_path, "guide/intro.md");
        assert_eq!(doc.extension, "md");
        assert_eq!(doc.file_name(), "intro.md");
        assert!(!doc.is_top_level());
    }

    #[test]
    fn test_top_level_document() {
        let root = Path::new("/docs");
        let doc = Document::from_paths(root, &root.join("notes.txt")).unwrap();

        assert_eq!(doc.relative_path, "notes.txt");
        assert!(doc.is_top_level());
    }

    #[test]
    fn test_outside_root_is_rejected() {
        let root = Path::new("/docs");
        assert!(Document::from_paths(root, Path::new("/elsewhere/a.md")).is_none());
    }

    #[test]
    fn test_missing_extension_is_rejected() {
        let root = Path::new("/docs");
        assert!(Document::from_paths(root, &root.join("README")).is_none());
    }
}
