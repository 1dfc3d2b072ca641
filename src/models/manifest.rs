use serde::Deserialize;

/// One ordering directive from `reading_order.json`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ManifestEntry {
    /// Path of the document relative to the root.
    pub document: String,
}

impl ManifestEntry {
    pub fn new(document: impl Into<String>) -> Self {
        Self {
            document: document.into(),
        }
    }

    /// The entry's path in the same form discovery produces: `/`-separated,
    /// without a leading `./`.
    pub fn normalized_path(&self) -> String {
        normalize_relative_path(&self.document)
    }
}

/// An ordered list of manifest entries.
///
/// A manifest is either fully loaded or absent; there is no partially valid
/// state. Duplicate entries are kept as written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    pub entries: Vec<ManifestEntry>,
}

impl Manifest {
    pub fn new(entries: Vec<ManifestEntry>) -> Self {
        Self { entries }
    }

    /// Normalized paths of every entry, in manifest order.
    pub fn paths(&self) -> impl Iterator<Item = String> + '_ {
        self.entries.iter().map(ManifestEntry::normalized_path)
    }
}

/// On-disk shape of the manifest file.
///
/// ```json
/// { "reading_order": [ { "document": "intro.md" }, { "document": "guide/setup.md" } ] }
/// ```
#[derive(Debug, Deserialize)]
pub struct ManifestFile {
    pub reading_order: Option<Vec<ManifestEntry>>,
}

/// Normalize a relative path to `/` separators with no `./` prefix.
pub fn normalize_relative_path(path: &str) -> String {
    let unified = path.trim().replace('\\', "/");
    let mut rest = unified.as_str();
    while let Some(stripped) = rest.strip_prefix("./") {
        rest = stripped;
    }
    rest.split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect::<Vec<_>>()
        .join("/")
}
