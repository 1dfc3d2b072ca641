use serde::Deserialize;

/// How documents are delimited in the combined output.
///
/// - `Markers`: HTML comment start/end markers around each document
/// - `Headings`: a `# path` heading per document, `---` rules between them
/// - `Plain`: raw contents separated by blank lines, no markers
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CombineStyle {
    #[default]
    Markers,
    Headings,
    Plain,
}

impl CombineStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Markers => "markers",
            Self::Headings => "headings",
            Self::Plain => "plain",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "markers" => Some(Self::Markers),
            "headings" => Some(Self::Headings),
            "plain" => Some(Self::Plain),
            _ => None,
        }
    }
}
