//! Run configuration.
//!
//! A [`CombineConfig`] carries everything one run needs, so the pipeline never
//! reads from stdin or global state. Users can keep persistent [`Defaults`] in
//! `<config_dir>/combine-docs/config.json`; command-line flags override them.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dirs::config_dir;
use serde::Deserialize;

use crate::models::CombineStyle;

const APP_NAME: &str = "combine-docs";
const CONFIG_FILE: &str = "config.json";

/// Well-known manifest file name at the top of the root directory.
pub const MANIFEST_FILE: &str = "reading_order.json";
/// Output written when none is given.
pub const DEFAULT_OUTPUT: &str = "master.md";
/// Names containing this (case-insensitive) are previous outputs and never inputs.
pub const DEFAULT_MASTER_MARKER: &str = "master.md";

/// Where the ordering manifest comes from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ManifestSource {
    /// `<root>/reading_order.json`
    #[default]
    Default,
    /// An explicit file, used instead of the root's manifest.
    Path(PathBuf),
    /// Ignore any manifest and use path order.
    Disabled,
}

/// Which files below the top level are eligible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubdirectoryPolicy {
    /// Walk the whole tree.
    #[default]
    All,
    /// Top-level files only.
    None,
    /// In subdirectories, only files with one of these names.
    Only(Vec<String>),
}

/// How the output file is recognised among candidates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputMatch {
    /// Any candidate sharing the output's file name is excluded, in any directory.
    #[default]
    FileName,
    /// Only the output file itself is excluded.
    FullPath,
}

/// Declarative allow-list deciding which files are documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryPolicy {
    /// Allowed extensions without the dot. Compared case-sensitively.
    pub extensions: Vec<String>,
    /// Extra substring marking a previous combined output, matched
    /// case-insensitively. Names containing `master.md` are always excluded;
    /// an empty marker adds nothing.
    pub master_marker: String,
    pub subdirectories: SubdirectoryPolicy,
    pub output_match: OutputMatch,
}

impl Default for DiscoveryPolicy {
    fn default() -> Self {
        Self {
            extensions: vec!["md".to_string(), "txt".to_string()],
            master_marker: DEFAULT_MASTER_MARKER.to_string(),
            subdirectories: SubdirectoryPolicy::All,
            output_match: OutputMatch::FileName,
        }
    }
}

/// Everything a single run needs.
#[derive(Debug, Clone)]
pub struct CombineConfig {
    pub root: PathBuf,
    pub output: PathBuf,
    pub manifest: ManifestSource,
    pub policy: DiscoveryPolicy,
    pub style: CombineStyle,
}

impl CombineConfig {
    /// Config with default policy, default manifest lookup, and marker style.
    pub fn new(root: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            output: output.into(),
            manifest: ManifestSource::Default,
            policy: DiscoveryPolicy::default(),
            style: CombineStyle::default(),
        }
    }

    pub fn with_manifest(mut self, manifest: ManifestSource) -> Self {
        self.manifest = manifest;
        self
    }

    pub fn with_policy(mut self, policy: DiscoveryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_style(mut self, style: CombineStyle) -> Self {
        self.style = style;
        self
    }
}

/// Persistent user defaults. Every field is optional; unset fields fall back
/// to the built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub extensions: Option<Vec<String>>,
    pub master_marker: Option<String>,
    pub style: Option<CombineStyle>,
    pub output: Option<PathBuf>,
}

impl Defaults {
    /// Load defaults from `path`, or the user's config directory when `None`.
    /// Returns built-in defaults if the file doesn't exist or fails to parse.
    pub fn load(path: Option<&Path>) -> Self {
        match Self::try_load(path) {
            Ok(defaults) => defaults,
            Err(e) => {
                tracing::warn!("Failed to load config, using defaults: {:#}", e);
                Self::default()
            }
        }
    }

    pub fn try_load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => get_config_path()?,
        };
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).context("Failed to read config file")?;

        let defaults = serde_json::from_str(&content).context("Failed to parse config file")?;

        Ok(defaults)
    }

    /// Policy with these defaults applied over the built-in one.
    pub fn policy(&self) -> DiscoveryPolicy {
        let mut policy = DiscoveryPolicy::default();
        if let Some(ref extensions) = self.extensions {
            policy.extensions = extensions
                .iter()
                .map(|e| e.trim_start_matches('.').to_string())
                .collect();
        }
        match self.master_marker.as_deref().map(str::trim) {
            Some("") => tracing::warn!("Ignoring empty master_marker in config"),
            Some(marker) => policy.master_marker = marker.to_string(),
            None => {}
        }
        policy
    }
}

fn get_config_path() -> Result<PathBuf> {
    let mut path =
        config_dir().ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
    path.push(APP_NAME);
    path.push(CONFIG_FILE);
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let defaults = Defaults::load(Some(&dir.path().join("absent.json")));
        assert_eq!(defaults, Defaults::default());
    }

    #[test]
    fn test_invalid_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(Defaults::try_load(Some(&path)).is_err());
        assert_eq!(Defaults::load(Some(&path)), Defaults::default());
    }

    #[test]
    fn test_partial_file_overrides_policy() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{ "extensions": [".md", "rst"], "master_marker": "COMBINED", "style": "headings" }"#,
        )
        .unwrap();

        let defaults = Defaults::load(Some(&path));
        assert_eq!(defaults.style, Some(CombineStyle::Headings));
        assert!(defaults.output.is_none());

        let policy = defaults.policy();
        assert_eq!(policy.extensions, vec!["md", "rst"]);
        assert_eq!(policy.master_marker, "COMBINED");
        assert_eq!(policy.subdirectories, SubdirectoryPolicy::All);
    }

    #[test]
    fn test_empty_marker_keeps_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "master_marker": "  " }"#).unwrap();

        let policy = Defaults::load(Some(&path)).policy();
        assert_eq!(policy.master_marker, DEFAULT_MASTER_MARKER);
    }

    #[test]
    fn test_builder_sets_fields() {
        let config = CombineConfig::new("/docs", "out.md")
            .with_manifest(ManifestSource::Disabled)
            .with_style(CombineStyle::Plain);

        assert_eq!(config.manifest, ManifestSource::Disabled);
        assert_eq!(config.style, CombineStyle::Plain);
        assert_eq!(config.policy, DiscoveryPolicy::default());
    }
}
