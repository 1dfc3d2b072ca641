use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use combine_docs::config::{Defaults, DEFAULT_OUTPUT};
use combine_docs::models::{CombineStyle, NO_DOCUMENTS_MESSAGE};
use combine_docs::{combine, CombineConfig, ManifestSource, OutputMatch, SubdirectoryPolicy};

#[derive(Parser)]
#[command(name = "combine-docs")]
#[command(about = "Combine markdown and text documents into a single file")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Combine documents under a directory into one output file
    Combine(RunArgs),
    /// Print the resolved document order without writing anything
    List(RunArgs),
}

#[derive(Args)]
struct RunArgs {
    /// Root directory to scan
    root: PathBuf,

    /// Output file [default: master.md]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Ordering manifest to use instead of <ROOT>/reading_order.json
    #[arg(long, conflicts_with = "no_manifest")]
    manifest: Option<PathBuf>,

    /// Ignore any ordering manifest
    #[arg(long)]
    no_manifest: bool,

    /// Output style: markers, headings or plain
    #[arg(long, value_parser = parse_style)]
    style: Option<CombineStyle>,

    /// Allowed extension (repeatable) [default: md, txt]
    #[arg(long = "ext")]
    extensions: Vec<String>,

    /// Only take files from the top level of ROOT (manifest entries still count)
    #[arg(long)]
    top_level_only: bool,

    /// File names allowed from subdirectories (repeatable)
    #[arg(long = "subdir-file", conflicts_with = "top_level_only")]
    subdir_files: Vec<String>,

    /// Exclude only the output file itself rather than every file sharing its name
    #[arg(long)]
    match_output_path: bool,

    /// Defaults file [default: <config dir>/combine-docs/config.json]
    #[arg(long)]
    config: Option<PathBuf>,
}

fn parse_style(s: &str) -> Result<CombineStyle, String> {
    CombineStyle::from_str(s)
        .ok_or_else(|| format!("invalid style '{}'. Must be: markers, headings, or plain", s))
}

impl RunArgs {
    /// Merge flags over the user's defaults file.
    fn into_config(self) -> CombineConfig {
        let defaults = Defaults::load(self.config.as_deref());

        let mut policy = defaults.policy();
        if !self.extensions.is_empty() {
            policy.extensions = self
                .extensions
                .iter()
                .map(|e| e.trim_start_matches('.').to_string())
                .collect();
        }
        if self.top_level_only {
            policy.subdirectories = SubdirectoryPolicy::None;
        } else if !self.subdir_files.is_empty() {
            policy.subdirectories = SubdirectoryPolicy::Only(self.subdir_files);
        }
        if self.match_output_path {
            policy.output_match = OutputMatch::FullPath;
        }

        let manifest = match (self.manifest, self.no_manifest) {
            (_, true) => ManifestSource::Disabled,
            (Some(path), false) => ManifestSource::Path(path),
            (None, false) => ManifestSource::Default,
        };

        let output = self
            .output
            .or(defaults.output)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));
        let style = self.style.or(defaults.style).unwrap_or_default();

        CombineConfig::new(self.root, output)
            .with_manifest(manifest)
            .with_policy(policy)
            .with_style(style)
    }
}

/// Initialize tracing with output to stdout
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "combine_docs=info".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    match cli.command {
        Commands::Combine(args) => {
            let config = args.into_config();
            let outcome = combine::run(&config)
                .with_context(|| format!("Failed to combine {}", config.root.display()))?;

            println!("{}", outcome);
        }
        Commands::List(args) => {
            let config = args.into_config();
            let resolution = combine::plan(&config)
                .with_context(|| format!("Failed to scan {}", config.root.display()))?;

            if resolution.documents.is_empty() {
                println!("{}", NO_DOCUMENTS_MESSAGE);
            }
            for doc in &resolution.documents {
                println!("{}", doc.relative_path);
            }
        }
    }

    Ok(())
}
