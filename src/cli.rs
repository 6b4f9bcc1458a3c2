use crate::config::{CliOverrides, Config};
use crate::error::Result;
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "md2text")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Convert markdown files to one plain-text file")]
#[command(
    long_about = "md2text walks a directory (or unpacks a zip archive) of markdown files, \
                       strips markup from each one, and concatenates the plain text into a \
                       single output file."
)]
#[command(after_help = "EXAMPLES:\n  \
    md2text --input docs/\n  \
    md2text --input DevDocs.zip --output devdocs.txt\n  \
    md2text --input notes/ --formats md,mdx --exclude drafts,archive\n  \
    md2text --input docs/ --config my-config.toml --verbose\n")]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Directory containing markdown files, or a path to a .zip archive
    #[arg(short, long, required_unless_present = "generate_config")]
    pub input: Option<PathBuf>,

    /// Destination file for the concatenated plain text
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// File extensions to treat as markdown (comma-separated)
    #[arg(short, long, help = "File extensions to convert (e.g., md,markdown,mdx)")]
    pub formats: Option<String>,

    /// Directories to exclude from the scan
    #[arg(short, long, value_delimiter = ',')]
    pub exclude: Option<Vec<String>>,

    /// Maximum file size in MB
    #[arg(long, help = "Maximum file size to convert (in MB)")]
    pub max_size: Option<u64>,

    /// Configuration file path
    #[arg(short, long, help = "Path to TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Verbose output level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Dry run (show what would be done without executing)
    #[arg(long, help = "Show what would be converted without actually doing it")]
    pub dry_run: bool,

    /// Generate sample configuration file
    #[arg(long, help = "Generate a sample configuration file")]
    pub generate_config: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON formatted output
    Json,
    /// Plain text output
    Plain,
}

impl Cli {
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_with_defaults(self.config.as_ref())?;

        let overrides = self.create_cli_overrides();
        config.merge_with_cli_args(&overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        let max_file_size = self.max_size.map(|size| size * 1024 * 1024); // MB to bytes

        CliOverrides::new()
            .with_formats(self.formats.clone())
            .with_exclude(self.exclude.clone())
            .with_max_file_size(max_file_size)
            .with_output(self.output.clone())
    }

    pub fn input_path(&self) -> &Path {
        self.input.as_deref().unwrap_or_else(|| Path::new("."))
    }

    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}

/// A zip input triggers extraction before the scan; anything else is
/// treated as a directory root.
pub fn is_zip_input(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("zip"))
}
