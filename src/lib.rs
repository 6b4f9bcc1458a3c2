pub mod archive;
pub mod cli;
pub mod config;
pub mod converter;
pub mod error;
pub mod normalize;
pub mod scanner;
pub mod ui;

// Public API re-exports
pub use cli::{Cli, OutputFormat};
pub use config::{CliOverrides, Config, FilterConfig, OutputConfig};
pub use error::{Md2TextError, Result, UserFriendlyError};

// Core functionality re-exports
pub use archive::ArchiveExtractor;
pub use converter::{BatchConverter, ConfigSnapshot, ConversionProgress, ConversionReport};
pub use normalize::TextNormalizer;
pub use scanner::{FileFilter, MarkdownFile, MarkdownLocator};
pub use ui::{OutputFormatter, OutputMode, ProgressManager};

use converter::{SourceInfo, SourceKind};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Main library interface for the markdown-to-text pipeline.
pub struct Md2Text {
    config: Config,
    output_formatter: OutputFormatter,
    progress_manager: ProgressManager,
}

impl Md2Text {
    pub fn new(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let output_formatter = OutputFormatter::new(output_mode, verbose, quiet);
        let progress_manager = ProgressManager::new(!quiet && output_mode == OutputMode::Human);

        Self {
            config,
            output_formatter,
            progress_manager,
        }
    }

    /// Create an Md2Text instance from CLI arguments
    pub fn from_cli(cli_args: &Cli) -> Result<Self> {
        let config = cli_args.load_config()?;
        let output_mode = match cli_args.output_format {
            cli::OutputFormat::Human => OutputMode::Human,
            cli::OutputFormat::Json => OutputMode::Json,
            cli::OutputFormat::Plain => OutputMode::Plain,
        };

        Ok(Self::new(
            config,
            output_mode,
            cli_args.verbosity_level(),
            cli_args.quiet,
        ))
    }

    /// Convert all markdown under `input` into the configured output file.
    ///
    /// `input` may be a directory or a zip archive. Archive failures and
    /// per-file failures are reported and subtracted from the batch; the
    /// only fatal outcomes are config problems and an unwritable output.
    pub fn convert(&self, input: &Path) -> Result<ConversionReport> {
        self.output_formatter
            .start_operation("Starting markdown conversion");

        let mut run_errors = Vec::new();

        // The extraction handle must outlive the conversion loop; dropping
        // it removes the extracted tree, success or failure alike.
        let (scan_root, extraction, source_kind) = self.resolve_input(input, &mut run_errors);

        let candidates = match &scan_root {
            Some(root) => self.locate_markdown(root, &mut run_errors),
            None => Vec::new(),
        };

        self.output_formatter
            .info(&format!("Found {} markdown files", candidates.len()));

        let output_path = self.config.output.destination.clone();
        let progress = self.convert_candidates(&candidates, &output_path)?;

        for error in &progress.errors {
            self.output_formatter.warning(error);
        }
        run_errors.extend(progress.errors.iter().cloned());

        self.output_formatter.print_conversion_summary(&progress);

        let report = ConversionReport::new(
            SourceInfo {
                input_path: input.display().to_string(),
                kind: source_kind,
            },
            &output_path,
            &candidates,
            &progress,
            run_errors,
            self.create_config_snapshot(),
        );

        self.output_formatter.success(&format!(
            "Saved all converted text to {}",
            output_path.display()
        ));

        drop(extraction);

        Ok(report)
    }

    /// Decides where the scan starts. An archive failure yields no root at
    /// all rather than an error: the batch proceeds with zero files.
    fn resolve_input(
        &self,
        input: &Path,
        run_errors: &mut Vec<String>,
    ) -> (Option<PathBuf>, Option<TempDir>, SourceKind) {
        if !cli::is_zip_input(input) {
            return (Some(input.to_path_buf()), None, SourceKind::Directory);
        }

        self.output_formatter.start_operation("Extracting archive");
        let spinner = self.progress_manager.create_spinner("Unpacking zip entries");

        match ArchiveExtractor::new().extract_to_temp(input) {
            Ok(temp_dir) => {
                spinner.finish_and_clear();
                self.output_formatter.debug(&format!(
                    "Extracted archive to {}",
                    temp_dir.path().display()
                ));
                let root = temp_dir.path().to_path_buf();
                (Some(root), Some(temp_dir), SourceKind::Archive)
            }
            Err(e) => {
                spinner.finish_and_clear();
                let message = e.user_message();
                self.output_formatter.warning(&message);
                run_errors.push(message);
                (None, None, SourceKind::Archive)
            }
        }
    }

    fn locate_markdown(&self, root: &Path, run_errors: &mut Vec<String>) -> Vec<MarkdownFile> {
        self.output_formatter
            .start_operation("Scanning for markdown files");

        let locator = MarkdownLocator::new(&self.config.filters);
        self.output_formatter.debug(&format!(
            "Searching for extensions: {}",
            locator.searched_extensions().join(", ")
        ));
        let (files, diagnostics) = locator.locate(root);

        for diagnostic in diagnostics {
            self.output_formatter.warning(&diagnostic);
            run_errors.push(diagnostic);
        }

        files
    }

    fn convert_candidates(
        &self,
        candidates: &[MarkdownFile],
        output_path: &Path,
    ) -> Result<ConversionProgress> {
        self.output_formatter
            .start_operation("Converting markdown files");

        let file_progress = self
            .progress_manager
            .create_file_progress(candidates.len() as u64);
        let progress_callback = {
            let pb = file_progress.clone();
            move |progress: &ConversionProgress| {
                ui::progress::update_file_progress(&pb, progress);
            }
        };

        let converter = BatchConverter::new();
        let progress = converter.convert_files(candidates, output_path, Some(&progress_callback))?;

        ui::progress::finish_progress_with_summary(
            &file_progress,
            &format!("Converted {} files", progress.files_converted),
            progress.elapsed(),
        );

        Ok(progress)
    }

    fn create_config_snapshot(&self) -> ConfigSnapshot {
        ConfigSnapshot {
            extensions: self.config.filters.extensions.clone(),
            max_file_size: self.config.filters.max_file_size,
            exclude_dirs: self.config.filters.exclude_dirs.clone(),
            max_depth: self.config.filters.max_depth,
        }
    }

    /// Generate sample configuration file
    pub fn generate_sample_config<P: AsRef<Path>>(output_path: P) -> Result<()> {
        let sample_config = Config::create_sample_config();
        std::fs::write(output_path.as_ref(), sample_config).map_err(Md2TextError::Io)?;
        Ok(())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn output_formatter(&self) -> &OutputFormatter {
        &self.output_formatter
    }

    pub fn handle_error(&self, error: &Md2TextError) {
        // Leftover progress bars would interleave with the error output.
        self.progress_manager.clear();
        self.output_formatter.print_user_friendly_error(error);
    }
}

/// Convenience function to convert a tree of markdown with minimal setup
pub fn convert_simple(input: &Path, output: Option<&Path>, verbose: bool) -> Result<ConversionReport> {
    let mut config = Config::default();

    if let Some(output_path) = output {
        config.output.destination = output_path.to_path_buf();
    }

    let md2text = Md2Text::new(
        config,
        OutputMode::Plain,
        if verbose { 1 } else { 0 },
        !verbose,
    );

    md2text.convert(input)
}

/// Get version information
pub fn version_info() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
