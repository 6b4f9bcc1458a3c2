use crate::error::{Md2TextError, Result};
use crate::normalize::TextNormalizer;
use crate::scanner::MarkdownFile;
use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct ConversionProgress {
    pub files_converted: usize,
    pub files_skipped: usize,
    pub total_files: usize,
    pub bytes_read: u64,
    pub current_file: Option<String>,
    pub start_time: Instant,
    pub errors: Vec<String>,
}

impl ConversionProgress {
    pub fn new(total_files: usize) -> Self {
        Self {
            files_converted: 0,
            files_skipped: 0,
            total_files,
            bytes_read: 0,
            current_file: None,
            start_time: Instant::now(),
            errors: Vec::new(),
        }
    }

    pub fn record_converted(&mut self, filename: String, bytes: u64) {
        self.files_converted += 1;
        self.bytes_read += bytes;
        self.current_file = Some(filename);
    }

    pub fn record_skipped<S: Into<String>>(&mut self, filename: String, reason: S) {
        self.files_skipped += 1;
        self.current_file = Some(filename);
        self.errors.push(reason.into());
    }

    // Nothing to report: an empty extraction is neither output nor a warning.
    pub fn record_empty(&mut self, filename: String) {
        self.files_skipped += 1;
        self.current_file = Some(filename);
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

/// Reads each candidate, normalizes it, and writes the concatenation to a
/// single output file.
///
/// Each file moves independently through read, normalize, accumulate; any
/// per-file failure skips that file and the batch continues. Nothing touches
/// the output path until every candidate has been seen, so an interrupted
/// run never leaves partial output behind.
pub struct BatchConverter {
    normalizer: TextNormalizer,
    separator: &'static str,
}

impl BatchConverter {
    pub fn new() -> Self {
        Self {
            normalizer: TextNormalizer::new(),
            separator: "\n\n",
        }
    }

    pub fn convert_files(
        &self,
        candidates: &[MarkdownFile],
        output_path: &Path,
        progress_callback: Option<&dyn Fn(&ConversionProgress)>,
    ) -> Result<ConversionProgress> {
        let mut progress = ConversionProgress::new(candidates.len());
        let mut accumulated = String::new();

        for candidate in candidates {
            if let Some(callback) = progress_callback {
                callback(&progress);
            }

            if !candidate.source_path.is_file() {
                progress.record_skipped(
                    candidate.filename.clone(),
                    format!("Skipping {}: not a file", candidate.source_path.display()),
                );
                continue;
            }

            let markdown_text = match fs::read_to_string(&candidate.source_path) {
                Ok(text) => text,
                Err(e) => {
                    progress.record_skipped(
                        candidate.filename.clone(),
                        format!("Error reading {}: {}", candidate.source_path.display(), e),
                    );
                    continue;
                }
            };

            match self.normalizer.normalize(&markdown_text) {
                // A file that normalizes to nothing (empty, or tags with no
                // text) contributes no output and no separator.
                Some(converted) if !converted.is_empty() => {
                    accumulated.push_str(&converted);
                    accumulated.push_str(self.separator);
                    progress.record_converted(candidate.filename.clone(), candidate.size);
                }
                Some(_) => {
                    progress.record_empty(candidate.filename.clone());
                }
                None => {
                    progress.record_skipped(
                        candidate.filename.clone(),
                        format!(
                            "Failed to convert {}: markup could not be parsed",
                            candidate.source_path.display()
                        ),
                    );
                }
            }
        }

        if let Some(callback) = progress_callback {
            callback(&progress);
        }

        self.write_output(&accumulated, output_path)?;

        Ok(progress)
    }

    // Directory creation failure is the one fatal point: nothing is written.
    fn write_output(&self, accumulated: &str, output_path: &Path) -> Result<()> {
        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| Md2TextError::OutputDirectory {
                    path: parent.display().to_string(),
                    source: e,
                })?;
            }
        }

        fs::write(output_path, accumulated).map_err(|e| Md2TextError::OutputWrite {
            path: output_path.display().to_string(),
            source: e,
        })
    }
}

impl Default for BatchConverter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn create_candidate(name: &str, content: &str, dir: &Path) -> MarkdownFile {
        let file_path = dir.join(name);
        fs::write(&file_path, content).unwrap();
        let size = fs::metadata(&file_path).unwrap().len();
        MarkdownFile::new(file_path, PathBuf::from(name), size)
    }

    #[test]
    fn test_concatenates_in_order_with_separators() {
        let source_dir = TempDir::new().unwrap();
        let output_dir = TempDir::new().unwrap();
        let output_path = output_dir.path().join("all.txt");

        let a = create_candidate("a.md", "# Title", source_dir.path());
        let b = create_candidate("b.md", "Body text", source_dir.path());

        let converter = BatchConverter::new();
        let progress = converter
            .convert_files(&[a, b], &output_path, None)
            .unwrap();

        assert_eq!(progress.files_converted, 2);
        assert_eq!(progress.files_skipped, 0);

        let written = fs::read_to_string(&output_path).unwrap();
        assert_eq!(written, "# Title\n\nBody text\n\n");
    }

    #[test]
    fn test_rerun_overwrites_instead_of_appending() {
        let source_dir = TempDir::new().unwrap();
        let output_dir = TempDir::new().unwrap();
        let output_path = output_dir.path().join("all.txt");

        let a = create_candidate("a.md", "once", source_dir.path());
        let converter = BatchConverter::new();

        converter
            .convert_files(std::slice::from_ref(&a), &output_path, None)
            .unwrap();
        converter
            .convert_files(std::slice::from_ref(&a), &output_path, None)
            .unwrap();

        assert_eq!(fs::read_to_string(&output_path).unwrap(), "once\n\n");
    }

    #[test]
    fn test_empty_candidate_list_writes_empty_file() {
        let output_dir = TempDir::new().unwrap();
        let output_path = output_dir.path().join("empty.txt");

        let converter = BatchConverter::new();
        let progress = converter.convert_files(&[], &output_path, None).unwrap();

        assert_eq!(progress.files_converted, 0);
        assert_eq!(fs::metadata(&output_path).unwrap().len(), 0);
    }

    #[test]
    fn test_missing_candidate_is_skipped_and_named() {
        let source_dir = TempDir::new().unwrap();
        let output_dir = TempDir::new().unwrap();
        let output_path = output_dir.path().join("all.txt");

        let ghost = MarkdownFile::new(
            source_dir.path().join("ghost.md"),
            PathBuf::from("ghost.md"),
            0,
        );
        let real = create_candidate("real.md", "still here", source_dir.path());

        let converter = BatchConverter::new();
        let progress = converter
            .convert_files(&[ghost, real], &output_path, None)
            .unwrap();

        assert_eq!(progress.files_converted, 1);
        assert_eq!(progress.files_skipped, 1);
        assert!(progress.errors.iter().any(|e| e.contains("ghost.md")));
        assert_eq!(fs::read_to_string(&output_path).unwrap(), "still here\n\n");
    }

    #[test]
    fn test_empty_extraction_adds_no_separator() {
        let source_dir = TempDir::new().unwrap();
        let output_dir = TempDir::new().unwrap();
        let output_path = output_dir.path().join("all.txt");

        let empty = create_candidate("empty.md", "", source_dir.path());
        let tags_only = create_candidate("tags.md", "<p></p>", source_dir.path());
        let real = create_candidate("real.md", "text", source_dir.path());

        let converter = BatchConverter::new();
        let progress = converter
            .convert_files(&[empty, tags_only, real], &output_path, None)
            .unwrap();

        assert_eq!(progress.files_converted, 1);
        assert_eq!(progress.files_skipped, 2);
        assert!(progress.errors.is_empty());
        assert_eq!(fs::read_to_string(&output_path).unwrap(), "text\n\n");
    }

    #[test]
    fn test_invalid_utf8_is_skipped() {
        let source_dir = TempDir::new().unwrap();
        let output_dir = TempDir::new().unwrap();
        let output_path = output_dir.path().join("all.txt");

        let bad_path = source_dir.path().join("bad.md");
        fs::write(&bad_path, [0xff, 0xfe, 0x80]).unwrap();
        let bad = MarkdownFile::new(bad_path, PathBuf::from("bad.md"), 3);
        let good = create_candidate("good.md", "fine", source_dir.path());

        let converter = BatchConverter::new();
        let progress = converter
            .convert_files(&[bad, good], &output_path, None)
            .unwrap();

        assert_eq!(progress.files_converted, 1);
        assert!(progress.errors.iter().any(|e| e.contains("bad.md")));
        assert_eq!(fs::read_to_string(&output_path).unwrap(), "fine\n\n");
    }

    #[test]
    fn test_output_parent_created_recursively() {
        let output_dir = TempDir::new().unwrap();
        let output_path = output_dir.path().join("nested").join("deep").join("all.txt");

        let converter = BatchConverter::new();
        converter.convert_files(&[], &output_path, None).unwrap();

        assert!(output_path.exists());
    }

    #[test]
    fn test_markup_stripped_before_accumulation() {
        let source_dir = TempDir::new().unwrap();
        let output_dir = TempDir::new().unwrap();
        let output_path = output_dir.path().join("all.txt");

        let tagged = create_candidate("tagged.md", "<p>Hello</p>\n\n\nWorld", source_dir.path());

        let converter = BatchConverter::new();
        converter
            .convert_files(&[tagged], &output_path, None)
            .unwrap();

        assert_eq!(
            fs::read_to_string(&output_path).unwrap(),
            "Hello\nWorld\n\n"
        );
    }
}
