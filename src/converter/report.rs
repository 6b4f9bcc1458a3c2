use crate::converter::ConversionProgress;
use crate::scanner::MarkdownFile;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionReport {
    pub source: SourceInfo,
    pub output_path: String,
    pub summary: ConversionSummary,
    pub files: Vec<FileInfo>,
    pub converted_at: DateTime<Utc>,
    pub errors: Vec<String>,
    pub config_used: ConfigSnapshot,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceInfo {
    pub input_path: String,
    pub kind: SourceKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Directory,
    Archive,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionSummary {
    pub files_found: usize,
    pub files_converted: usize,
    pub files_skipped: usize,
    pub bytes_read: u64,
    pub duration: Duration,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileInfo {
    pub filename: String,
    pub relative_path: String,
    pub size: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigSnapshot {
    pub extensions: Vec<String>,
    pub max_file_size: u64,
    pub exclude_dirs: Vec<String>,
    pub max_depth: Option<usize>,
}

impl From<&MarkdownFile> for FileInfo {
    fn from(file: &MarkdownFile) -> Self {
        Self {
            filename: file.filename.clone(),
            relative_path: file.display_path(),
            size: file.size,
        }
    }
}

impl ConversionReport {
    pub fn new(
        source: SourceInfo,
        output_path: &Path,
        candidates: &[MarkdownFile],
        progress: &ConversionProgress,
        errors: Vec<String>,
        config: ConfigSnapshot,
    ) -> Self {
        let summary = ConversionSummary {
            files_found: candidates.len(),
            files_converted: progress.files_converted,
            files_skipped: progress.files_skipped,
            bytes_read: progress.bytes_read,
            duration: progress.elapsed(),
        };

        Self {
            source,
            output_path: output_path.display().to_string(),
            summary,
            files: candidates.iter().map(FileInfo::from).collect(),
            converted_at: Utc::now(),
            errors,
            config_used: config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_report_collects_progress_and_candidates() {
        let candidates = vec![
            MarkdownFile::new(PathBuf::from("a.md"), PathBuf::from("a.md"), 10),
            MarkdownFile::new(PathBuf::from("docs/b.md"), PathBuf::from("docs/b.md"), 20),
        ];

        let mut progress = ConversionProgress::new(candidates.len());
        progress.record_converted("a.md".to_string(), 10);
        progress.record_skipped("b.md".to_string(), "Error reading docs/b.md: gone");

        let report = ConversionReport::new(
            SourceInfo {
                input_path: "docs/".to_string(),
                kind: SourceKind::Directory,
            },
            Path::new("out/all.txt"),
            &candidates,
            &progress,
            progress.errors.clone(),
            ConfigSnapshot {
                extensions: vec!["md".to_string()],
                max_file_size: 1024,
                exclude_dirs: vec![],
                max_depth: None,
            },
        );

        assert_eq!(report.summary.files_found, 2);
        assert_eq!(report.summary.files_converted, 1);
        assert_eq!(report.summary.files_skipped, 1);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.files[1].relative_path, "docs/b.md");
    }

    #[test]
    fn test_report_serializes_to_json() {
        let progress = ConversionProgress::new(0);
        let report = ConversionReport::new(
            SourceInfo {
                input_path: "input.zip".to_string(),
                kind: SourceKind::Archive,
            },
            Path::new("all.txt"),
            &[],
            &progress,
            Vec::new(),
            ConfigSnapshot {
                extensions: vec!["md".to_string()],
                max_file_size: 1024,
                exclude_dirs: vec![],
                max_depth: Some(5),
            },
        );

        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"kind\":\"archive\""));
        assert!(json.contains("\"files_found\":0"));
    }
}
