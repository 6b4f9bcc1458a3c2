use crate::error::{Md2TextError, Result};
use std::fs::File;
use std::path::Path;
use tempfile::TempDir;
use zip::result::ZipError;
use zip::ZipArchive;

/// Unpacks a zip archive into a uniquely-named temporary directory.
///
/// The directory is removed when the returned `TempDir` handle is dropped,
/// so cleanup happens whether or not the rest of the run succeeds. Every
/// failure is classified so the caller can report it and continue with an
/// empty file set instead of aborting.
pub struct ArchiveExtractor;

impl ArchiveExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn extract_to_temp<P: AsRef<Path>>(&self, archive_path: P) -> Result<TempDir> {
        let archive_path = archive_path.as_ref();

        let file = File::open(archive_path)
            .map_err(|e| classify_io_error(e, archive_path))?;

        let mut archive =
            ZipArchive::new(file).map_err(|e| classify_zip_error(e, archive_path))?;

        let temp_dir = TempDir::new().map_err(Md2TextError::Io)?;

        archive
            .extract(temp_dir.path())
            .map_err(|e| classify_zip_error(e, archive_path))?;

        Ok(temp_dir)
    }
}

impl Default for ArchiveExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn classify_io_error(error: std::io::Error, path: &Path) -> Md2TextError {
    match error.kind() {
        std::io::ErrorKind::NotFound => Md2TextError::ArchiveNotFound {
            path: path.display().to_string(),
        },
        std::io::ErrorKind::PermissionDenied => Md2TextError::Permission {
            path: path.display().to_string(),
        },
        _ => Md2TextError::Io(error),
    }
}

fn classify_zip_error(error: ZipError, path: &Path) -> Md2TextError {
    match error {
        ZipError::InvalidArchive(_) | ZipError::UnsupportedArchive(_) => {
            Md2TextError::ArchiveCorrupt {
                path: path.display().to_string(),
            }
        }
        ZipError::FileNotFound => Md2TextError::ArchiveNotFound {
            path: path.display().to_string(),
        },
        ZipError::Io(e) => classify_io_error(e, path),
        _ => Md2TextError::Archive {
            message: error.to_string(),
            source: error,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Write;
    use tempfile::TempDir as TestDir;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    fn create_test_archive(dir: &Path, entries: &[(&str, &str)]) -> std::path::PathBuf {
        let archive_path = dir.join("fixture.zip");
        let file = File::create(&archive_path).unwrap();
        let mut writer = ZipWriter::new(file);
        let options = SimpleFileOptions::default();

        for (name, content) in entries {
            writer.start_file(*name, options).unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
        writer.finish().unwrap();

        archive_path
    }

    #[test]
    fn test_extracts_all_entries() {
        let fixture_dir = TestDir::new().unwrap();
        let archive_path = create_test_archive(
            fixture_dir.path(),
            &[("readme.md", "# Top"), ("docs/guide.md", "Guide body")],
        );

        let extractor = ArchiveExtractor::new();
        let extracted = extractor.extract_to_temp(&archive_path).unwrap();

        assert!(extracted.path().join("readme.md").exists());
        assert!(extracted.path().join("docs").join("guide.md").exists());
        assert_eq!(
            fs::read_to_string(extracted.path().join("readme.md")).unwrap(),
            "# Top"
        );
    }

    #[test]
    fn test_temp_dir_removed_on_drop() {
        let fixture_dir = TestDir::new().unwrap();
        let archive_path = create_test_archive(fixture_dir.path(), &[("a.md", "text")]);

        let extractor = ArchiveExtractor::new();
        let extracted = extractor.extract_to_temp(&archive_path).unwrap();
        let extracted_path = extracted.path().to_path_buf();

        assert!(extracted_path.exists());
        drop(extracted);
        assert!(!extracted_path.exists());
    }

    #[test]
    fn test_corrupt_archive_is_classified() {
        let fixture_dir = TestDir::new().unwrap();
        let bogus_path = fixture_dir.path().join("broken.zip");
        fs::write(&bogus_path, b"this is not a zip archive").unwrap();

        let extractor = ArchiveExtractor::new();
        let result = extractor.extract_to_temp(&bogus_path);

        assert!(matches!(result, Err(Md2TextError::ArchiveCorrupt { .. })));
    }

    #[test]
    fn test_classification_names_the_archive_path() {
        let path = Path::new("docs/broken.zip");

        let corrupt = classify_zip_error(
            ZipError::InvalidArchive("bad central directory".into()),
            path,
        );
        match corrupt {
            Md2TextError::ArchiveCorrupt { path } => assert_eq!(path, "docs/broken.zip"),
            other => panic!("unexpected classification: {:?}", other),
        }

        let denied = classify_zip_error(
            ZipError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "denied",
            )),
            path,
        );
        match denied {
            Md2TextError::Permission { path } => assert_eq!(path, "docs/broken.zip"),
            other => panic!("unexpected classification: {:?}", other),
        }
    }

    #[test]
    fn test_missing_archive_is_classified() {
        let extractor = ArchiveExtractor::new();
        let result = extractor.extract_to_temp(Path::new("/no/such/archive.zip"));

        assert!(matches!(result, Err(Md2TextError::ArchiveNotFound { .. })));
    }
}
