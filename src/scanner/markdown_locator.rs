use crate::config::FilterConfig;
use crate::error::Result;
use crate::scanner::file_filter::FileFilter;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

#[derive(Debug, Clone)]
pub struct MarkdownFile {
    pub source_path: PathBuf,
    pub relative_path: PathBuf,
    pub filename: String,
    pub size: u64,
}

impl MarkdownFile {
    pub fn new(source_path: PathBuf, relative_path: PathBuf, size: u64) -> Self {
        let filename = source_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("")
            .to_string();

        Self {
            source_path,
            relative_path,
            filename,
            size,
        }
    }

    pub fn display_path(&self) -> String {
        self.relative_path.display().to_string()
    }
}

pub struct MarkdownLocator {
    filter: FileFilter,
    max_depth: Option<usize>,
}

impl MarkdownLocator {
    pub fn new(config: &FilterConfig) -> Self {
        Self {
            filter: FileFilter::new(config),
            max_depth: config.max_depth,
        }
    }

    /// Walks `root` and collects every markdown file under it.
    ///
    /// Entries are visited in lexicographic order per directory so repeated
    /// runs over the same tree yield the same sequence. A missing root, an
    /// unreadable subtree, or an empty tree all produce an empty list; per
    /// entry problems are returned alongside as diagnostics, never as a
    /// failure of the walk itself.
    pub fn locate<P: AsRef<Path>>(&self, root: P) -> (Vec<MarkdownFile>, Vec<String>) {
        let root_path = root.as_ref();
        let mut files = Vec::new();
        let mut diagnostics = Vec::new();

        if !root_path.is_dir() {
            diagnostics.push(format!(
                "Input directory not found: {}",
                root_path.display()
            ));
            return (files, diagnostics);
        }

        let mut walker = WalkDir::new(root_path)
            .follow_links(false)
            .sort_by_file_name();
        if let Some(depth) = self.max_depth {
            walker = walker.max_depth(depth);
        }

        let iter = walker
            .into_iter()
            .filter_entry(|e| self.should_traverse(e));

        for entry in iter {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    diagnostics.push(format!("Scan error: {}", err));
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            match self.process_file(&entry, root_path) {
                Ok(Some(file)) => files.push(file),
                Ok(None) => {}
                Err(err) => {
                    diagnostics.push(format!(
                        "Error processing {}: {}",
                        entry.path().display(),
                        err
                    ));
                }
            }
        }

        (files, diagnostics)
    }

    fn should_traverse(&self, entry: &DirEntry) -> bool {
        if entry.file_type().is_file() || entry.depth() == 0 {
            return true;
        }

        if entry.file_type().is_dir() {
            return self.filter.should_traverse_directory(entry.path());
        }

        true
    }

    fn process_file(&self, entry: &DirEntry, root_path: &Path) -> Result<Option<MarkdownFile>> {
        let path = entry.path();

        if !self.filter.is_markdown_file(path) {
            return Ok(None);
        }

        let metadata = entry.metadata().map_err(|e| {
            crate::error::Md2TextError::Io(e.into_io_error().unwrap_or_else(|| {
                std::io::Error::new(std::io::ErrorKind::Other, "metadata unavailable")
            }))
        })?;

        if !self.filter.is_size_allowed(metadata.len()) {
            return Ok(None);
        }

        let relative_path = path
            .strip_prefix(root_path)
            .unwrap_or(path)
            .to_path_buf();

        Ok(Some(MarkdownFile::new(
            path.to_path_buf(),
            relative_path,
            metadata.len(),
        )))
    }

    pub fn searched_extensions(&self) -> &Vec<String> {
        self.filter.get_extensions()
    }
}
