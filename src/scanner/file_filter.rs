use crate::config::FilterConfig;
use regex::Regex;
use std::path::Path;

pub struct FileFilter {
    extensions: Vec<String>,
    max_file_size: u64,
    exclude_dirs: Vec<String>,
    exclude_patterns: Vec<Regex>,
}

impl FileFilter {
    pub fn new(config: &FilterConfig) -> Self {
        let exclude_patterns = config
            .exclude_patterns
            .iter()
            .filter_map(|pattern| Regex::new(pattern).ok())
            .collect();

        Self {
            extensions: config.extensions.clone(),
            max_file_size: config.max_file_size,
            exclude_dirs: config.exclude_dirs.clone(),
            exclude_patterns,
        }
    }

    pub fn is_markdown_file(&self, path: &Path) -> bool {
        if let Some(extension) = path.extension().and_then(|s| s.to_str()) {
            let ext_lower = extension.to_lowercase();
            if self.extensions.contains(&ext_lower) {
                let path_str = path.to_string_lossy();
                return !self
                    .exclude_patterns
                    .iter()
                    .any(|pattern| pattern.is_match(&path_str));
            }
        }

        false
    }

    pub fn should_traverse_directory(&self, path: &Path) -> bool {
        if let Some(dir_name) = path.file_name().and_then(|s| s.to_str()) {
            let dir_name_lower = dir_name.to_lowercase();

            if self
                .exclude_dirs
                .iter()
                .any(|exclude| exclude.to_lowercase() == dir_name_lower)
            {
                return false;
            }

            let path_str = path.to_string_lossy();
            for pattern in &self.exclude_patterns {
                if pattern.is_match(&path_str) {
                    return false;
                }
            }
        }

        true
    }

    pub fn is_size_allowed(&self, size: u64) -> bool {
        size <= self.max_file_size
    }

    pub fn get_extensions(&self) -> &Vec<String> {
        &self.extensions
    }
}

impl Default for FileFilter {
    fn default() -> Self {
        let config = FilterConfig::default();
        Self::new(&config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_config() -> FilterConfig {
        FilterConfig {
            extensions: vec!["md".to_string(), "markdown".to_string()],
            max_file_size: 1024 * 1024, // 1MB
            exclude_dirs: vec![".git".to_string(), "node_modules".to_string()],
            exclude_patterns: vec![r".*\.min\..*".to_string()],
            max_depth: None,
        }
    }

    #[test]
    fn test_markdown_file_detection() {
        let filter = FileFilter::new(&create_test_config());

        assert!(filter.is_markdown_file(Path::new("README.md")));
        assert!(filter.is_markdown_file(Path::new("notes.markdown")));
        assert!(filter.is_markdown_file(Path::new("README.MD")));

        assert!(!filter.is_markdown_file(Path::new("script.js")));
        assert!(!filter.is_markdown_file(Path::new("notes.txt")));
        assert!(!filter.is_markdown_file(Path::new("README")));
    }

    #[test]
    fn test_exclude_pattern_applies_to_files() {
        let filter = FileFilter::new(&create_test_config());

        assert!(!filter.is_markdown_file(Path::new("bundle.min.md")));
        assert!(filter.is_markdown_file(Path::new("bundle.md")));
    }

    #[test]
    fn test_directory_traversal_rules() {
        let filter = FileFilter::new(&create_test_config());

        assert!(filter.should_traverse_directory(Path::new("docs")));
        assert!(!filter.should_traverse_directory(Path::new(".git")));
        assert!(!filter.should_traverse_directory(Path::new("node_modules")));
    }

    #[test]
    fn test_size_limits() {
        let filter = FileFilter::new(&create_test_config());

        assert!(filter.is_size_allowed(1024));
        assert!(filter.is_size_allowed(1024 * 1024));
        assert!(!filter.is_size_allowed(2 * 1024 * 1024));
    }
}
