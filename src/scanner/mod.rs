pub mod file_filter;
pub mod markdown_locator;

pub use file_filter::FileFilter;
pub use markdown_locator::{MarkdownFile, MarkdownLocator};
