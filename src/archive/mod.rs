pub mod zip_extractor;

pub use zip_extractor::ArchiveExtractor;
