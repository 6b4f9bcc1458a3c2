pub mod batch_converter;
pub mod report;

pub use batch_converter::{BatchConverter, ConversionProgress};
pub use report::{ConfigSnapshot, ConversionReport, ConversionSummary, SourceInfo, SourceKind};
