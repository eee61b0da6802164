pub mod case_extractor;
pub mod output_writer;

pub use case_extractor::{CaseExtractor, ExtractionProgress, ExtractionReport, ExtractionStats};
pub use output_writer::{OutputTarget, OutputWriter};
