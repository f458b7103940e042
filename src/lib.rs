//! Structured document converter
//!
//! Converts documents between structured formats (XML to JSON today),
//! detects the format of opaque payloads, and checks that two documents in
//! possibly different formats carry the same structure. Payloads cross the
//! service boundary base64-encoded; results come back as uniform
//! `{status, elapsed_ms, details}` reports.

pub mod cli;
pub mod conversion;
pub mod error;
pub mod formatter;
pub mod parser;
pub mod report;
pub mod service;
pub mod validation;

// Re-export commonly used types
pub use conversion::{
    convert_document, ConversionConfig, ConversionEngine, ConversionOutput, ConversionRegistry,
    ConversionResult, SupportedConversion,
};
pub use error::{ConversionError, ConversionErrorKind, ParseError};
pub use parser::{CanonicalDocument, Detection, DetectionMetadata, FormatDetector, FormatTag};
pub use report::{ConversionReport, ReportStatus};
pub use service::ConverterService;
pub use validation::{validate_conversion, ValidationOutcome, Validator};

/// Detect the format of a base64 payload
pub fn detect_format(payload: &str) -> Detection {
    FormatDetector::detect(payload)
}

/// Pairs accepted by a default engine
pub fn supported_conversions() -> Vec<SupportedConversion> {
    ConversionRegistry::with_defaults().supported()
}
