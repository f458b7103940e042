//! Destination-format serializers

pub mod json;

pub use json::JsonSerializer;

use crate::conversion::ConversionConfig;
use crate::error::ConversionResult;
use crate::parser::{CanonicalDocument, FormatTag};

/// Renders a canonical tree in one destination format
pub trait DocumentSerializer: Send + Sync {
    /// Format produced by this serializer
    fn format(&self) -> FormatTag;

    /// Render the document as text
    fn serialize(&self, document: &CanonicalDocument) -> ConversionResult<String>;
}

/// Look up the serializer for a destination format, if one exists
pub fn serializer_for(
    format: FormatTag,
    config: &ConversionConfig,
) -> Option<Box<dyn DocumentSerializer>> {
    match format {
        FormatTag::Json => Some(Box::new(JsonSerializer::new(config))),
        FormatTag::Xml | FormatTag::Unknown => None,
    }
}
