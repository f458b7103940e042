//! Structural parsing of tagged documents into canonical trees

pub mod detect;
pub mod document;
pub mod format;
pub mod json;
pub mod payload;
pub mod xml;

pub use detect::{Detection, DetectionMetadata, FormatDetector};
pub use document::{CanonicalDocument, Mapping, Scalar};
pub use format::FormatTag;

use crate::error::{ParseError, ParseResult};

/// Default nesting limit applied by [`StructuralParser::default`]
pub const DEFAULT_MAX_DEPTH: usize = 1000;

/// Parses XML and JSON text into the same canonical tree shape
#[derive(Debug, Clone, Copy)]
pub struct StructuralParser {
    max_depth: Option<usize>,
}

impl Default for StructuralParser {
    fn default() -> Self {
        Self {
            max_depth: Some(DEFAULT_MAX_DEPTH),
        }
    }
}

impl StructuralParser {
    pub fn new(max_depth: Option<usize>) -> Self {
        Self { max_depth }
    }

    /// Parse `text` as a document of the given format.
    ///
    /// Two parses of identical text in the same format always yield
    /// structurally identical trees.
    pub fn parse(&self, text: &str, format: FormatTag) -> ParseResult<CanonicalDocument> {
        match format {
            FormatTag::Xml => xml::parse_xml(text, self.max_depth),
            FormatTag::Json => {
                let document = json::parse_json(text, self.max_depth)?;
                if let Some(limit) = self.max_depth {
                    check_depth(&document, 0, limit)?;
                }
                Ok(document)
            }
            FormatTag::Unknown => Err(ParseError::new(
                FormatTag::Unknown,
                "cannot parse a document of unknown format".to_string(),
                None,
            )),
        }
    }
}

/// Parse with the default nesting limit
pub fn parse(text: &str, format: FormatTag) -> ParseResult<CanonicalDocument> {
    StructuralParser::default().parse(text, format)
}

fn check_depth(document: &CanonicalDocument, depth: usize, limit: usize) -> ParseResult<()> {
    if depth > limit {
        return Err(ParseError::new(
            FormatTag::Json,
            format!("Maximum nesting depth exceeded: {}", limit),
            None,
        ));
    }

    match document {
        CanonicalDocument::Mapping(mapping) => {
            for (_key, value) in mapping.iter() {
                check_depth(value, depth + 1, limit)?;
            }
            Ok(())
        }
        CanonicalDocument::Sequence(items) => {
            for item in items {
                check_depth(item, depth + 1, limit)?;
            }
            Ok(())
        }
        CanonicalDocument::Scalar(_) => Ok(()),
    }
}
