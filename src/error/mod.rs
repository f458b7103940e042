//! Error types and handling infrastructure for document conversion

use anyhow::Error;
use std::fmt;
use std::path::PathBuf;

use crate::parser::FormatTag;

/// Core error types for the conversion process
#[derive(Debug, thiserror::Error)]
pub enum ConversionErrorKind {
    #[error("Decode error: {message}")]
    Decode { message: String },

    #[error("Unsupported conversion pair: {from}->{to}")]
    UnsupportedPair { from: String, to: String },

    #[error("Unsupported format: {format}")]
    UnsupportedFormat { format: String },

    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("Payload too large: {size} bytes (limit: {limit} bytes)")]
    PayloadTooLarge { size: usize, limit: usize },

    #[error("IO error: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
    },

    #[error("Invalid configuration: {message}")]
    Configuration { message: String },
}

impl ConversionErrorKind {
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    pub fn unsupported_pair(from: &str, to: &str) -> Self {
        Self::UnsupportedPair {
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    pub fn unsupported_format(format: &str) -> Self {
        Self::UnsupportedFormat {
            format: format.to_string(),
        }
    }

    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    pub fn io(message: String, path: Option<PathBuf>) -> Self {
        Self::Io { message, path }
    }

    pub fn configuration(message: String) -> Self {
        Self::Configuration { message }
    }
}

/// Main error type for conversion operations
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    #[error(transparent)]
    ParseError(#[from] ParseError),

    #[error("{kind}")]
    Conversion {
        kind: ConversionErrorKind,
        source: Option<anyhow::Error>,
    },

    #[error(transparent)]
    Other(#[from] Error),
}

impl ConversionError {
    pub fn parse(format: FormatTag, message: String, location: Option<(usize, usize)>) -> Self {
        Self::ParseError(ParseError::new(format, message, location))
    }

    pub fn conversion(kind: ConversionErrorKind) -> Self {
        Self::Conversion { kind, source: None }
    }

    pub fn conversion_with_source(kind: ConversionErrorKind, source: anyhow::Error) -> Self {
        Self::Conversion {
            kind,
            source: Some(source),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::conversion(ConversionErrorKind::decode(message))
    }

    pub fn other(error: Error) -> Self {
        Self::Other(error)
    }

    /// True when the failure came from a malformed document rather than
    /// from decoding, limits, or pair support.
    pub fn is_parse_failure(&self) -> bool {
        matches!(self, Self::ParseError(_))
    }

    /// Text placed in a conversion report's `details` field
    pub fn report_details(&self) -> String {
        match self {
            Self::ParseError(err) => {
                format!("{} Parsing Error: {}", err.format.display_name(), err)
            }
            Self::Conversion { kind, .. } => match kind {
                ConversionErrorKind::Decode { message } => format!("Decode Error: {}", message),
                ConversionErrorKind::UnsupportedPair { from, to } => {
                    format!("Unsupported conversion pair: {}->{}", from, to)
                }
                ConversionErrorKind::Serialization { message } => {
                    format!("Serialization Error: {}", message)
                }
                _ => kind.to_string(),
            },
            Self::Other(err) => format!("Unexpected error: {}", err),
        }
    }

    /// Create a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::ParseError(err) => match err.location {
                Some((line, col)) => format!(
                    "{} parse error at line {}, column {}: {}",
                    err.format.display_name(),
                    line,
                    col,
                    err.message
                ),
                None => format!("{} parse error: {}", err.format.display_name(), err.message),
            },
            Self::Conversion { kind, .. } => match kind {
                ConversionErrorKind::PayloadTooLarge { size, limit } => {
                    format!("Payload too large: {} bytes (limit: {} bytes)", size, limit)
                }
                ConversionErrorKind::Io {
                    message,
                    path: Some(path),
                } => format!("IO error on {}: {}", path.display(), message),
                _ => self.to_string(),
            },
            Self::Other(err) => {
                format!("Unexpected error: {}", err)
            }
        }
    }
}

/// Document parsing errors
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub format: FormatTag,
    pub message: String,
    pub location: Option<(usize, usize)>,
}

impl ParseError {
    pub fn new(format: FormatTag, message: String, location: Option<(usize, usize)>) -> Self {
        Self {
            format,
            message,
            location,
        }
    }

    /// Attach a location computed from a byte offset into `content`
    pub fn at_offset(mut self, content: &str, offset: usize) -> Self {
        self.location = Some(line_column(content, offset));
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some((line, col)) = self.location {
            write!(f, " at line {}, column {}", line, col)?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

/// 1-based line and column of a byte offset, clamped to the content length
pub fn line_column(content: &str, offset: usize) -> (usize, usize) {
    let mut offset = offset.min(content.len());
    while !content.is_char_boundary(offset) {
        offset -= 1;
    }
    let before = &content[..offset];
    let line = before.matches('\n').count() + 1;
    let col = before.len() - before.rfind('\n').map_or(0, |p| p + 1);
    (line, col + 1)
}

/// Result type for conversion operations
pub type ConversionResult<T> = Result<T, ConversionError>;

/// Convenience result type for parsing operations
pub type ParseResult<T> = Result<T, ParseError>;
