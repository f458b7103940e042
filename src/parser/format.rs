//! Structured format classification tags

use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of structured formats the engine understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatTag {
    Xml,
    Json,
    Unknown,
}

impl FormatTag {
    /// Wire name used at the service boundary
    pub fn as_str(&self) -> &'static str {
        match self {
            FormatTag::Xml => "xml",
            FormatTag::Json => "json",
            FormatTag::Unknown => "unknown",
        }
    }

    /// Upper-case name used in human-readable report text
    pub fn display_name(&self) -> &'static str {
        match self {
            FormatTag::Xml => "XML",
            FormatTag::Json => "JSON",
            FormatTag::Unknown => "UNKNOWN",
        }
    }

    /// Resolve a caller-supplied format name, case-insensitively.
    ///
    /// Returns `None` for anything that is not a parseable format, including
    /// the literal `unknown` tag.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "xml" => Some(FormatTag::Xml),
            "json" => Some(FormatTag::Json),
            _ => None,
        }
    }

    /// Conventional file extension for output payloads
    pub fn extension(&self) -> &'static str {
        match self {
            FormatTag::Xml => "xml",
            FormatTag::Json => "json",
            FormatTag::Unknown => "bin",
        }
    }
}

impl fmt::Display for FormatTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
