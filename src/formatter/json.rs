//! JSON output for canonical trees

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::conversion::ConversionConfig;
use crate::error::{ConversionError, ConversionErrorKind, ConversionResult};
use crate::formatter::DocumentSerializer;
use crate::parser::{CanonicalDocument, FormatTag};

/// Writes canonical trees as JSON text, keeping mapping order
#[derive(Debug, Clone)]
pub struct JsonSerializer {
    indent: Vec<u8>,
    pretty: bool,
}

impl JsonSerializer {
    pub fn new(config: &ConversionConfig) -> Self {
        Self {
            indent: vec![b' '; config.indent_size as usize],
            pretty: config.pretty,
        }
    }
}

impl DocumentSerializer for JsonSerializer {
    fn format(&self) -> FormatTag {
        FormatTag::Json
    }

    fn serialize(&self, document: &CanonicalDocument) -> ConversionResult<String> {
        let value = document.to_json_value();

        let bytes = if self.pretty {
            let mut out = Vec::new();
            let formatter = PrettyFormatter::with_indent(&self.indent);
            let mut serializer = Serializer::with_formatter(&mut out, formatter);
            value
                .serialize(&mut serializer)
                .map_err(|e| serialization_error(e.into()))?;
            out
        } else {
            serde_json::to_vec(&value).map_err(|e| serialization_error(e.into()))?
        };

        String::from_utf8(bytes).map_err(|e| serialization_error(e.into()))
    }
}

fn serialization_error(source: anyhow::Error) -> ConversionError {
    ConversionError::conversion_with_source(
        ConversionErrorKind::serialization(source.to_string()),
        source,
    )
}
