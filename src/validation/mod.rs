//! Structural validation of converted documents
//!
//! Both documents are parsed with their declared formats and their canonical
//! trees compared for structural equality. Scalars are not type-normalized:
//! an XML string never equals a JSON number, so callers wanting numeric
//! tolerance must normalize beforehand.

pub mod criteria;
pub mod difference;

pub use criteria::ValidationCriteria;
pub use difference::{first_difference, Difference};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::conversion::{limits, ConversionConfig};
use crate::error::{ConversionError, ConversionErrorKind, ConversionResult};
use crate::parser::payload::decode_text;
use crate::parser::{CanonicalDocument, FormatTag, StructuralParser};

/// Comparison performed by the validator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonKind {
    StructuralEquality,
}

/// Result of one validation call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    pub is_valid: bool,
    pub comparison_kind: ComparisonKind,
    pub src_format: String,
    pub dst_format: String,
    /// Why the documents were judged not equivalent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl ValidationOutcome {
    /// Render the outcome as UTF-8 JSON text
    pub fn to_json(&self) -> String {
        serde_json::to_value(self)
            .map(|value| value.to_string())
            .unwrap_or_else(|_| {
                serde_json::json!({
                    "is_valid": self.is_valid,
                    "comparison_kind": "structural_equality",
                })
                .to_string()
            })
    }
}

/// Compares documents of possibly different formats
#[derive(Debug, Clone, Default)]
pub struct Validator {
    config: ConversionConfig,
}

impl Validator {
    pub fn new(config: ConversionConfig) -> Self {
        Self { config }
    }

    /// Validate that two base64 payloads hold structurally equal documents.
    ///
    /// Never fails: a payload that cannot be decoded or parsed makes the
    /// outcome invalid. `criteria` is accepted but not applied.
    pub fn validate(
        &self,
        src_format: &str,
        dst_format: &str,
        src_payload: &str,
        dst_payload: &str,
        criteria: &str,
    ) -> ValidationOutcome {
        let _criteria = ValidationCriteria::parse(criteria);

        let load = |side: &str, format: &str, payload: &str| {
            self.load(side, format, payload)
                .map_err(|err| format!("{}: {}", side, err.report_details()))
        };
        let comparison = load("source", src_format, src_payload)
            .and_then(|src| Ok((src, load("destination", dst_format, dst_payload)?)));

        let reason = match comparison {
            Ok((src, dst)) => first_difference(&src, &dst)
                .map(|difference| format!("documents differ at {}", difference)),
            Err(reason) => Some(reason),
        };

        let outcome = ValidationOutcome {
            is_valid: reason.is_none(),
            comparison_kind: ComparisonKind::StructuralEquality,
            src_format: src_format.to_string(),
            dst_format: dst_format.to_string(),
            reason,
        };
        debug!(
            src_format,
            dst_format,
            is_valid = outcome.is_valid,
            reason = ?outcome.reason,
            "validation finished"
        );
        outcome
    }

    fn load(&self, side: &str, format: &str, payload: &str) -> ConversionResult<CanonicalDocument> {
        debug!(side, format, encoded_length = payload.len(), "loading document for validation");
        let tag = FormatTag::from_name(format).ok_or_else(|| {
            ConversionError::conversion(ConversionErrorKind::unsupported_format(format))
        })?;
        limits::check_payload_size(payload, &self.config)?;
        let text = decode_text(payload)?;
        let document = StructuralParser::new(self.config.max_depth).parse(&text, tag)?;
        Ok(document)
    }
}

/// Validate with a default validator
pub fn validate_conversion(
    src_format: &str,
    dst_format: &str,
    src_payload: &str,
    dst_payload: &str,
    criteria: &str,
) -> ValidationOutcome {
    Validator::default().validate(src_format, dst_format, src_payload, dst_payload, criteria)
}
