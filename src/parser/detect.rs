//! Syntactic format sniffing for opaque payloads

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::parser::payload::decode_payload;
use crate::parser::FormatTag;

const DECODE_FAILURE: &str = "decode failure";

/// Size information attached to every detection result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionMetadata {
    /// Length of the payload as received (base64 characters)
    pub encoded_length: usize,
    /// Length of the decoded payload in bytes, when base64 decoding succeeded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decoded_byte_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Outcome of [`FormatDetector::detect`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Detection {
    pub format: FormatTag,
    pub metadata: DetectionMetadata,
}

/// Classifies payloads by their outer delimiters.
///
/// This is a heuristic rather than a validating parse: a malformed document
/// with matching outer delimiters is still classified by them.
pub struct FormatDetector;

impl FormatDetector {
    /// Detect the format of a base64-encoded payload. Never fails; decoding
    /// problems yield [`FormatTag::Unknown`] with an error marker.
    pub fn detect(encoded: &str) -> Detection {
        let encoded_length = encoded.len();

        let bytes = match decode_payload(encoded) {
            Ok(bytes) => bytes,
            Err(err) => {
                debug!(encoded_length, error = %err, "payload is not valid base64");
                return Detection {
                    format: FormatTag::Unknown,
                    metadata: DetectionMetadata {
                        encoded_length,
                        decoded_byte_length: None,
                        error: Some(DECODE_FAILURE.to_string()),
                    },
                };
            }
        };

        let decoded_byte_length = Some(bytes.len());
        let detection = match std::str::from_utf8(&bytes) {
            Ok(text) => Detection {
                format: Self::classify(text),
                metadata: DetectionMetadata {
                    encoded_length,
                    decoded_byte_length,
                    error: None,
                },
            },
            Err(_) => Detection {
                format: FormatTag::Unknown,
                metadata: DetectionMetadata {
                    encoded_length,
                    decoded_byte_length,
                    error: Some(DECODE_FAILURE.to_string()),
                },
            },
        };

        debug!(
            format = %detection.format,
            encoded_length,
            decoded_byte_length = ?detection.metadata.decoded_byte_length,
            "detected payload format"
        );
        detection
    }

    /// Classify decoded text by its trimmed outer delimiters
    pub fn classify(text: &str) -> FormatTag {
        let trimmed = text.trim();
        if trimmed.starts_with('<') && trimmed.ends_with('>') {
            FormatTag::Xml
        } else if trimmed.starts_with('{') || trimmed.starts_with('[') {
            FormatTag::Json
        } else {
            FormatTag::Unknown
        }
    }
}
