//! Base64 payload handling at the service boundary

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::{ConversionError, ConversionResult};

/// Decode a base64 payload into raw bytes.
///
/// ASCII whitespace is ignored so line-wrapped payloads decode as well.
pub fn decode_payload(encoded: &str) -> ConversionResult<Vec<u8>> {
    let compact: String = encoded
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();

    STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| ConversionError::decode(format!("invalid base64 payload: {}", e)))
}

/// Decode a base64 payload and interpret it as UTF-8 text
pub fn decode_text(encoded: &str) -> ConversionResult<String> {
    let bytes = decode_payload(encoded)?;
    String::from_utf8(bytes)
        .map_err(|e| ConversionError::decode(format!("payload is not valid UTF-8: {}", e)))
}

/// Encode raw bytes as a base64 payload
pub fn encode_payload(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}
