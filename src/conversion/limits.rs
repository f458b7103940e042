use crate::conversion::config::ConversionConfig;
use crate::error::{ConversionError, ConversionErrorKind, ConversionResult};

/// Check the encoded payload size before attempting to decode it.
/// This avoids allocating for payloads larger than the configured limit.
pub fn check_payload_size(encoded: &str, config: &ConversionConfig) -> ConversionResult<()> {
    let size = encoded.len();
    if size > config.max_payload_bytes {
        return Err(ConversionError::conversion(
            ConversionErrorKind::PayloadTooLarge {
                size,
                limit: config.max_payload_bytes,
            },
        ));
    }

    Ok(())
}
