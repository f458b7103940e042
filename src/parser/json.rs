//! JSON to canonical tree parsing

use serde::Deserialize;

use crate::error::{ParseError, ParseResult};
use crate::parser::document::CanonicalDocument;
use crate::parser::FormatTag;

/// Parse a JSON document into a canonical tree.
///
/// With a nesting limit, serde_json's fixed recursion limit is lifted and
/// the limit is enforced by scanning the text first, so any document the
/// XML parser accepts at the same limit can be read back.
pub fn parse_json(content: &str, max_depth: Option<usize>) -> ParseResult<CanonicalDocument> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(ParseError::new(
            FormatTag::Json,
            "Empty JSON document".to_string(),
            None,
        ));
    }

    let value = match max_depth {
        Some(limit) => {
            scan_nesting(content, limit)?;
            let mut deserializer = serde_json::Deserializer::from_str(content);
            deserializer.disable_recursion_limit();
            let value = serde_json::Value::deserialize(&mut deserializer).map_err(invalid_json)?;
            deserializer.end().map_err(invalid_json)?;
            value
        }
        None => serde_json::from_str(content).map_err(invalid_json)?,
    };

    Ok(CanonicalDocument::from(value))
}

/// serde_json appends "at line L column C" to its message; the location
/// lives in the `ParseError` instead.
fn invalid_json(error: serde_json::Error) -> ParseError {
    let text = error.to_string();
    let suffix = format!(" at line {} column {}", error.line(), error.column());
    let message = text.strip_suffix(suffix.as_str()).unwrap_or(&text);
    let location = (error.line() > 0).then(|| (error.line(), error.column()));
    ParseError::new(FormatTag::Json, format!("Invalid JSON: {}", message), location)
}

/// Reject text whose container nesting already rules it out.
///
/// A container opened at bracket depth `limit + 2` sits at tree depth
/// `limit + 1`, which the exact tree check would refuse anyway.
fn scan_nesting(content: &str, limit: usize) -> ParseResult<()> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, byte) in content.bytes().enumerate() {
        if in_string {
            match byte {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match byte {
            b'"' => in_string = true,
            b'{' | b'[' => {
                depth += 1;
                if depth > limit.saturating_add(1) {
                    return Err(ParseError::new(
                        FormatTag::Json,
                        format!("Maximum nesting depth exceeded: {}", limit),
                        None,
                    )
                    .at_offset(content, offset));
                }
            }
            b'}' | b']' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    Ok(())
}
