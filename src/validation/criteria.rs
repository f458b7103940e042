//! Caller-supplied validation criteria

use serde_json::Value;
use tracing::debug;

/// Criteria accepted alongside a validation request.
///
/// Reserved for future comparison modes. The raw input is kept for
/// diagnostics, but nothing reads it when comparing documents: validation is
/// always plain structural equality. Malformed criteria are tolerated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationCriteria {
    raw: Option<Value>,
}

impl ValidationCriteria {
    /// Leniently interpret criteria JSON text
    pub fn parse(text: &str) -> Self {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Self::default();
        }

        match serde_json::from_str::<Value>(trimmed) {
            Ok(Value::Object(map)) if map.is_empty() => Self::default(),
            Ok(value) => {
                debug!(criteria = %value, "validation criteria are reserved and not applied");
                Self { raw: Some(value) }
            }
            Err(err) => {
                debug!(error = %err, "ignoring malformed validation criteria");
                Self::default()
            }
        }
    }

    pub fn raw(&self) -> Option<&Value> {
        self.raw.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_none()
    }
}
