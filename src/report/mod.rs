//! Uniform `{status, elapsed_ms, details}` report shared by every operation

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

/// Overall result of an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Success,
    Error,
}

impl ReportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Success => "success",
            ReportStatus::Error => "error",
        }
    }
}

/// Free-text or structured diagnostic payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReportDetails {
    Text(String),
    Structured(Value),
}

impl ReportDetails {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ReportDetails::Text(text) => Some(text),
            ReportDetails::Structured(_) => None,
        }
    }
}

impl From<String> for ReportDetails {
    fn from(text: String) -> Self {
        ReportDetails::Text(text)
    }
}

impl From<&str> for ReportDetails {
    fn from(text: &str) -> Self {
        ReportDetails::Text(text.to_string())
    }
}

impl From<Value> for ReportDetails {
    fn from(value: Value) -> Self {
        ReportDetails::Structured(value)
    }
}

/// Report returned by every core operation. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionReport {
    pub status: ReportStatus,
    pub elapsed_ms: u64,
    pub details: ReportDetails,
}

impl ConversionReport {
    pub fn is_success(&self) -> bool {
        self.status == ReportStatus::Success
    }

    pub fn to_value(&self) -> Value {
        let details = match &self.details {
            ReportDetails::Text(text) => Value::String(text.clone()),
            ReportDetails::Structured(value) => value.clone(),
        };
        serde_json::json!({
            "status": self.status.as_str(),
            "elapsed_ms": self.elapsed_ms,
            "details": details,
        })
    }

    /// Render the report as UTF-8 JSON text
    pub fn to_json(&self) -> String {
        self.to_value().to_string()
    }
}

/// What an operation observed, before it is shaped into a report
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub status: ReportStatus,
    pub elapsed: Option<Duration>,
    pub details: ReportDetails,
}

impl Outcome {
    pub fn success(details: impl Into<ReportDetails>) -> Self {
        Self {
            status: ReportStatus::Success,
            elapsed: None,
            details: details.into(),
        }
    }

    pub fn failure(details: impl Into<ReportDetails>) -> Self {
        Self {
            status: ReportStatus::Error,
            elapsed: None,
            details: details.into(),
        }
    }

    pub fn with_elapsed(mut self, elapsed: Duration) -> Self {
        self.elapsed = Some(elapsed);
        self
    }
}

/// Assembles reports from outcomes. Pure, no I/O.
pub struct ReportBuilder;

impl ReportBuilder {
    /// Build a report; `elapsed_ms` is `0` when the outcome carries no timing
    pub fn build(outcome: Outcome) -> ConversionReport {
        ConversionReport {
            status: outcome.status,
            elapsed_ms: outcome
                .elapsed
                .map(|elapsed| elapsed.as_millis() as u64)
                .unwrap_or(0),
            details: outcome.details,
        }
    }
}
