//! The four operations exposed across the service boundary.
//!
//! Binary payloads travel base64-encoded and every structured return value
//! is UTF-8 JSON text. Each operation is total: failures come back as error
//! reports or invalid outcomes, never as faults. The service holds no mutable
//! state, so one instance may serve concurrent callers.

use serde::Serialize;
use tracing::{debug, info};

use crate::conversion::{ConversionConfig, ConversionEngine, ConversionOutput, SupportedConversion};
use crate::parser::{Detection, FormatDetector};
use crate::validation::{ValidationOutcome, Validator};

/// In-process implementation of the converter service
#[derive(Debug, Clone, Default)]
pub struct ConverterService {
    engine: ConversionEngine,
    validator: Validator,
}

impl ConverterService {
    pub fn new(config: ConversionConfig) -> Self {
        Self {
            engine: ConversionEngine::new(config.clone()),
            validator: Validator::new(config),
        }
    }

    pub fn with_engine(engine: ConversionEngine) -> Self {
        let validator = Validator::new(engine.config().clone());
        Self { engine, validator }
    }

    /// Convert a document. `options` is accepted for interface compatibility
    /// and currently has no effect.
    pub fn convert(
        &self,
        src_format: &str,
        dst_format: &str,
        data_in: &str,
        options: Option<&str>,
    ) -> ConversionOutput {
        info!(src_format, dst_format, "convert requested");
        if let Some(options) = options {
            debug!(options, "conversion options are reserved and not applied");
        }
        self.engine.convert(src_format, dst_format, data_in)
    }

    pub fn detect(&self, data: &str) -> Detection {
        info!(encoded_length = data.len(), "format detection requested");
        FormatDetector::detect(data)
    }

    pub fn validate(
        &self,
        src_format: &str,
        dst_format: &str,
        data_src: &str,
        data_dst: &str,
        criteria: &str,
    ) -> ValidationOutcome {
        info!(src_format, dst_format, "validation requested");
        self.validator
            .validate(src_format, dst_format, data_src, data_dst, criteria)
    }

    pub fn supported_conversions(&self) -> Vec<SupportedConversion> {
        self.engine.supported_conversions()
    }

    /// `ConvertXtoY`: returns the base64 output (if any) and the report JSON
    pub fn convert_x_to_y(
        &self,
        src_format: &str,
        dst_format: &str,
        data_in: &str,
        options: Option<&str>,
    ) -> (Option<String>, String) {
        let output = self.convert(src_format, dst_format, data_in, options);
        (output.payload, output.report.to_json())
    }

    /// `DetectFormat`: returns the format tag and the metadata JSON
    pub fn detect_format(&self, data: &str) -> (String, String) {
        let detection = self.detect(data);
        (
            detection.format.as_str().to_string(),
            to_json_text(&detection.metadata),
        )
    }

    /// `ValidateConversion`: returns validity and the outcome JSON
    pub fn validate_conversion(
        &self,
        src_format: &str,
        dst_format: &str,
        data_src: &str,
        data_dst: &str,
        criteria: &str,
    ) -> (bool, String) {
        let outcome = self.validate(src_format, dst_format, data_src, data_dst, criteria);
        (outcome.is_valid, outcome.to_json())
    }

    /// `ListSupportedConversions`: JSON array of `{from, to}` pairs
    pub fn list_supported_conversions(&self) -> String {
        to_json_text(&self.supported_conversions())
    }
}

fn to_json_text<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value)
        .unwrap_or_else(|err| serde_json::json!({ "error": err.to_string() }).to_string())
}
