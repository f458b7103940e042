//! Core conversion engine: decode, parse, re-serialize, encode, report

use std::time::Instant;
use tracing::{debug, warn};

use crate::conversion::config::ConversionConfig;
use crate::conversion::limits;
use crate::conversion::registry::{ConversionHandler, ConversionRegistry, SupportedConversion};
use crate::error::{ConversionError, ConversionErrorKind, ConversionResult};
use crate::parser::payload::{decode_text, encode_payload};
use crate::parser::FormatTag;
use crate::report::{ConversionReport, Outcome, ReportBuilder};

/// Result of one conversion request
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionOutput {
    /// Base64-encoded destination document; absent on any failure
    pub payload: Option<String>,
    pub report: ConversionReport,
}

impl ConversionOutput {
    pub fn is_success(&self) -> bool {
        self.report.is_success()
    }
}

/// Main conversion engine
#[derive(Debug, Clone)]
pub struct ConversionEngine {
    config: ConversionConfig,
    registry: ConversionRegistry,
}

impl Default for ConversionEngine {
    fn default() -> Self {
        Self::new(ConversionConfig::default())
    }
}

impl ConversionEngine {
    /// Create a new conversion engine with the built-in pairs
    pub fn new(config: ConversionConfig) -> Self {
        Self::with_registry(config, ConversionRegistry::with_defaults())
    }

    pub fn with_registry(config: ConversionConfig, registry: ConversionRegistry) -> Self {
        Self { config, registry }
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    pub fn supported_conversions(&self) -> Vec<SupportedConversion> {
        self.registry.supported()
    }

    /// Convert a base64 payload between the named formats.
    ///
    /// Always returns a well-formed report. Unsupported pairs are rejected
    /// before any decoding with `elapsed_ms = 0`; every other failure carries
    /// the time spent up to the failure.
    pub fn convert(&self, src_format: &str, dst_format: &str, payload: &str) -> ConversionOutput {
        let (from, to, handler) = match self.resolve(src_format, dst_format) {
            Ok(resolved) => resolved,
            Err(err) => {
                warn!(src_format, dst_format, "unsupported conversion pair requested");
                return ConversionOutput {
                    payload: None,
                    report: ReportBuilder::build(Outcome::failure(err.report_details())),
                };
            }
        };

        let start_time = Instant::now();
        let result = self.run(handler.as_ref(), payload);
        let elapsed = start_time.elapsed();

        match result {
            Ok((encoded, nodes_processed)) => {
                debug!(
                    %from,
                    %to,
                    nodes_processed,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "conversion succeeded"
                );
                let details = format!(
                    "Successfully converted {} to {}. Nodes processed: {}",
                    from.display_name(),
                    to.display_name(),
                    nodes_processed
                );
                ConversionOutput {
                    payload: Some(encoded),
                    report: ReportBuilder::build(Outcome::success(details).with_elapsed(elapsed)),
                }
            }
            Err(err) => {
                warn!(%from, %to, error = %err, "conversion failed");
                ConversionOutput {
                    payload: None,
                    report: ReportBuilder::build(
                        Outcome::failure(err.report_details()).with_elapsed(elapsed),
                    ),
                }
            }
        }
    }

    fn resolve(
        &self,
        src_format: &str,
        dst_format: &str,
    ) -> ConversionResult<(FormatTag, FormatTag, std::sync::Arc<dyn ConversionHandler>)> {
        let unsupported = || {
            ConversionError::conversion(ConversionErrorKind::unsupported_pair(src_format, dst_format))
        };

        let from = FormatTag::from_name(src_format).ok_or_else(unsupported)?;
        let to = FormatTag::from_name(dst_format).ok_or_else(unsupported)?;
        let handler = self.registry.handler(from, to).ok_or_else(unsupported)?;
        Ok((from, to, handler))
    }

    /// Decode, convert and re-encode; returns the encoded output and node count
    fn run(&self, handler: &dyn ConversionHandler, payload: &str) -> ConversionResult<(String, usize)> {
        limits::check_payload_size(payload, &self.config)?;
        let input = decode_text(payload)?;
        let converted = handler.convert(&input, &self.config)?;
        Ok((
            encode_payload(converted.content.as_bytes()),
            converted.nodes_processed,
        ))
    }
}

/// Convert with a default engine
pub fn convert_document(src_format: &str, dst_format: &str, payload: &str) -> ConversionOutput {
    ConversionEngine::default().convert(src_format, dst_format, payload)
}
