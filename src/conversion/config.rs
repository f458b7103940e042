//! Configuration options for document conversion

use crate::parser::DEFAULT_MAX_DEPTH;

/// Conversion configuration options
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionConfig {
    /// Spaces per indentation level (0-8)
    pub indent_size: u8,
    /// Pretty-print output (vs compact)
    pub pretty: bool,
    /// Maximum accepted payload size in bytes, measured on the encoded form
    pub max_payload_bytes: usize,
    /// Maximum nesting depth
    pub max_depth: Option<usize>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            indent_size: 2,
            pretty: true,
            max_payload_bytes: 100 * 1024 * 1024, // 100MB
            max_depth: Some(DEFAULT_MAX_DEPTH),
        }
    }
}

impl ConversionConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Create configuration for small payloads (<10MB)
    pub fn small_payloads() -> Self {
        Self {
            max_payload_bytes: 10 * 1024 * 1024, // 10MB
            max_depth: Some(100),
            ..Default::default()
        }
    }

    /// Create configuration producing compact single-line output
    pub fn compact() -> Self {
        Self {
            pretty: false,
            ..Default::default()
        }
    }

    /// Set indentation size
    pub fn with_indent_size(mut self, size: u8) -> Result<Self, String> {
        if size > 8 {
            return Err("Indent size must be 0-8 spaces".to_string());
        }
        self.indent_size = size;
        Ok(self)
    }

    /// Enable/disable pretty printing
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Set payload size limit
    pub fn with_max_payload_bytes(mut self, limit_bytes: usize) -> Self {
        self.max_payload_bytes = limit_bytes;
        self
    }

    /// Set maximum nesting depth
    pub fn with_max_depth(mut self, depth: Option<usize>) -> Self {
        self.max_depth = depth;
        self
    }

    /// Validate configuration consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.indent_size > 8 {
            return Err("Indent size must be 0-8 spaces".to_string());
        }

        if self.max_payload_bytes < 1024 {
            return Err("Payload limit must be at least 1KB".to_string());
        }

        if let Some(depth) = self.max_depth {
            if depth == 0 {
                return Err("Max depth must be at least 1".to_string());
            }
        }

        Ok(())
    }
}
