//! Registered (source, destination) conversion pairs

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::conversion::config::ConversionConfig;
use crate::error::{ConversionError, ConversionErrorKind, ConversionResult};
use crate::formatter::serializer_for;
use crate::parser::{FormatTag, StructuralParser};

/// Output of a single handler run
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertedDocument {
    pub content: String,
    /// Structural nodes directly under the document root
    pub nodes_processed: usize,
}

/// Converts decoded source text into destination text
pub trait ConversionHandler: Send + Sync {
    fn convert(&self, input: &str, config: &ConversionConfig) -> ConversionResult<ConvertedDocument>;
}

/// Parses into the canonical tree, then re-serializes in the destination format
#[derive(Debug, Clone, Copy)]
pub struct TreeConversion {
    from: FormatTag,
    to: FormatTag,
}

impl TreeConversion {
    pub fn new(from: FormatTag, to: FormatTag) -> Self {
        Self { from, to }
    }
}

impl ConversionHandler for TreeConversion {
    fn convert(&self, input: &str, config: &ConversionConfig) -> ConversionResult<ConvertedDocument> {
        let document = StructuralParser::new(config.max_depth).parse(input, self.from)?;

        let serializer = serializer_for(self.to, config).ok_or_else(|| {
            ConversionError::conversion(ConversionErrorKind::serialization(format!(
                "no serializer for {}",
                self.to
            )))
        })?;
        let content = serializer.serialize(&document)?;

        Ok(ConvertedDocument {
            content,
            nodes_processed: document.top_level_nodes(),
        })
    }
}

/// Entry of the supported-conversions listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportedConversion {
    pub from: FormatTag,
    pub to: FormatTag,
}

/// Pair-to-handler table consulted by the conversion engine.
///
/// Supporting a new pair means registering a handler here; call sites
/// never change.
#[derive(Clone)]
pub struct ConversionRegistry {
    handlers: Vec<(SupportedConversion, Arc<dyn ConversionHandler>)>,
}

impl ConversionRegistry {
    /// Create a registry with no pairs
    pub fn empty() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Create a registry holding the built-in pairs
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        registry.register(
            FormatTag::Xml,
            FormatTag::Json,
            Arc::new(TreeConversion::new(FormatTag::Xml, FormatTag::Json)),
        );
        registry
    }

    /// Register or replace the handler for a pair
    pub fn register(&mut self, from: FormatTag, to: FormatTag, handler: Arc<dyn ConversionHandler>) {
        let pair = SupportedConversion { from, to };
        match self.handlers.iter_mut().find(|(existing, _)| *existing == pair) {
            Some(slot) => slot.1 = handler,
            None => self.handlers.push((pair, handler)),
        }
    }

    pub fn handler(&self, from: FormatTag, to: FormatTag) -> Option<Arc<dyn ConversionHandler>> {
        let pair = SupportedConversion { from, to };
        self.handlers
            .iter()
            .find(|(existing, _)| *existing == pair)
            .map(|(_, handler)| Arc::clone(handler))
    }

    pub fn is_supported(&self, from: FormatTag, to: FormatTag) -> bool {
        self.handler(from, to).is_some()
    }

    /// Registered pairs in registration order
    pub fn supported(&self) -> Vec<SupportedConversion> {
        self.handlers.iter().map(|(pair, _)| *pair).collect()
    }
}

impl Default for ConversionRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl std::fmt::Debug for ConversionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConversionRegistry")
            .field("pairs", &self.supported())
            .finish()
    }
}
