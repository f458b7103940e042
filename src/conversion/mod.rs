//! Document conversion module
//!
//! This module contains the conversion engine, its pair registry,
//! configuration, and payload limits.

pub mod config;
pub mod engine;
pub mod limits;
pub mod registry;

pub use config::ConversionConfig;

pub use engine::{convert_document, ConversionEngine, ConversionOutput};
pub use registry::{
    ConversionHandler, ConversionRegistry, ConvertedDocument, SupportedConversion, TreeConversion,
};

pub use crate::error::ConversionResult;
