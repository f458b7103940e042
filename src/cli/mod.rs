//! Command-line interface module

use clap::{Parser, Subcommand};
use console::style;
use std::path::PathBuf;

use crate::conversion::ConversionConfig;
use crate::error::{ConversionError, ConversionErrorKind};

pub mod reports;

pub use reports::{ReportStore, SavedReport};

/// Main CLI arguments
#[derive(Parser, Debug, Clone)]
#[command(name = "structconv")]
#[command(about = "Convert, detect and validate structured documents (XML, JSON)")]
#[command(version)]
#[command(long_about = None)]
pub struct Args {
    /// Directory receiving numbered reports and conversion results
    #[arg(long, global = true, default_value = "reports")]
    pub reports_dir: PathBuf,

    /// Spaces per indentation level in JSON output (0-8, default: 2)
    #[arg(long, global = true)]
    pub indent: Option<u8>,

    /// Emit compact JSON output
    #[arg(long, global = true)]
    pub plain: bool,

    /// Maximum encoded payload size (e.g., 10MB, default: 100MB)
    #[arg(long, global = true)]
    pub max_payload: Option<String>,

    /// Maximum document nesting depth (default: 1000)
    #[arg(long, global = true)]
    pub max_depth: Option<usize>,

    /// Enable verbose logging
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Convert a document file between formats
    Convert {
        /// Source format name
        #[arg(long)]
        src: String,
        /// Destination format name
        #[arg(long)]
        dst: String,
        /// Input document file
        input: PathBuf,
    },
    /// Detect the format of a document file
    Detect {
        /// Input document file
        input: PathBuf,
    },
    /// Check that two documents are structurally equivalent
    Validate {
        /// Source format name
        #[arg(long)]
        src: String,
        /// Destination format name
        #[arg(long)]
        dst: String,
        /// Source document file
        src_file: PathBuf,
        /// Destination document file
        dst_file: PathBuf,
        /// Validation criteria as JSON (accepted, not applied)
        #[arg(long, default_value = "{}")]
        criteria: String,
    },
    /// List supported conversion pairs
    List,
}

impl Commands {
    /// Operation name used for report file names
    pub fn operation(&self) -> &'static str {
        match self {
            Commands::Convert { .. } => "convert",
            Commands::Detect { .. } => "detect",
            Commands::Validate { .. } => "validate",
            Commands::List => "list",
        }
    }
}

/// CLI configuration
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub args: Args,
    pub conversion_config: ConversionConfig,
}

impl CliConfig {
    /// Create CLI configuration from arguments
    pub fn from_args(args: Args) -> CliResult<Self> {
        let conversion_config = Self::create_conversion_config(&args)?;

        Ok(Self {
            args,
            conversion_config,
        })
    }

    /// Create conversion configuration from CLI arguments
    fn create_conversion_config(args: &Args) -> CliResult<ConversionConfig> {
        let max_payload_bytes = parse_max_payload(&args.max_payload)?;

        let config = ConversionConfig {
            indent_size: args.indent.unwrap_or(2),
            pretty: !args.plain,
            max_payload_bytes,
            max_depth: Some(args.max_depth.unwrap_or(crate::parser::DEFAULT_MAX_DEPTH)),
        };

        config
            .validate()
            .map_err(|e| ConversionError::conversion(ConversionErrorKind::configuration(e)))?;

        Ok(config)
    }

    pub fn report_store(&self) -> ReportStore {
        ReportStore::new(self.args.reports_dir.clone())
    }

    /// Check if quiet mode is enabled
    pub fn is_quiet(&self) -> bool {
        self.args.quiet
    }

    /// Default log filter for the selected verbosity
    pub fn log_level(&self) -> &'static str {
        if self.args.verbose {
            "debug"
        } else if self.args.quiet {
            "error"
        } else {
            "warn"
        }
    }
}

const KIB: usize = 1024;
const MIB: usize = 1024 * KIB;
const GIB: usize = 1024 * MIB;

/// Size suffixes of `--max-payload`, largest first
const SIZE_UNITS: [(&str, usize); 3] = [("GB", GIB), ("MB", MIB), ("KB", KIB)];

/// Parse a payload limit string (e.g., "100MB", "1GB", "500KB")
fn parse_max_payload(limit: &Option<String>) -> CliResult<usize> {
    let limit_str = match limit {
        None => return Ok(100 * MIB),
        Some(limit_str) => limit_str.trim().to_uppercase(),
    };

    let invalid = || {
        ConversionError::conversion(ConversionErrorKind::configuration(format!(
            "Invalid payload limit: {}",
            limit_str
        )))
    };

    let scaled = SIZE_UNITS
        .iter()
        .find_map(|(suffix, unit)| limit_str.strip_suffix(suffix).map(|size| (size, *unit)));
    let Some((number, unit)) = scaled else {
        let bytes = limit_str.strip_suffix('B').unwrap_or(&limit_str);
        return bytes.trim().parse::<usize>().map_err(|_| invalid());
    };

    let value = number.trim().parse::<f64>().map_err(|_| invalid())?;
    if !value.is_finite() || value < 0.0 {
        return Err(invalid());
    }
    Ok((value * unit as f64) as usize)
}

/// CLI utilities and helpers
pub struct CliUtils;

impl CliUtils {
    /// Render a byte count with the largest unit `--max-payload` accepts
    pub fn format_payload_size(bytes: usize) -> String {
        SIZE_UNITS
            .iter()
            .find(|(_, unit)| bytes >= *unit)
            .map(|(suffix, unit)| format!("{:.1}{}", bytes as f64 / *unit as f64, suffix))
            .unwrap_or_else(|| format!("{}B", bytes))
    }

    /// Show a success message (if not in quiet mode)
    pub fn show_success(message: &str, quiet: bool) {
        if !quiet {
            println!("{} {}", style("✓").green(), message);
        }
    }

    /// Show an informational line (if not in quiet mode)
    pub fn show_info(message: &str, quiet: bool) {
        if !quiet {
            println!("  {}", style(message).dim());
        }
    }

    /// Show an error message
    pub fn show_error(message: &str) {
        eprintln!("{} {}", style("✗").red(), message);
    }

    /// Show a warning message (if not in quiet mode)
    pub fn show_warning(message: &str, quiet: bool) {
        if !quiet {
            eprintln!("{} {}", style("⚠").yellow(), message);
        }
    }
}

/// Handle CLI errors with user-friendly messages
pub fn handle_error(error: &ConversionError) {
    let message = error.user_message();
    CliUtils::show_error(&message);

    if let ConversionError::Conversion { kind, .. } = error {
        match kind {
            ConversionErrorKind::Configuration { .. } => {
                eprintln!("\nTip: --indent accepts 0-8 and --max-payload accepts sizes like 512KB or 10MB");
            }
            ConversionErrorKind::PayloadTooLarge { .. } => {
                eprintln!("\nTip: Use --max-payload to raise the size limit");
            }
            _ => {}
        }
    }

    eprintln!("\nTry 'structconv --help' for usage information.");
}

/// Command execution result
pub type CliResult<T> = Result<T, ConversionError>;
