use clap::Parser;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use serde_json::json;
use tracing_subscriber::EnvFilter;

use structconv::cli::{handle_error, Args, CliConfig, CliUtils, Commands, ReportStore};
use structconv::parser::payload::{decode_payload, encode_payload};
use structconv::parser::FormatTag;
use structconv::report::{Outcome, ReportBuilder};
use structconv::ConverterService;

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let config = match CliConfig::from_args(args) {
        Ok(config) => config,
        Err(err) => {
            handle_error(&err);
            return Ok(ExitCode::FAILURE);
        }
    };

    init_logging(&config);

    let service = ConverterService::new(config.conversion_config.clone());
    let store = config.report_store();

    let succeeded = match &config.args.command {
        Commands::Convert { src, dst, input } => {
            handle_convert(&config, &service, &store, src, dst, input)?
        }
        Commands::Detect { input } => handle_detect(&config, &service, &store, input)?,
        Commands::Validate {
            src,
            dst,
            src_file,
            dst_file,
            criteria,
        } => handle_validate(&config, &service, &store, src, dst, src_file, dst_file, criteria)?,
        Commands::List => handle_list(&config, &service),
    };

    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// `RUST_LOG` wins over the verbosity flags
fn init_logging(config: &CliConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn read_encoded(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read input file: {}", path.display()))?;
    tracing::debug!(path = %path.display(), size = bytes.len(), "input file read");
    Ok(encode_payload(&bytes))
}

fn handle_convert(
    config: &CliConfig,
    service: &ConverterService,
    store: &ReportStore,
    src: &str,
    dst: &str,
    input: &Path,
) -> Result<bool> {
    let encoded = read_encoded(input)?;
    let output = service.convert(src, dst, &encoded, None);

    let decoded = match output.payload.as_deref() {
        Some(payload) => Some(decode_payload(payload)?),
        None => None,
    };
    let extension = FormatTag::from_name(dst)
        .map(|tag| tag.extension())
        .unwrap_or("out");
    let saved = store.save(
        config.args.command.operation(),
        &output.report,
        decoded.as_deref().map(|bytes| (bytes, extension)),
    )?;

    let details = output.report.details.as_text().unwrap_or_default();
    if output.is_success() {
        CliUtils::show_success(details, config.is_quiet());
        CliUtils::show_info(
            &format!("elapsed: {} ms", output.report.elapsed_ms),
            config.is_quiet(),
        );
        if let Some(result_path) = &saved.result_path {
            CliUtils::show_info(
                &format!("result: {}", result_path.display()),
                config.is_quiet(),
            );
        }
    } else {
        CliUtils::show_error(details);
    }
    CliUtils::show_info(
        &format!("report: {}", saved.report_path.display()),
        config.is_quiet(),
    );

    Ok(output.is_success())
}

fn handle_detect(
    config: &CliConfig,
    service: &ConverterService,
    store: &ReportStore,
    input: &Path,
) -> Result<bool> {
    let encoded = read_encoded(input)?;
    let detection = service.detect(&encoded);

    let details = json!({
        "format": detection.format,
        "metadata": detection.metadata,
    });
    let outcome = if detection.format == FormatTag::Unknown {
        Outcome::failure(details)
    } else {
        Outcome::success(details)
    };
    let report = ReportBuilder::build(outcome);
    let saved = store.save(config.args.command.operation(), &report, None)?;

    if report.is_success() {
        CliUtils::show_success(
            &format!("Detected format: {}", detection.format.display_name()),
            config.is_quiet(),
        );
        if let Some(size) = detection.metadata.decoded_byte_length {
            CliUtils::show_info(
                &format!("size: {}", CliUtils::format_payload_size(size)),
                config.is_quiet(),
            );
        }
    } else {
        let reason = detection.metadata.error.as_deref().unwrap_or("unrecognized content");
        CliUtils::show_error(&format!("Could not detect format: {}", reason));
    }
    CliUtils::show_info(
        &format!("report: {}", saved.report_path.display()),
        config.is_quiet(),
    );

    Ok(report.is_success())
}

#[allow(clippy::too_many_arguments)]
fn handle_validate(
    config: &CliConfig,
    service: &ConverterService,
    store: &ReportStore,
    src: &str,
    dst: &str,
    src_file: &Path,
    dst_file: &Path,
    criteria: &str,
) -> Result<bool> {
    if !criteria.trim().is_empty() && criteria.trim() != "{}" {
        CliUtils::show_warning(
            "validation criteria are accepted but not applied",
            config.is_quiet(),
        );
    }

    let src_encoded = read_encoded(src_file)?;
    let dst_encoded = read_encoded(dst_file)?;
    let outcome = service.validate(src, dst, &src_encoded, &dst_encoded, criteria);

    let details = serde_json::to_value(&outcome).context("Failed to render validation outcome")?;
    let report = ReportBuilder::build(if outcome.is_valid {
        Outcome::success(details)
    } else {
        Outcome::failure(details)
    });
    let saved = store.save(config.args.command.operation(), &report, None)?;

    if outcome.is_valid {
        CliUtils::show_success(
            &format!("Documents are structurally equal ({} vs {})", src, dst),
            config.is_quiet(),
        );
    } else {
        let reason = outcome.reason.as_deref().unwrap_or("documents differ");
        CliUtils::show_error(&format!("Validation failed: {}", reason));
    }
    CliUtils::show_info(
        &format!("report: {}", saved.report_path.display()),
        config.is_quiet(),
    );

    Ok(outcome.is_valid)
}

fn handle_list(config: &CliConfig, service: &ConverterService) -> bool {
    let pairs = service.supported_conversions();
    if config.is_quiet() {
        return true;
    }
    println!("Supported conversions:");
    for pair in pairs {
        println!("  {} -> {}", pair.from, pair.to);
    }
    true
}
