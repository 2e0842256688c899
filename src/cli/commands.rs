//! Command implementations for the sheet2geojson CLI
//!
//! This module contains the command execution logic, report printing and
//! logging setup for the CLI interface.

use crate::app::services::geojson_writer::GeoJsonWriter;
use crate::app::services::pipeline::{Pipeline, PipelineOutput, PipelineReport};
use crate::app::services::reprojection::supported_codes;
use crate::app::services::table_reader::{InputSource, ReadStats, TableReader};
use crate::cli::args::{Commands, ConvertArgs, CrsArgs, InspectArgs, OutputFormat, PipelineOptions};
use crate::config::Config;
use crate::constants::TARGET_CRS;
use anyhow::{Context, Result};
use colored::*;
use serde::Serialize;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Report of a convert run
#[derive(Debug, Clone, Serialize)]
pub struct ConvertReport {
    pub source: String,
    pub output: PathBuf,
    pub bytes_written: u64,
    pub read: ReadStats,
    pub pipeline: PipelineReport,
    #[serde(skip)]
    pub elapsed: Duration,
}

/// Report of an inspect run
#[derive(Debug, Clone, Serialize)]
pub struct InspectReport {
    pub source: String,
    pub read: ReadStats,
    pub pipeline: PipelineReport,
}

/// Main command runner
pub fn run(command: Commands) -> Result<()> {
    setup_logging(command.get_log_level());
    debug!("Command: {:?}", command);

    match command {
        Commands::Convert(args) => {
            let report = run_convert(&args)?;
            print_convert_report(&report, args.output_format)
        }
        Commands::Inspect(args) => {
            let report = run_inspect(&args)?;
            print_inspect_report(&report, args.output_format)
        }
        Commands::Crs(args) => run_crs(&args),
    }
}

/// Set up structured logging at the given level
fn setup_logging(log_level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("sheet2geojson={}", log_level)));

    let initialised = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init();

    if initialised.is_ok() {
        debug!("Logging initialized at level: {}", log_level);
    }
}

/// Load configuration using layered approach (defaults -> file -> args)
pub fn load_configuration(options: &PipelineOptions) -> Result<Config> {
    let config_file = match &options.config_file {
        Some(path) => Some(path.clone()),
        None => Config::default_config_path()
            .ok()
            .filter(|path| path.exists()),
    };

    let config = Config::load_layered(config_file.as_deref())?;
    let config = options.apply_overrides(config);
    config.validate()?;

    debug!("Loaded configuration: {:?}", config);
    Ok(config)
}

/// Read a source and run the pipeline over it
fn convert_source(
    source: &InputSource,
    options: &PipelineOptions,
) -> Result<(ReadStats, PipelineOutput)> {
    let config = load_configuration(options)?;
    let reader = TableReader::new().with_delimiter(config.delimiter)?;
    let pipeline = Pipeline::new(config)?;

    let read = reader
        .read(source)
        .with_context(|| format!("Failed to read table from {}", source))?;

    let output = pipeline
        .run_raw(&read.table)
        .with_context(|| format!("Failed to convert {}", source))?;

    Ok((read.stats, output))
}

/// Convert one source and write the document
pub fn run_convert(args: &ConvertArgs) -> Result<ConvertReport> {
    let start_time = Instant::now();
    let (read, output) = convert_source(&args.source, &args.options)?;

    let bytes_written = GeoJsonWriter::new()
        .with_pretty(args.pretty)
        .write_file(&output.collection, &args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    Ok(ConvertReport {
        source: args.source.to_string(),
        output: args.output.clone(),
        bytes_written,
        read,
        pipeline: output.report,
        elapsed: start_time.elapsed(),
    })
}

/// Run the pipeline without writing anything
pub fn run_inspect(args: &InspectArgs) -> Result<InspectReport> {
    let (read, output) = convert_source(&args.source, &args.options)?;

    Ok(InspectReport {
        source: args.source.to_string(),
        read,
        pipeline: output.report,
    })
}

fn run_crs(args: &CrsArgs) -> Result<()> {
    let codes = supported_codes();

    match args.output_format {
        OutputFormat::Human => {
            println!(
                "{} (target: EPSG:{})",
                "Supported source CRS".bright_green().bold(),
                TARGET_CRS
            );
            for (code, name) in &codes {
                println!("   {}  {}", format!("EPSG:{:<6}", code).bright_white(), name);
            }
        }
        OutputFormat::Json => {
            let entries: Vec<serde_json::Value> = codes
                .iter()
                .map(|(code, name)| serde_json::json!({ "code": code, "name": name }))
                .collect();
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
    }
    Ok(())
}

fn print_convert_report(report: &ConvertReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Human => {
            println!(
                "{} {} features. Dropped: {}. Written → {}",
                "OK:".bright_green().bold(),
                report.pipeline.features.to_string().bright_white().bold(),
                dropped_label(report.pipeline.dropped),
                report.output.display()
            );
            info!(
                "Converted {} in {:.2?} ({} bytes)",
                report.source, report.elapsed, report.bytes_written
            );
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
    }
    Ok(())
}

fn print_inspect_report(report: &InspectReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Human => {
            let pipeline = &report.pipeline;
            println!("\n{}", "Inspection Summary".bright_green().bold());
            println!("   • Source: {}", report.source);
            println!(
                "   • Records read: {} (delimiter {:?}, {} skipped)",
                report.read.records_read, report.read.delimiter, report.read.records_skipped
            );
            if let Some(header_row) = pipeline.header_row {
                println!("   • Header row: {}", header_row);
            }
            println!(
                "   • Coordinate columns: X = '{}', Y = '{}'",
                pipeline.x_column, pipeline.y_column
            );
            println!(
                "   • Source CRS: EPSG:{} ({})",
                pipeline.source_crs, pipeline.source_crs_name
            );
            println!(
                "   • Rows: {} -> {} ({} dropped)",
                pipeline.rows_before,
                pipeline.rows_after.to_string().bright_white().bold(),
                dropped_label(pipeline.dropped)
            );
            println!("   • Features: {}", pipeline.features);
            println!();
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
    }
    Ok(())
}

fn dropped_label(dropped: usize) -> ColoredString {
    if dropped > 0 {
        dropped.to_string().bright_yellow().bold()
    } else {
        dropped.to_string().normal()
    }
}
