//! Command-line argument definitions for sheet2geojson
//!
//! This module defines the complete CLI interface using clap derive API.

use crate::app::services::table_reader::InputSource;
use crate::config::{Config, HeaderMode};
use crate::constants::DEFAULT_OUTPUT_PATH;
use crate::{Error, Result};
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::str::FromStr;

/// CLI arguments for the spreadsheet to GeoJSON converter
///
/// Converts CSV exports with projected point coordinates into GeoJSON
/// feature collections in WGS84.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "sheet2geojson",
    version,
    about = "Convert spreadsheet exports with projected coordinates into WGS84 GeoJSON",
    long_about = "Reads a CSV export from a file or URL, finds the header row behind any banner \
                  rows, resolves the X/Y coordinate columns, drops rows without numeric \
                  coordinates, reprojects the rest to WGS84 and writes a GeoJSON \
                  FeatureCollection with one point per row."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Convert a table to a GeoJSON document
    Convert(ConvertArgs),
    /// Run the pipeline and print its report without writing anything
    Inspect(InspectArgs),
    /// List supported source CRS codes
    Crs(CrsArgs),
}

/// Arguments for the convert command
#[derive(Debug, Clone, Parser)]
pub struct ConvertArgs {
    /// Input CSV file path or http(s) URL
    #[arg(value_name = "SOURCE")]
    pub source: InputSource,

    /// Output path for the GeoJSON document
    #[arg(
        short = 'o',
        long = "output",
        value_name = "PATH",
        default_value = DEFAULT_OUTPUT_PATH,
        help = "Output path for the GeoJSON document"
    )]
    pub output: PathBuf,

    /// Indent the document
    #[arg(long = "pretty", help = "Write indented GeoJSON")]
    pub pretty: bool,

    /// Output format for the run report
    #[arg(
        long = "format",
        value_enum,
        default_value = "human",
        help = "Output format for the run report"
    )]
    pub output_format: OutputFormat,

    #[command(flatten)]
    pub options: PipelineOptions,
}

/// Arguments for the inspect command
#[derive(Debug, Clone, Parser)]
pub struct InspectArgs {
    /// Input CSV file path or http(s) URL
    #[arg(value_name = "SOURCE")]
    pub source: InputSource,

    /// Output format for the report
    #[arg(
        long = "format",
        value_enum,
        default_value = "human",
        help = "Output format for the report"
    )]
    pub output_format: OutputFormat,

    #[command(flatten)]
    pub options: PipelineOptions,
}

/// Arguments for the crs command
#[derive(Debug, Clone, Parser)]
pub struct CrsArgs {
    /// Output format for the listing
    #[arg(
        long = "format",
        value_enum,
        default_value = "human",
        help = "Output format for the listing"
    )]
    pub output_format: OutputFormat,

    /// Enable verbose logging output
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Enable verbose logging (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,
}

/// Options shared by every command that runs the pipeline
#[derive(Debug, Clone, Default, ClapArgs)]
pub struct PipelineOptions {
    /// Path to configuration file
    ///
    /// JSON configuration file. If not specified, uses
    /// <config dir>/sheet2geojson/config.json when it exists.
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (JSON format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Source CRS EPSG code
    #[arg(long = "epsg", value_name = "CODE", help = "Source CRS EPSG code")]
    pub epsg: Option<u32>,

    /// X-role synonyms, replacing the configured list
    #[arg(
        long = "x-synonyms",
        value_name = "LIST",
        help = "Comma-separated X (easting) column synonyms"
    )]
    pub x_synonyms: Option<SynonymList>,

    /// Y-role synonyms, replacing the configured list
    #[arg(
        long = "y-synonyms",
        value_name = "LIST",
        help = "Comma-separated Y (northing) column synonyms"
    )]
    pub y_synonyms: Option<SynonymList>,

    /// Exact preferred X column name
    #[arg(long = "x-name", value_name = "NAME", help = "Exact X column name")]
    pub x_name: Option<String>,

    /// Exact preferred Y column name
    #[arg(long = "y-name", value_name = "NAME", help = "Exact Y column name")]
    pub y_name: Option<String>,

    /// Treat the first row as the header
    #[arg(
        long = "no-header-detection",
        help = "Use the first row as the header instead of searching for it"
    )]
    pub no_header_detection: bool,

    /// Field delimiter; sniffed when not given
    #[arg(
        short = 'd',
        long = "delimiter",
        value_name = "CHAR",
        help = "Field delimiter (default: sniffed from the data)"
    )]
    pub delimiter: Option<char>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Output format options for machine-readable results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON format for scripting
    Json,
}

/// Wrapper for parsing comma-separated synonym lists
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynonymList {
    pub synonyms: Vec<String>,
}

impl FromStr for SynonymList {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let synonyms: Vec<String> = s
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        if synonyms.is_empty() {
            return Err(Error::configuration("Synonym list cannot be empty"));
        }

        Ok(SynonymList { synonyms })
    }
}

impl Commands {
    /// Determine the appropriate log level for this command
    pub fn get_log_level(&self) -> &'static str {
        match self {
            Commands::Convert(args) => args.options.get_log_level(),
            Commands::Inspect(args) => args.options.get_log_level(),
            Commands::Crs(args) => verbosity_level(args.verbose),
        }
    }
}

impl PipelineOptions {
    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            verbosity_level(self.verbose)
        }
    }

    /// Apply command-line overrides on top of a loaded configuration
    pub fn apply_overrides(&self, mut config: Config) -> Config {
        if let Some(epsg) = self.epsg {
            config.source_crs_id = epsg;
        }
        if let Some(list) = &self.x_synonyms {
            config.x_synonyms = list.synonyms.clone();
        }
        if let Some(list) = &self.y_synonyms {
            config.y_synonyms = list.synonyms.clone();
        }
        if let Some(name) = &self.x_name {
            config.exact_names.x = name.clone();
        }
        if let Some(name) = &self.y_name {
            config.exact_names.y = name.clone();
        }
        if self.no_header_detection {
            config.header_mode = HeaderMode::FirstRow;
        }
        if self.delimiter.is_some() {
            config.delimiter = self.delimiter;
        }
        config
    }
}

fn verbosity_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synonym_list_parsing() {
        let result = SynonymList::from_str("este, easting ,e").unwrap();
        assert_eq!(result.synonyms, vec!["este", "easting", "e"]);

        assert!(SynonymList::from_str("").is_err());
        assert!(SynonymList::from_str(" , ,").is_err());
    }

    #[test]
    fn test_convert_command_parsing() {
        let args = Args::try_parse_from([
            "sheet2geojson",
            "convert",
            "lotes.csv",
            "-o",
            "out/lotes.geojson",
            "--epsg",
            "8908",
            "--x-synonyms",
            "este,e",
            "--delimiter",
            ";",
            "--pretty",
            "-vv",
        ])
        .unwrap();

        let Some(Commands::Convert(convert)) = args.command else {
            panic!("expected convert command");
        };

        assert_eq!(convert.source, InputSource::File(PathBuf::from("lotes.csv")));
        assert_eq!(convert.output, PathBuf::from("out/lotes.geojson"));
        assert!(convert.pretty);
        assert_eq!(convert.output_format, OutputFormat::Human);
        assert_eq!(convert.options.epsg, Some(8908));
        assert_eq!(convert.options.delimiter, Some(';'));
        assert_eq!(convert.options.get_log_level(), "debug");
    }

    #[test]
    fn test_convert_defaults_output_path() {
        let args = Args::try_parse_from(["sheet2geojson", "convert", "https://example.org/a.csv"])
            .unwrap();

        let Some(Commands::Convert(convert)) = args.command else {
            panic!("expected convert command");
        };
        assert_eq!(convert.output, PathBuf::from(DEFAULT_OUTPUT_PATH));
        assert!(matches!(convert.source, InputSource::Url(_)));
    }

    #[test]
    fn test_no_subcommand_is_allowed() {
        let args = Args::try_parse_from(["sheet2geojson"]).unwrap();
        assert!(args.command.is_none());
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        let result = Args::try_parse_from(["sheet2geojson", "inspect", "a.csv", "-q", "-v"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_log_level() {
        let mut options = PipelineOptions::default();
        assert_eq!(options.get_log_level(), "warn");

        options.verbose = 1;
        assert_eq!(options.get_log_level(), "info");

        options.verbose = 3;
        assert_eq!(options.get_log_level(), "trace");

        options.quiet = true;
        assert_eq!(options.get_log_level(), "error");
    }

    #[test]
    fn test_apply_overrides() {
        let options = PipelineOptions {
            epsg: Some(32617),
            y_synonyms: Some(SynonymList {
                synonyms: vec!["norte".to_string()],
            }),
            x_name: Some("ESTE".to_string()),
            no_header_detection: true,
            delimiter: Some('\t'),
            ..Default::default()
        };

        let config = options.apply_overrides(Config::default());

        assert_eq!(config.source_crs_id, 32617);
        assert_eq!(config.y_synonyms, vec!["norte"]);
        assert_eq!(config.x_synonyms, Config::default().x_synonyms);
        assert_eq!(config.exact_names.x, "ESTE");
        assert_eq!(config.exact_names.y, "Y");
        assert_eq!(config.header_mode, HeaderMode::FirstRow);
        assert_eq!(config.delimiter, Some('\t'));
    }

    #[test]
    fn test_no_overrides_keep_config() {
        let config = Config::default().with_delimiter(';');
        let applied = PipelineOptions::default().apply_overrides(config.clone());
        assert_eq!(applied, config);
    }
}
