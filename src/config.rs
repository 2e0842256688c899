//! Configuration management and validation.
//!
//! Provides the explicit configuration passed into the pipeline: source CRS,
//! coordinate-column vocabularies, exact preferred names and header handling.
//! Configuration is layered as built-in defaults, then an optional JSON file,
//! then command-line overrides applied by the CLI.

use crate::app::services::column_resolver::NormalizedSynonyms;
use crate::app::services::reprojection::CrsDefinition;
use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_EXACT_X_NAME, DEFAULT_EXACT_Y_NAME,
    DEFAULT_SOURCE_CRS, DEFAULT_X_SYNONYMS, DEFAULT_Y_SYNONYMS,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// How the header row is chosen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderMode {
    /// Search for the row naming both coordinate roles
    #[default]
    Detect,
    /// The first row is the header
    FirstRow,
}

/// Exact preferred header names for the X and Y roles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExactNames {
    pub x: String,
    pub y: String,
}

impl Default for ExactNames {
    fn default() -> Self {
        Self {
            x: DEFAULT_EXACT_X_NAME.to_string(),
            y: DEFAULT_EXACT_Y_NAME.to_string(),
        }
    }
}

/// Pipeline configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// EPSG code of the projected source CRS
    pub source_crs_id: u32,

    /// X-role (easting) synonyms; the first one anchors the prefix fallback
    pub x_synonyms: Vec<String>,

    /// Y-role (northing) synonyms; the first one anchors the prefix fallback
    pub y_synonyms: Vec<String>,

    /// Exact preferred header names
    pub exact_names: ExactNames,

    /// Header row handling
    pub header_mode: HeaderMode,

    /// Field delimiter; sniffed from the data when unset
    pub delimiter: Option<char>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_crs_id: DEFAULT_SOURCE_CRS,
            x_synonyms: DEFAULT_X_SYNONYMS.iter().map(|s| s.to_string()).collect(),
            y_synonyms: DEFAULT_Y_SYNONYMS.iter().map(|s| s.to_string()).collect(),
            exact_names: ExactNames::default(),
            header_mode: HeaderMode::default(),
            delimiter: None,
        }
    }
}

impl Config {
    /// Per-user configuration file location
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| Error::configuration("Could not determine user config directory"))?;
        Ok(config_dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load configuration from a JSON file; missing fields take defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::io(
                format!("Failed to read config file '{}'", path.display()),
                e,
            )
        })?;

        serde_json::from_str(&content).map_err(|e| {
            Error::configuration(format!(
                "Invalid config file '{}': {}",
                path.display(),
                e
            ))
        })
    }

    /// Defaults, overlaid by `config_file` when given
    pub fn load_layered(config_file: Option<&Path>) -> Result<Self> {
        let config = match config_file {
            Some(path) => {
                debug!("Loading configuration from {}", path.display());
                Self::from_file(path)?
            }
            None => Self::default(),
        };
        Ok(config)
    }

    /// Check the configuration before any row is processed
    pub fn validate(&self) -> Result<()> {
        for (role, synonyms) in [("X", &self.x_synonyms), ("Y", &self.y_synonyms)] {
            if NormalizedSynonyms::new(synonyms).is_empty() {
                return Err(Error::configuration(format!(
                    "{} synonym list must contain at least one alphanumeric name",
                    role
                )));
            }
        }

        let exact_x = self.exact_names.x.trim();
        let exact_y = self.exact_names.y.trim();
        if exact_x.is_empty() || exact_y.is_empty() {
            return Err(Error::configuration("Exact X/Y names cannot be empty"));
        }
        if exact_x == exact_y {
            return Err(Error::configuration(format!(
                "Exact X and Y names must differ, both are '{}'",
                exact_x
            )));
        }

        if let Some(delimiter) = self.delimiter {
            if !delimiter.is_ascii() {
                return Err(Error::configuration(format!(
                    "Delimiter must be a single ASCII character, got {:?}",
                    delimiter
                )));
            }
        }

        CrsDefinition::from_epsg(self.source_crs_id)?;
        Ok(())
    }

    /// Set the source CRS
    pub fn with_source_crs(mut self, code: u32) -> Self {
        self.source_crs_id = code;
        self
    }

    /// Replace the X-role synonyms
    pub fn with_x_synonyms(mut self, synonyms: Vec<String>) -> Self {
        self.x_synonyms = synonyms;
        self
    }

    /// Replace the Y-role synonyms
    pub fn with_y_synonyms(mut self, synonyms: Vec<String>) -> Self {
        self.y_synonyms = synonyms;
        self
    }

    /// Set the exact preferred names
    pub fn with_exact_names(mut self, x: impl Into<String>, y: impl Into<String>) -> Self {
        self.exact_names = ExactNames {
            x: x.into(),
            y: y.into(),
        };
        self
    }

    /// Set header handling
    pub fn with_header_mode(mut self, header_mode: HeaderMode) -> Self {
        self.header_mode = header_mode;
        self
    }

    /// Set a fixed delimiter
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = Some(delimiter);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = Config::default();

        assert_eq!(config.source_crs_id, 5367);
        assert_eq!(config.x_synonyms[0], "x");
        assert_eq!(config.y_synonyms[1], "norte");
        assert_eq!(config.exact_names.x, "X");
        assert_eq!(config.header_mode, HeaderMode::Detect);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"{{"source_crs_id": 8908, "exact_names": {{"x": "ESTE"}}, "header_mode": "first_row"}}"#
        )
        .unwrap();

        let config = Config::load_layered(Some(temp_file.path())).unwrap();

        assert_eq!(config.source_crs_id, 8908);
        assert_eq!(config.exact_names.x, "ESTE");
        assert_eq!(config.exact_names.y, "Y");
        assert_eq!(config.header_mode, HeaderMode::FirstRow);
        assert_eq!(config.x_synonyms, Config::default().x_synonyms);
    }

    #[test]
    fn test_invalid_file_is_configuration_error() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "not json").unwrap();

        let result = Config::from_file(temp_file.path());
        assert!(matches!(result, Err(Error::Configuration { .. })));
    }

    #[test]
    fn test_validate_rejects_unknown_crs() {
        let config = Config::default().with_source_crs(4326);
        assert!(matches!(
            config.validate(),
            Err(Error::UnsupportedCrs { code: 4326 })
        ));
    }

    #[test]
    fn test_validate_rejects_bad_vocabulary() {
        let empty_x = Config::default().with_x_synonyms(vec![]);
        assert!(empty_x.validate().is_err());

        let symbols_only = Config::default().with_y_synonyms(vec!["--".to_string()]);
        assert!(symbols_only.validate().is_err());

        let same_names = Config::default().with_exact_names("C", " C ");
        assert!(same_names.validate().is_err());

        let blank_name = Config::default().with_exact_names("", "Y");
        assert!(blank_name.validate().is_err());

        let bad_delimiter = Config::default().with_delimiter('€');
        assert!(bad_delimiter.validate().is_err());
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let config = Config::default()
            .with_source_crs(32617)
            .with_delimiter(';')
            .with_header_mode(HeaderMode::FirstRow);

        let json = serde_json::to_string(&config).unwrap();
        let parsed: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }
}
