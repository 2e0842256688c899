//! sheet2geojson Library
//!
//! A Rust library for turning loosely-structured spreadsheet exports that carry
//! point coordinates in a projected CRS into GeoJSON point feature collections
//! in WGS84 longitude/latitude.
//!
//! This library provides tools for:
//! - Reading headerless CSV exports from local files or HTTP(S) URLs
//! - Locating the real header row behind banner/comment rows
//! - Resolving the X (easting) and Y (northing) columns from synonym lists
//! - Coercing hand-entered coordinate text (decimal commas, stray spaces) to numbers
//! - Reprojecting projected coordinates to geographic WGS84
//! - Building and writing GeoJSON feature collections

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod column_resolver;
        pub mod feature_builder;
        pub mod geojson_writer;
        pub mod numeric_coercer;
        pub mod pipeline;
        pub mod reprojection;
        pub mod table_reader;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{
    CoordinateRole, Feature, FeatureCollection, Header, RawTable, ResolvedColumns, Table,
};
pub use app::services::pipeline::{Pipeline, PipelineOutput, PipelineReport};
pub use config::Config;

/// Result type alias for sheet2geojson operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for table normalisation and GeoJSON conversion
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Neither exact, synonym, nor prefix rules resolved a coordinate column
    #[error(
        "Could not find the {} coordinate column(s). Available columns: {available:?}",
        join_roles(.missing)
    )]
    ColumnNotFound {
        missing: Vec<CoordinateRole>,
        available: Vec<String>,
    },

    /// The table has no non-blank row that could serve as a header
    #[error("Could not detect a header row: all {rows} rows are blank")]
    HeaderNotDetected { rows: usize },

    /// Coercion and filtering left nothing to convert
    #[error("No rows with valid coordinates remain ({rows_before} rows before filtering)")]
    NoValidRows { rows_before: usize },

    /// Source CRS registry code is not supported by the bundled projections
    #[error("Unsupported source CRS: EPSG:{code}")]
    UnsupportedCrs { code: u32 },

    /// A point could not be reprojected to a finite geographic coordinate
    #[error("Reprojection failed for point {index} (x = {x}, y = {y})")]
    Reprojection { index: usize, x: f64, y: f64 },

    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Remote fetch failed
    #[error("Failed to fetch '{url}': {message}")]
    Fetch { url: String, message: String },

    /// GeoJSON or report serialisation failed
    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Data validation error
    #[error("Data validation error: {message}")]
    DataValidation { message: String },
}

fn join_roles(roles: &[CoordinateRole]) -> String {
    roles
        .iter()
        .map(|role| role.to_string())
        .collect::<Vec<_>>()
        .join(" and ")
}

impl Error {
    /// Create a column-not-found error listing every observed header name
    pub fn column_not_found(missing: Vec<CoordinateRole>, header: &Header) -> Self {
        Self::ColumnNotFound {
            missing,
            available: header.names().to_vec(),
        }
    }

    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a fetch error
    pub fn fetch(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Fetch {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create a serialization error with context
    pub fn serialization(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization {
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a data validation error
    pub fn data_validation(message: impl Into<String>) -> Self {
        Self::DataValidation {
            message: message.into(),
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization {
            message: "JSON serialization failed".to_string(),
            source: error,
        }
    }
}
