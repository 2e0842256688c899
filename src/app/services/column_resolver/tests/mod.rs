//! Test utilities for coordinate column discovery
//!
//! Shared synonym fixtures mirroring the default configuration.

use crate::app::models::{Header, RawTable};
use crate::app::services::column_resolver::ColumnResolver;
use crate::constants::{DEFAULT_X_SYNONYMS, DEFAULT_Y_SYNONYMS};

// Test modules
mod detector_tests;

/// Resolver configured with the default synonyms and `X`/`Y` exact names
pub fn default_resolver() -> ColumnResolver {
    ColumnResolver::new(DEFAULT_X_SYNONYMS, DEFAULT_Y_SYNONYMS, "X", "Y")
}

/// Header built from string literals
pub fn header(names: &[&str]) -> Header {
    Header::from_cells(names)
}

/// Raw table with `banner_rows` rows of preamble before a `Nombre,X,Y` header
pub fn table_with_banner(banner_rows: &[Vec<&str>]) -> RawTable {
    let mut rows: Vec<Vec<&str>> = banner_rows.to_vec();
    rows.push(vec!["Nombre", "X", "Y"]);
    rows.push(vec!["Punto 1", "491000", "1098000"]);
    rows.push(vec!["Punto 2", "491500", "1098500"]);
    RawTable::from_rows(rows)
}
