//! Data models for table normalisation and GeoJSON output
//!
//! This module contains the core data structures passed between pipeline stages:
//! the raw headerless table, the header-interpreted table, resolved coordinate
//! columns, coerced numeric columns and the GeoJSON feature collection.

use crate::constants::{MISSING_VALUE_MARKERS, UNNAMED_COLUMN_PREFIX};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

// =============================================================================
// Raw Table Structure
// =============================================================================

/// Headerless table as produced by the table reader
///
/// Rows are ordered sequences of raw textual cells with no column identity.
/// Rows may have different lengths (banner rows usually have fewer cells).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Create a raw table from rows of cells
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    /// Build a raw table from string slices (handy for fixtures)
    pub fn from_rows<R, S>(rows: R) -> Self
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        }
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Check whether every cell of a row is empty after trimming
pub fn is_blank_row<S: AsRef<str>>(row: &[S]) -> bool {
    row.iter().all(|cell| cell.as_ref().trim().is_empty())
}

/// Check whether a cell represents a missing value
pub fn is_missing_value(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty() || MISSING_VALUE_MARKERS.contains(&trimmed)
}

// =============================================================================
// Header and Table Structures
// =============================================================================

/// Ordered, unique column names with a name-to-position index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    names: Vec<String>,
    name_to_index: HashMap<String, usize>,
}

impl Header {
    /// Build a header from raw cells
    ///
    /// Names are trimmed. Blank names become `Unnamed: {index}` and repeated
    /// names get `.1`, `.2`, ... suffixes so every name is unique.
    pub fn from_cells<S: AsRef<str>>(cells: &[S]) -> Self {
        let mut names = Vec::with_capacity(cells.len());
        let mut seen = HashSet::with_capacity(cells.len());

        for (index, cell) in cells.iter().enumerate() {
            let trimmed = cell.as_ref().trim();
            let base = if trimmed.is_empty() {
                format!("{}{}", UNNAMED_COLUMN_PREFIX, index)
            } else {
                trimmed.to_string()
            };

            let mut candidate = base.clone();
            let mut suffix = 1;
            while seen.contains(&candidate) {
                candidate = format!("{}.{}", base, suffix);
                suffix += 1;
            }

            seen.insert(candidate.clone());
            names.push(candidate);
        }

        let name_to_index = names
            .iter()
            .enumerate()
            .map(|(index, name)| (name.clone(), index))
            .collect();

        Self {
            names,
            name_to_index,
        }
    }

    /// Column names in header order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Name of the column at `index`
    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    /// Position of a column by exact name
    pub fn position(&self, name: &str) -> Option<usize> {
        self.name_to_index.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// A single table cell; `None` is the missing marker
pub type Cell = Option<String>;

/// Raw table re-interpreted under a header
///
/// Every row has exactly `header.len()` cells. Column order is header order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    header: Header,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Create a table, checking that every row matches the header width
    pub fn new(header: Header, rows: Vec<Vec<Cell>>) -> Result<Self> {
        if let Some((index, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != header.len())
        {
            return Err(Error::data_validation(format!(
                "Row {} has {} cells but the header has {} columns",
                index,
                row.len(),
                header.len()
            )));
        }

        Ok(Self { header, rows })
    }

    /// Interpret a raw table using the row at `header_row` as the header
    ///
    /// Every row after the header becomes a data row, blank ones included, so
    /// row filtering stays the only place rows are removed. Short rows are
    /// padded with missing cells and surplus cells are dropped.
    pub fn from_raw(raw: &RawTable, header_row: usize) -> Result<Self> {
        let header_cells = raw.rows().get(header_row).ok_or_else(|| {
            Error::data_validation(format!(
                "Header row {} is out of range for a table of {} rows",
                header_row,
                raw.len()
            ))
        })?;

        let header = Header::from_cells(header_cells);
        let width = header.len();

        let rows = raw.rows()[header_row + 1..]
            .iter()
            .map(|row| {
                let mut cells: Vec<Cell> = row
                    .iter()
                    .take(width)
                    .map(|value| (!is_missing_value(value)).then(|| value.clone()))
                    .collect();
                cells.resize(width, None);
                cells
            })
            .collect();

        Ok(Self { header, rows })
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell value at (row, column), `None` when missing or out of range
    pub fn value(&self, row: usize, column: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .and_then(|cell| cell.as_deref())
    }

    /// All values of one column, in row order
    pub fn column(&self, column: usize) -> Vec<Option<&str>> {
        self.rows
            .iter()
            .map(|cells| cells.get(column).and_then(|cell| cell.as_deref()))
            .collect()
    }

    /// Keep only the rows whose flag is `true`, preserving order
    pub fn retain_rows(self, keep: &[bool]) -> Result<Self> {
        if keep.len() != self.rows.len() {
            return Err(Error::data_validation(format!(
                "Row mask has {} entries for a table of {} rows",
                keep.len(),
                self.rows.len()
            )));
        }

        let rows = self
            .rows
            .into_iter()
            .zip(keep)
            .filter_map(|(row, &keep)| keep.then_some(row))
            .collect();

        Ok(Self {
            header: self.header,
            rows,
        })
    }
}

// =============================================================================
// Coordinate Columns
// =============================================================================

/// Logical coordinate role of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CoordinateRole {
    /// Easting-like axis
    X,
    /// Northing-like axis
    Y,
}

impl fmt::Display for CoordinateRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordinateRole::X => write!(f, "X"),
            CoordinateRole::Y => write!(f, "Y"),
        }
    }
}

/// Validated references to the X and Y columns of a header
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedColumns {
    x_index: usize,
    y_index: usize,
    x_name: String,
    y_name: String,
}

impl ResolvedColumns {
    /// Create resolved columns, checking both exist and are distinct
    pub fn new(header: &Header, x_index: usize, y_index: usize) -> Result<Self> {
        if x_index == y_index {
            return Err(Error::data_validation(format!(
                "X and Y resolve to the same column '{}'",
                header.name(x_index).unwrap_or_default()
            )));
        }

        let name_of = |index: usize| {
            header.name(index).map(str::to_string).ok_or_else(|| {
                Error::data_validation(format!(
                    "Column index {} is out of range for a header of {} columns",
                    index,
                    header.len()
                ))
            })
        };

        Ok(Self {
            x_name: name_of(x_index)?,
            y_name: name_of(y_index)?,
            x_index,
            y_index,
        })
    }

    pub fn x_index(&self) -> usize {
        self.x_index
    }

    pub fn y_index(&self) -> usize {
        self.y_index
    }

    pub fn x_name(&self) -> &str {
        &self.x_name
    }

    pub fn y_name(&self) -> &str {
        &self.y_name
    }

    /// Role of a column index, if it is one of the resolved columns
    pub fn role_of(&self, index: usize) -> Option<CoordinateRole> {
        if index == self.x_index {
            Some(CoordinateRole::X)
        } else if index == self.y_index {
            Some(CoordinateRole::Y)
        } else {
            None
        }
    }
}

/// Numeric column aligned with the rows of its source table
///
/// `None` marks a value that could not be coerced to a finite number.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NumericColumn {
    values: Vec<Option<f64>>,
}

impl NumericColumn {
    pub fn new(values: Vec<Option<f64>>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of entries that failed coercion
    pub fn invalid_count(&self) -> usize {
        self.values.iter().filter(|value| value.is_none()).count()
    }
}

/// Point in a projected (planar) CRS
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedPoint {
    pub x: f64,
    pub y: f64,
}

/// Point in geographic WGS84 degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeographicPoint {
    pub lon: f64,
    pub lat: f64,
}

// =============================================================================
// GeoJSON Structures
// =============================================================================

/// GeoJSON geometry (only points are produced)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    /// Coordinates are `[longitude, latitude]`
    Point { coordinates: [f64; 2] },
}

impl Geometry {
    pub fn point(point: GeographicPoint) -> Self {
        Geometry::Point {
            coordinates: [point.lon, point.lat],
        }
    }
}

/// GeoJSON feature with ordered properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "Feature")]
pub struct Feature {
    pub geometry: Geometry,
    pub properties: serde_json::Map<String, serde_json::Value>,
}

/// GeoJSON feature collection, features in surviving-row order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "FeatureCollection")]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        Self { features }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}
