//! Batch reprojection to geographic WGS84
//!
//! X is always read as the easting-like axis and Y as the northing-like axis,
//! and output is always (longitude, latitude). Output position `i` depends on
//! input position `i` only; nothing is reordered, dropped or deduplicated.

use super::Projection;
use super::crs::CrsDefinition;
use crate::app::models::{GeographicPoint, ProjectedPoint};
use crate::{Error, Result};
use tracing::debug;

/// Reprojector from one source CRS to EPSG:4326
#[derive(Debug)]
pub struct CoordinateReprojector {
    definition: CrsDefinition,
    projection: Box<dyn Projection>,
}

impl CoordinateReprojector {
    /// Create a reprojector for a source EPSG code
    ///
    /// Unknown codes fail with [`Error::UnsupportedCrs`].
    pub fn from_epsg(code: u32) -> Result<Self> {
        let definition = CrsDefinition::from_epsg(code)?;
        let projection = definition.projection();
        debug!("Reprojecting from EPSG:{} ({})", code, definition.name);
        Ok(Self {
            definition,
            projection,
        })
    }

    pub fn definition(&self) -> &CrsDefinition {
        &self.definition
    }

    /// Reproject a single point
    pub fn project_point(&self, x: f64, y: f64) -> GeographicPoint {
        self.projection.inverse(ProjectedPoint { x, y })
    }

    /// Reproject parallel arrays of x and y values into (lon, lat) arrays
    ///
    /// Fails if the arrays differ in length or a point maps to a non-finite
    /// coordinate.
    pub fn reproject(&self, x_values: &[f64], y_values: &[f64]) -> Result<(Vec<f64>, Vec<f64>)> {
        if x_values.len() != y_values.len() {
            return Err(Error::data_validation(format!(
                "Coordinate arrays differ in length: {} x values, {} y values",
                x_values.len(),
                y_values.len()
            )));
        }

        let mut lon_values = Vec::with_capacity(x_values.len());
        let mut lat_values = Vec::with_capacity(y_values.len());

        for (index, (&x, &y)) in x_values.iter().zip(y_values).enumerate() {
            let point = self.project_point(x, y);
            if !point.lon.is_finite() || !point.lat.is_finite() {
                return Err(Error::Reprojection { index, x, y });
            }
            lon_values.push(point.lon);
            lat_values.push(point.lat);
        }

        Ok((lon_values, lat_values))
    }
}
