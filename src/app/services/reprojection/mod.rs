//! Reprojection from projected source CRSs to geographic WGS84
//!
//! Bundles the inverse (and forward) map projections needed for the supported
//! source CRS codes, so no native projection library is required.
//!
//! ## Architecture
//!
//! - [`ellipsoid`] - Reference ellipsoid parameters
//! - [`transverse_mercator`] - Transverse Mercator (Krüger series)
//! - [`lambert`] - Lambert conformal conic, two standard parallels
//! - [`crs`] - Registry of supported EPSG codes
//! - [`reprojector`] - Batch transform preserving point order
//!
//! ## Usage
//!
//! ```rust
//! use sheet2geojson::app::services::reprojection::CoordinateReprojector;
//!
//! # fn example() -> sheet2geojson::Result<()> {
//! let reprojector = CoordinateReprojector::from_epsg(5367)?;
//! let (lon, lat) = reprojector.reproject(&[491000.0], &[1098000.0])?;
//! assert!((lon[0] + 84.082078).abs() < 1e-5);
//! assert!((lat[0] - 9.929967).abs() < 1e-5);
//! # Ok(())
//! # }
//! ```

pub mod crs;
pub mod ellipsoid;
pub mod lambert;
pub mod reprojector;
pub mod transverse_mercator;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use crs::{CrsDefinition, ProjectionMethod, supported_codes};
pub use ellipsoid::Ellipsoid;
pub use lambert::LambertConformalConic;
pub use reprojector::CoordinateReprojector;
pub use transverse_mercator::TransverseMercator;

use crate::app::models::{GeographicPoint, ProjectedPoint};

/// A map projection between geographic degrees and planar metres
pub trait Projection: std::fmt::Debug + Send + Sync {
    /// Geographic (lon, lat) degrees to planar (x, y) metres
    fn forward(&self, point: GeographicPoint) -> ProjectedPoint;

    /// Planar (x, y) metres to geographic (lon, lat) degrees
    fn inverse(&self, point: ProjectedPoint) -> GeographicPoint;
}
