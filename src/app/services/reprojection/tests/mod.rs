//! Test utilities for reprojection
//!
//! Reference values were cross-checked against an independent Snyder-series
//! implementation and published grid coordinates.

use crate::app::models::GeographicPoint;


/// Angular tolerance in degrees for known-point checks
pub const DEGREE_TOLERANCE: f64 = 1e-5;

/// Linear tolerance in metres for forward/inverse round trips
pub const METRE_TOLERANCE: f64 = 1e-3;

pub fn assert_close_degrees(actual: GeographicPoint, expected_lon: f64, expected_lat: f64) {
    assert!(
        (actual.lon - expected_lon).abs() < DEGREE_TOLERANCE,
        "longitude {} differs from expected {}",
        actual.lon,
        expected_lon
    );
    assert!(
        (actual.lat - expected_lat).abs() < DEGREE_TOLERANCE,
        "latitude {} differs from expected {}",
        actual.lat,
        expected_lat
    );
}
