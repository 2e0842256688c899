//! Registry of supported source coordinate reference systems
//!
//! Every supported datum is treated as coincident with WGS84 (null datum
//! shift), which holds to well below mapping precision for CR05, CR-SIRGAS,
//! ETRS89 and RGF93.

use super::Projection;
use super::ellipsoid::Ellipsoid;
use super::lambert::LambertConformalConic;
use super::transverse_mercator::TransverseMercator;
use crate::{Error, Result};
use serde::Serialize;

/// Projection method and its defining parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum ProjectionMethod {
    TransverseMercator {
        latitude_of_origin: f64,
        central_meridian: f64,
        scale_factor: f64,
        false_easting: f64,
        false_northing: f64,
    },
    LambertConformalConic {
        first_parallel: f64,
        second_parallel: f64,
        latitude_of_origin: f64,
        central_meridian: f64,
        false_easting: f64,
        false_northing: f64,
    },
}

/// A supported projected CRS
#[derive(Debug, Clone, PartialEq)]
pub struct CrsDefinition {
    pub code: u32,
    pub name: String,
    pub ellipsoid: Ellipsoid,
    pub method: ProjectionMethod,
}

const CRTM05: ProjectionMethod = ProjectionMethod::TransverseMercator {
    latitude_of_origin: 0.0,
    central_meridian: -84.0,
    scale_factor: 0.9999,
    false_easting: 500_000.0,
    false_northing: 0.0,
};

const LAMBERT_93: ProjectionMethod = ProjectionMethod::LambertConformalConic {
    first_parallel: 49.0,
    second_parallel: 44.0,
    latitude_of_origin: 46.5,
    central_meridian: 3.0,
    false_easting: 700_000.0,
    false_northing: 6_600_000.0,
};

const WGS84_UTM_NORTH: std::ops::RangeInclusive<u32> = 32601..=32660;
const WGS84_UTM_SOUTH: std::ops::RangeInclusive<u32> = 32701..=32760;
const ETRS89_UTM: std::ops::RangeInclusive<u32> = 25828..=25838;

impl CrsDefinition {
    /// Look up a projected CRS by EPSG code
    pub fn from_epsg(code: u32) -> Result<Self> {
        let (name, ellipsoid, method) = match code {
            5367 => ("CR05 / CRTM05".to_string(), Ellipsoid::WGS84, CRTM05),
            8908 => ("CR-SIRGAS / CRTM05".to_string(), Ellipsoid::GRS80, CRTM05),
            2154 => ("RGF93 v1 / Lambert-93".to_string(), Ellipsoid::GRS80, LAMBERT_93),
            code if WGS84_UTM_NORTH.contains(&code) => {
                let zone = code - 32600;
                (
                    format!("WGS 84 / UTM zone {}N", zone),
                    Ellipsoid::WGS84,
                    utm_method(zone, false),
                )
            }
            code if WGS84_UTM_SOUTH.contains(&code) => {
                let zone = code - 32700;
                (
                    format!("WGS 84 / UTM zone {}S", zone),
                    Ellipsoid::WGS84,
                    utm_method(zone, true),
                )
            }
            code if ETRS89_UTM.contains(&code) => {
                let zone = code - 25800;
                (
                    format!("ETRS89 / UTM zone {}N", zone),
                    Ellipsoid::GRS80,
                    utm_method(zone, false),
                )
            }
            _ => return Err(Error::UnsupportedCrs { code }),
        };

        Ok(Self {
            code,
            name,
            ellipsoid,
            method,
        })
    }

    /// Build the projection implementing this CRS
    pub fn projection(&self) -> Box<dyn Projection> {
        match self.method {
            ProjectionMethod::TransverseMercator {
                latitude_of_origin,
                central_meridian,
                scale_factor,
                false_easting,
                false_northing,
            } => Box::new(TransverseMercator::new(
                self.ellipsoid,
                latitude_of_origin,
                central_meridian,
                scale_factor,
                false_easting,
                false_northing,
            )),
            ProjectionMethod::LambertConformalConic {
                first_parallel,
                second_parallel,
                latitude_of_origin,
                central_meridian,
                false_easting,
                false_northing,
            } => Box::new(LambertConformalConic::new(
                self.ellipsoid,
                first_parallel,
                second_parallel,
                latitude_of_origin,
                central_meridian,
                false_easting,
                false_northing,
            )),
        }
    }
}

fn utm_method(zone: u32, south: bool) -> ProjectionMethod {
    ProjectionMethod::TransverseMercator {
        latitude_of_origin: 0.0,
        central_meridian: -183.0 + 6.0 * f64::from(zone),
        scale_factor: 0.9996,
        false_easting: 500_000.0,
        false_northing: if south { 10_000_000.0 } else { 0.0 },
    }
}

/// Supported source CRS codes with their names, in ascending code order
pub fn supported_codes() -> Vec<(u32, String)> {
    let mut codes: Vec<u32> = vec![2154, 5367, 8908];
    codes.extend(ETRS89_UTM);
    codes.extend(WGS84_UTM_NORTH);
    codes.extend(WGS84_UTM_SOUTH);
    codes.sort_unstable();

    codes
        .into_iter()
        .filter_map(|code| CrsDefinition::from_epsg(code).ok())
        .map(|definition| (definition.code, definition.name))
        .collect()
}
