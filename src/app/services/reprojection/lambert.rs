//! Lambert conformal conic projection with two standard parallels

use super::Projection;
use super::ellipsoid::Ellipsoid;
use crate::app::models::{GeographicPoint, ProjectedPoint};
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

const MAX_LATITUDE_ITERATIONS: usize = 15;
const LATITUDE_TOLERANCE: f64 = 1e-12;

/// Lambert conformal conic (2SP) parameters with precomputed cone constants
#[derive(Debug, Clone, PartialEq)]
pub struct LambertConformalConic {
    central_meridian: f64,
    false_easting: f64,
    false_northing: f64,
    eccentricity: f64,
    semi_major_axis: f64,
    /// Cone constant
    n: f64,
    /// Scaling constant `F`
    big_f: f64,
    /// Radius of the parallel of origin
    origin_radius: f64,
}

impl LambertConformalConic {
    pub fn new(
        ellipsoid: Ellipsoid,
        first_parallel: f64,
        second_parallel: f64,
        latitude_of_origin: f64,
        central_meridian: f64,
        false_easting: f64,
        false_northing: f64,
    ) -> Self {
        let e = ellipsoid.eccentricity();
        let phi1 = first_parallel.to_radians();
        let phi2 = second_parallel.to_radians();

        let m1 = m(phi1, e);
        let t1 = t(phi1, e);

        let n = if (phi1 - phi2).abs() < f64::EPSILON {
            phi1.sin()
        } else {
            (m1.ln() - m(phi2, e).ln()) / (t1.ln() - t(phi2, e).ln())
        };
        let big_f = m1 / (n * t1.powf(n));
        let origin_radius = ellipsoid.a * big_f * t(latitude_of_origin.to_radians(), e).powf(n);

        Self {
            central_meridian,
            false_easting,
            false_northing,
            eccentricity: e,
            semi_major_axis: ellipsoid.a,
            n,
            big_f,
            origin_radius,
        }
    }
}

fn m(phi: f64, e: f64) -> f64 {
    phi.cos() / (1.0 - (e * phi.sin()).powi(2)).sqrt()
}

fn t(phi: f64, e: f64) -> f64 {
    let e_sin = e * phi.sin();
    (FRAC_PI_4 - phi / 2.0).tan() / ((1.0 - e_sin) / (1.0 + e_sin)).powf(e / 2.0)
}

impl Projection for LambertConformalConic {
    fn forward(&self, point: GeographicPoint) -> ProjectedPoint {
        let radius = self.semi_major_axis
            * self.big_f
            * t(point.lat.to_radians(), self.eccentricity).powf(self.n);
        let theta = self.n * (point.lon - self.central_meridian).to_radians();

        ProjectedPoint {
            x: self.false_easting + radius * theta.sin(),
            y: self.false_northing + self.origin_radius - radius * theta.cos(),
        }
    }

    fn inverse(&self, point: ProjectedPoint) -> GeographicPoint {
        let dx = point.x - self.false_easting;
        let dy = self.origin_radius - (point.y - self.false_northing);

        let radius = dx.hypot(dy).copysign(self.n);
        let t_prime = (radius / (self.semi_major_axis * self.big_f)).powf(1.0 / self.n);
        let theta = if self.n > 0.0 {
            dx.atan2(dy)
        } else {
            (-dx).atan2(-dy)
        };

        let e = self.eccentricity;
        let mut phi = FRAC_PI_2 - 2.0 * t_prime.atan();
        for _ in 0..MAX_LATITUDE_ITERATIONS {
            let e_sin = e * phi.sin();
            let next =
                FRAC_PI_2 - 2.0 * (t_prime * ((1.0 - e_sin) / (1.0 + e_sin)).powf(e / 2.0)).atan();
            let converged = (next - phi).abs() < LATITUDE_TOLERANCE;
            phi = next;
            if converged {
                break;
            }
        }

        GeographicPoint {
            lon: (theta / self.n).to_degrees() + self.central_meridian,
            lat: phi.to_degrees(),
        }
    }
}
