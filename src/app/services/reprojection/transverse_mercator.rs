//! Transverse Mercator projection
//!
//! Uses the Krüger series in the third flattening truncated at n³, which is
//! accurate to well under a millimetre within a few thousand kilometres of
//! the central meridian.

use super::Projection;
use super::ellipsoid::Ellipsoid;
use crate::app::models::{GeographicPoint, ProjectedPoint};

/// Transverse Mercator parameters with precomputed series coefficients
#[derive(Debug, Clone, PartialEq)]
pub struct TransverseMercator {
    central_meridian: f64,
    false_easting: f64,
    false_northing: f64,
    eccentricity: f64,
    /// Rectifying radius `A` scaled by `k0`
    scaled_radius: f64,
    /// Conformal-to-rectifying coefficients (forward)
    alpha: [f64; 3],
    /// Rectifying-to-conformal coefficients (inverse)
    beta: [f64; 3],
    /// Conformal-to-geodetic latitude coefficients
    delta: [f64; 3],
    /// Rectifying coordinate of the latitude of origin
    origin_xi: f64,
}

impl TransverseMercator {
    pub fn new(
        ellipsoid: Ellipsoid,
        latitude_of_origin: f64,
        central_meridian: f64,
        scale_factor: f64,
        false_easting: f64,
        false_northing: f64,
    ) -> Self {
        let n = ellipsoid.third_flattening();
        let n2 = n * n;
        let n3 = n2 * n;

        let radius = ellipsoid.a / (1.0 + n) * (1.0 + n2 / 4.0 + n2 * n2 / 64.0);

        let alpha = [
            n / 2.0 - 2.0 * n2 / 3.0 + 5.0 * n3 / 16.0,
            13.0 * n2 / 48.0 - 3.0 * n3 / 5.0,
            61.0 * n3 / 240.0,
        ];
        let beta = [
            n / 2.0 - 2.0 * n2 / 3.0 + 37.0 * n3 / 96.0,
            n2 / 48.0 + n3 / 15.0,
            17.0 * n3 / 480.0,
        ];
        let delta = [
            2.0 * n - 2.0 * n2 / 3.0 - 2.0 * n3,
            7.0 * n2 / 3.0 - 8.0 * n3 / 5.0,
            56.0 * n3 / 15.0,
        ];

        let mut projection = Self {
            central_meridian,
            false_easting,
            false_northing,
            eccentricity: ellipsoid.eccentricity(),
            scaled_radius: scale_factor * radius,
            alpha,
            beta,
            delta,
            origin_xi: 0.0,
        };

        if latitude_of_origin != 0.0 {
            let (xi, _) = projection.rectifying(latitude_of_origin.to_radians(), 0.0);
            projection.origin_xi = xi;
        }

        projection
    }

    /// Rectifying coordinates (ξ, η) for a latitude and longitude offset in radians
    fn rectifying(&self, phi: f64, lambda: f64) -> (f64, f64) {
        let e = self.eccentricity;
        let t = (phi.sin().atanh() - e * (e * phi.sin()).atanh()).sinh();
        let xi_prime = t.atan2(lambda.cos());
        let eta_prime = (lambda.sin() / (1.0 + t * t).sqrt()).atanh();

        let mut xi = xi_prime;
        let mut eta = eta_prime;
        for (j, alpha) in self.alpha.iter().enumerate() {
            let k = 2.0 * (j as f64 + 1.0);
            xi += alpha * (k * xi_prime).sin() * (k * eta_prime).cosh();
            eta += alpha * (k * xi_prime).cos() * (k * eta_prime).sinh();
        }

        (xi, eta)
    }
}

impl Projection for TransverseMercator {
    fn forward(&self, point: GeographicPoint) -> ProjectedPoint {
        let phi = point.lat.to_radians();
        let lambda = (point.lon - self.central_meridian).to_radians();
        let (xi, eta) = self.rectifying(phi, lambda);

        ProjectedPoint {
            x: self.false_easting + self.scaled_radius * eta,
            y: self.false_northing + self.scaled_radius * (xi - self.origin_xi),
        }
    }

    fn inverse(&self, point: ProjectedPoint) -> GeographicPoint {
        let xi = (point.y - self.false_northing) / self.scaled_radius + self.origin_xi;
        let eta = (point.x - self.false_easting) / self.scaled_radius;

        let mut xi_prime = xi;
        let mut eta_prime = eta;
        for (j, beta) in self.beta.iter().enumerate() {
            let k = 2.0 * (j as f64 + 1.0);
            xi_prime -= beta * (k * xi).sin() * (k * eta).cosh();
            eta_prime -= beta * (k * xi).cos() * (k * eta).sinh();
        }

        let chi = (xi_prime.sin() / eta_prime.cosh()).asin();
        let mut phi = chi;
        for (j, delta) in self.delta.iter().enumerate() {
            let k = 2.0 * (j as f64 + 1.0);
            phi += delta * (k * chi).sin();
        }

        let lambda = eta_prime.sinh().atan2(xi_prime.cos());

        GeographicPoint {
            lon: self.central_meridian + lambda.to_degrees(),
            lat: phi.to_degrees(),
        }
    }
}
