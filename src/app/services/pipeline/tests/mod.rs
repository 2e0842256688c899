//! Test utilities for the conversion pipeline
//!
//! Fixtures use CRTM05 grid coordinates around San José, Costa Rica.

use crate::app::models::RawTable;
use crate::app::services::pipeline::Pipeline;
use crate::config::Config;

mod processor_tests;

/// CRTM05 point and its WGS84 position
pub const SAN_JOSE_XY: (f64, f64) = (491_000.0, 1_098_000.0);
pub const SAN_JOSE_LON_LAT: (f64, f64) = (-84.082077975, 9.929967392);

pub const DEGREE_TOLERANCE: f64 = 1e-5;

/// Pipeline with the default configuration
pub fn default_pipeline() -> Pipeline {
    Pipeline::new(Config::default()).unwrap()
}

/// Five-row table whose fourth row has a non-numeric Y
pub fn table_with_one_bad_row() -> RawTable {
    RawTable::from_rows(vec![
        vec!["Nombre", "X", "Y", "Expediente"],
        vec!["Lote 1", "491000", "1098000", "101"],
        vec!["Lote 2", "491 500", "1098500", "102"],
        vec!["Lote 3", "492000,5", "1099000", "103"],
        vec!["Lote 4", "492500", "sin dato", "104"],
        vec!["Lote 5", "493000", "1100000", "105"],
    ])
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < DEGREE_TOLERANCE,
        "{} differs from expected {}",
        actual,
        expected
    );
}
