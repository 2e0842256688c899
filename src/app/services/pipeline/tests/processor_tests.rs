//! Tests for end-to-end pipeline runs

use super::{
    SAN_JOSE_LON_LAT, SAN_JOSE_XY, assert_close, default_pipeline, table_with_one_bad_row,
};
use crate::Error;
use crate::app::models::{Geometry, RawTable};
use crate::app::services::pipeline::Pipeline;
use crate::config::{Config, HeaderMode};
use serde_json::json;

fn coordinates(geometry: &Geometry) -> [f64; 2] {
    match geometry {
        Geometry::Point { coordinates } => *coordinates,
    }
}

#[test]
fn test_bad_row_is_dropped_and_counted() {
    let output = default_pipeline().run_raw(&table_with_one_bad_row()).unwrap();

    assert_eq!(output.collection.len(), 4);
    assert_eq!(output.report.rows_before, 5);
    assert_eq!(output.report.rows_after, 4);
    assert_eq!(output.report.dropped, 1);
    assert_eq!(output.report.features, 4);
    assert_eq!(output.report.header_row, Some(0));

    let names: Vec<_> = output
        .collection
        .features
        .iter()
        .map(|feature| feature.properties["Nombre"].clone())
        .collect();
    assert_eq!(
        names,
        vec![json!("Lote 1"), json!("Lote 2"), json!("Lote 3"), json!("Lote 5")]
    );
}

#[test]
fn test_known_point_geometry() {
    let raw = RawTable::from_rows(vec![
        vec!["X".to_string(), "Y".to_string()],
        vec![SAN_JOSE_XY.0.to_string(), SAN_JOSE_XY.1.to_string()],
    ]);

    let output = default_pipeline().run_raw(&raw).unwrap();
    let [lon, lat] = coordinates(&output.collection.features[0].geometry);

    assert_close(lon, SAN_JOSE_LON_LAT.0);
    assert_close(lat, SAN_JOSE_LON_LAT.1);
}

#[test]
fn test_synonym_columns_give_same_geometry() {
    let exact = RawTable::from_rows(vec![
        vec!["Nombre", "X", "Y"],
        vec!["A", "491000", "1098000"],
    ]);
    let synonyms = RawTable::from_rows(vec![
        vec!["Nombre", "ESTE", "NORTE"],
        vec!["A", "491000", "1098000"],
    ]);

    let pipeline = default_pipeline();
    let from_exact = pipeline.run_raw(&exact).unwrap();
    let from_synonyms = pipeline.run_raw(&synonyms).unwrap();

    assert_eq!(
        from_exact.collection.features[0].geometry,
        from_synonyms.collection.features[0].geometry
    );
    assert_eq!(from_synonyms.report.x_column, "ESTE");
    assert_eq!(from_synonyms.report.y_column, "NORTE");
}

#[test]
fn test_leading_blank_rows_do_not_change_output() {
    let plain = table_with_one_bad_row();
    let mut rows: Vec<Vec<String>> = vec![vec![String::new(); 4], vec![String::new(); 4]];
    rows.extend(plain.rows().iter().cloned());
    let padded = RawTable::new(rows);

    let pipeline = default_pipeline();
    let from_plain = pipeline.run_raw(&plain).unwrap();
    let from_padded = pipeline.run_raw(&padded).unwrap();

    assert_eq!(from_padded.collection, from_plain.collection);
    assert_eq!(from_padded.report.header_row, Some(2));
    assert_eq!(from_padded.report.dropped, from_plain.report.dropped);
}

#[test]
fn test_blank_data_rows_are_counted_as_dropped() {
    let raw = RawTable::from_rows(vec![
        vec!["Nombre", "X", "Y"],
        vec!["A", "491000", "1098000"],
        vec!["", "", ""],
        vec!["B", "abc", "1098000"],
    ]);

    let output = default_pipeline().run_raw(&raw).unwrap();

    assert_eq!(output.report.rows_before, 3);
    assert_eq!(output.report.rows_after, 1);
    assert_eq!(output.report.dropped, 2);
    assert_eq!(
        output.report.rows_after + output.report.dropped,
        output.report.rows_before
    );
}

#[test]
fn test_banner_rows_above_header_are_skipped() {
    let raw = RawTable::from_rows(vec![
        vec!["Informe de lotes", "", ""],
        vec!["Generado 2024-03-01", "", ""],
        vec!["Nombre", "Este", "Norte"],
        vec!["A", "491000", "1098000"],
    ]);

    let output = default_pipeline().run_raw(&raw).unwrap();

    assert_eq!(output.report.header_row, Some(2));
    assert_eq!(output.collection.len(), 1);
}

#[test]
fn test_running_twice_is_identical() {
    let pipeline = default_pipeline();
    let first = pipeline.run_raw(&table_with_one_bad_row()).unwrap();
    let second = pipeline.run_raw(&table_with_one_bad_row()).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_coordinate_properties_are_coerced_numbers() {
    let output = default_pipeline().run_raw(&table_with_one_bad_row()).unwrap();
    let properties = &output.collection.features[1].properties;

    assert_eq!(properties["X"], json!(491500.0));
    assert_eq!(properties["Y"], json!(1098500.0));
    assert_eq!(properties["Expediente"], json!(102));
}

#[test]
fn test_missing_columns_are_reported() {
    let raw = RawTable::from_rows(vec![
        vec!["Nombre", "Longitud", "Y"],
        vec!["A", "491000", "1098000"],
    ]);

    match default_pipeline().run_raw(&raw) {
        Err(Error::ColumnNotFound { missing, available }) => {
            assert_eq!(missing.len(), 1);
            assert_eq!(available, vec!["Nombre", "Longitud", "Y"]);
        }
        other => panic!("expected ColumnNotFound, got {:?}", other),
    }
}

#[test]
fn test_all_invalid_rows_is_an_error() {
    let raw = RawTable::from_rows(vec![
        vec!["X", "Y"],
        vec!["n/d", "1098000"],
        vec!["491000", "?"],
    ]);

    let result = default_pipeline().run_raw(&raw);
    assert!(matches!(result, Err(Error::NoValidRows { rows_before: 2 })));
}

#[test]
fn test_all_blank_table_is_an_error() {
    let raw = RawTable::from_rows(vec![vec!["", ""], vec!["  ", ""]]);

    let result = default_pipeline().run_raw(&raw);
    assert!(matches!(result, Err(Error::HeaderNotDetected { rows: 2 })));
}

#[test]
fn test_unsupported_crs_fails_before_rows() {
    let result = Pipeline::new(Config::default().with_source_crs(3857));
    assert!(matches!(result, Err(Error::UnsupportedCrs { code: 3857 })));
}

#[test]
fn test_first_row_mode_skips_detection() {
    let raw = RawTable::from_rows(vec![
        vec!["Informe", "", ""],
        vec!["Nombre", "X", "Y"],
        vec!["A", "491000", "1098000"],
    ]);
    let pipeline =
        Pipeline::new(Config::default().with_header_mode(HeaderMode::FirstRow)).unwrap();

    let result = pipeline.run_raw(&raw);
    assert!(matches!(result, Err(Error::ColumnNotFound { .. })));
}

#[test]
fn test_custom_exact_names_drive_detection() {
    let raw = RawTable::from_rows(vec![
        vec!["Resumen"],
        vec!["Nombre", "Coord1", "Coord2"],
        vec!["A", "491000", "1098000"],
    ]);
    let pipeline =
        Pipeline::new(Config::default().with_exact_names("Coord1", "Coord2")).unwrap();

    let output = pipeline.run_raw(&raw).unwrap();

    assert_eq!(output.report.header_row, Some(1));
    assert_eq!(output.report.x_column, "Coord1");
    assert_eq!(output.report.y_column, "Coord2");
}

#[test]
fn test_utm_source_crs() {
    let raw = RawTable::from_rows(vec![vec!["X", "Y"], vec!["166021.4431", "0"]]);
    let pipeline = Pipeline::new(Config::default().with_source_crs(32631)).unwrap();

    let output = pipeline.run_raw(&raw).unwrap();
    let [lon, lat] = coordinates(&output.collection.features[0].geometry);

    assert_close(lon, 0.0);
    assert_close(lat, 0.0);
    assert_eq!(output.report.source_crs, 32631);
}
