//! Tests for header row detection

use super::table_with_banner;
use crate::Error;
use crate::app::models::RawTable;
use crate::app::services::column_resolver::detect_header;
use crate::constants::{DEFAULT_X_SYNONYMS, DEFAULT_Y_SYNONYMS};

fn detect(raw: &RawTable) -> crate::Result<usize> {
    detect_header(raw, DEFAULT_X_SYNONYMS, DEFAULT_Y_SYNONYMS)
}

#[test]
fn test_header_on_first_row() {
    let raw = table_with_banner(&[]);
    assert_eq!(detect(&raw).unwrap(), 0);
}

#[test]
fn test_header_after_banner_rows() {
    for banner_count in 0..5 {
        let banner: Vec<Vec<&str>> = (0..banner_count)
            .map(|i| if i % 2 == 0 { vec![""] } else { vec!["Reporte mensual", "", ""] })
            .collect();
        let raw = table_with_banner(&banner);

        assert_eq!(detect(&raw).unwrap(), banner_count);
    }
}

#[test]
fn test_header_matches_synonyms_after_normalisation() {
    let raw = RawTable::from_rows(vec![
        vec!["Dictámenes aprobados"],
        vec!["Código", "Coord. X", "COORD_Y", "Notas"],
        vec!["1", "491000", "1098000", ""],
    ]);

    assert_eq!(detect(&raw).unwrap(), 1);
}

#[test]
fn test_row_with_only_one_role_is_not_header() {
    let raw = RawTable::from_rows(vec![
        vec!["Este", "valor"],
        vec!["Nombre", "Este", "Norte"],
        vec!["A", "1", "2"],
    ]);

    assert_eq!(detect(&raw).unwrap(), 1);
}

#[test]
fn test_first_match_wins() {
    let raw = RawTable::from_rows(vec![
        vec!["X", "Y"],
        vec!["Nombre", "Este", "Norte"],
    ]);

    assert_eq!(detect(&raw).unwrap(), 0);
}

#[test]
fn test_fallback_to_first_non_blank_row() {
    let raw = RawTable::from_rows(vec![
        vec!["", ""],
        vec!["  "],
        vec!["Nombre", "Longitud", "Latitud"],
        vec!["A", "1", "2"],
    ]);

    assert_eq!(detect(&raw).unwrap(), 2);
}

#[test]
fn test_entirely_blank_table_is_an_error() {
    let raw = RawTable::from_rows(vec![vec!["", " "], vec![""]]);

    match detect(&raw) {
        Err(Error::HeaderNotDetected { rows }) => assert_eq!(rows, 2),
        other => panic!("Expected HeaderNotDetected, got {:?}", other),
    }

    assert!(matches!(
        detect(&RawTable::default()),
        Err(Error::HeaderNotDetected { rows: 0 })
    ));
}
