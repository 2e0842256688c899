//! GeoJSON feature assembly
//!
//! Turns the filtered table and the reprojected coordinates into one point
//! feature per row. Properties keep header order, carry `null` for missing
//! values and never include the pipeline's working longitude/latitude columns.

use crate::app::models::{
    Feature, FeatureCollection, GeographicPoint, Geometry, ResolvedColumns, Table,
};
use crate::app::services::numeric_coercer::coerce_value;
use crate::constants::{LATITUDE_WORKING_COLUMN, LONGITUDE_WORKING_COLUMN};
use crate::{Error, Result};
use serde_json::{Map, Number, Value};
use tracing::debug;

/// How the values of one column are emitted as properties
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    /// Every present value parses as an integer
    Integer,
    /// Every present value parses as a finite float
    Float,
    /// Anything else, emitted verbatim
    Text,
    /// Resolved coordinate column, emitted as its coerced number
    Coordinate,
}

/// Builder for feature collections
#[derive(Debug, Clone, Default)]
pub struct FeatureBuilder {
    coordinate_columns: Vec<usize>,
}

impl FeatureBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit the resolved X/Y columns as coerced numbers
    pub fn with_coordinate_columns(mut self, resolved: &ResolvedColumns) -> Self {
        self.coordinate_columns = vec![resolved.x_index(), resolved.y_index()];
        self
    }

    /// Build one feature per table row, in row order
    pub fn build(
        &self,
        table: &Table,
        lon_values: &[f64],
        lat_values: &[f64],
    ) -> Result<FeatureCollection> {
        if lon_values.len() != table.len() || lat_values.len() != table.len() {
            return Err(Error::data_validation(format!(
                "Coordinate arrays ({} lon, {} lat) do not match {} table rows",
                lon_values.len(),
                lat_values.len(),
                table.len()
            )));
        }

        let columns: Vec<(usize, &str, PropertyKind)> = table
            .header()
            .names()
            .iter()
            .enumerate()
            .filter(|(_, name)| !is_working_column(name))
            .map(|(index, name)| (index, name.as_str(), self.property_kind(table, index)))
            .collect();

        debug!(
            "Building {} features with {} properties each",
            table.len(),
            columns.len()
        );

        let features = table
            .rows()
            .iter()
            .zip(lon_values.iter().zip(lat_values))
            .map(|(row, (&lon, &lat))| {
                let properties: Map<String, Value> = columns
                    .iter()
                    .map(|&(index, name, kind)| {
                        let value = row
                            .get(index)
                            .and_then(|cell| cell.as_deref())
                            .map_or(Value::Null, |raw| property_value(raw, kind));
                        (name.to_string(), value)
                    })
                    .collect();

                Feature {
                    geometry: Geometry::point(GeographicPoint { lon, lat }),
                    properties,
                }
            })
            .collect();

        Ok(FeatureCollection::new(features))
    }

    fn property_kind(&self, table: &Table, column: usize) -> PropertyKind {
        if self.coordinate_columns.contains(&column) {
            return PropertyKind::Coordinate;
        }
        infer_kind(table.column(column).into_iter().flatten())
    }
}

/// Whether a column name is one of the pipeline's working columns
pub fn is_working_column(name: &str) -> bool {
    name == LONGITUDE_WORKING_COLUMN || name == LATITUDE_WORKING_COLUMN
}

/// Infer the property kind from a column's present values
pub fn infer_kind<'a>(values: impl Iterator<Item = &'a str>) -> PropertyKind {
    let mut kind = PropertyKind::Integer;
    let mut seen_any = false;

    for value in values {
        seen_any = true;
        let trimmed = value.trim();

        if kind == PropertyKind::Integer && trimmed.parse::<i64>().is_err() {
            kind = PropertyKind::Float;
        }
        if kind == PropertyKind::Float && !parses_as_finite_float(trimmed) {
            return PropertyKind::Text;
        }
    }

    if seen_any { kind } else { PropertyKind::Text }
}

fn parses_as_finite_float(value: &str) -> bool {
    value.parse::<f64>().is_ok_and(f64::is_finite)
}

fn property_value(raw: &str, kind: PropertyKind) -> Value {
    match kind {
        PropertyKind::Integer => raw
            .trim()
            .parse::<i64>()
            .map_or_else(|_| Value::String(raw.to_string()), Value::from),
        PropertyKind::Float => raw
            .trim()
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map_or(Value::Null, Value::Number),
        PropertyKind::Text => Value::String(raw.to_string()),
        PropertyKind::Coordinate => coerce_value(raw)
            .and_then(Number::from_f64)
            .map_or(Value::Null, Value::Number),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::{Header, RawTable};
    use serde_json::json;

    fn sample_table() -> Table {
        let raw = RawTable::from_rows(vec![
            vec!["Nombre", "X", "Y", "Expediente", "Area", "_lon", "Nota"],
            vec!["Lote A", "491000", "1098000", "12", "1.5", "0", ""],
            vec!["Lote B", "491 500,5", "1098500", "13", "2", "0", "revisar"],
        ]);
        Table::from_raw(&raw, 0).unwrap()
    }

    #[test]
    fn test_one_feature_per_row_in_order() {
        let table = sample_table();
        let resolved = ResolvedColumns::new(table.header(), 1, 2).unwrap();

        let collection = FeatureBuilder::new()
            .with_coordinate_columns(&resolved)
            .build(&table, &[-84.1, -84.2], &[9.9, 9.8])
            .unwrap();

        assert_eq!(collection.len(), 2);
        assert_eq!(
            collection.features[0].geometry,
            Geometry::Point {
                coordinates: [-84.1, 9.9]
            }
        );
        assert_eq!(collection.features[1].properties["Nombre"], json!("Lote B"));
    }

    #[test]
    fn test_properties_are_typed_and_ordered() {
        let table = sample_table();
        let resolved = ResolvedColumns::new(table.header(), 1, 2).unwrap();

        let collection = FeatureBuilder::new()
            .with_coordinate_columns(&resolved)
            .build(&table, &[-84.1, -84.2], &[9.9, 9.8])
            .unwrap();
        let properties = &collection.features[1].properties;

        let keys: Vec<&str> = properties.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["Nombre", "X", "Y", "Expediente", "Area", "Nota"]);

        assert_eq!(properties["X"], json!(491500.5));
        assert_eq!(properties["Y"], json!(1098500.0));
        assert_eq!(properties["Expediente"], json!(13));
        assert_eq!(properties["Area"], json!(2.0));
        assert_eq!(properties["Nota"], json!("revisar"));
        assert_eq!(collection.features[0].properties["Nota"], Value::Null);
    }

    #[test]
    fn test_working_columns_never_emitted() {
        let table = sample_table();
        let collection = FeatureBuilder::new()
            .build(&table, &[0.0, 0.0], &[0.0, 0.0])
            .unwrap();

        for feature in &collection.features {
            assert!(!feature.properties.contains_key(LONGITUDE_WORKING_COLUMN));
            assert!(!feature.properties.contains_key(LATITUDE_WORKING_COLUMN));
        }
    }

    #[test]
    fn test_length_mismatch_is_rejected() {
        let table = sample_table();
        let result = FeatureBuilder::new().build(&table, &[0.0], &[0.0, 0.0]);
        assert!(matches!(result, Err(Error::DataValidation { .. })));
    }

    #[test]
    fn test_empty_table_builds_empty_collection() {
        let table = Table::new(Header::from_cells(&["X", "Y"]), vec![]).unwrap();
        let collection = FeatureBuilder::new().build(&table, &[], &[]).unwrap();
        assert!(collection.is_empty());
    }

    #[test]
    fn test_infer_kind() {
        assert_eq!(infer_kind(["1", " 2 ", "-3"].into_iter()), PropertyKind::Integer);
        assert_eq!(infer_kind(["1", "2.5"].into_iter()), PropertyKind::Float);
        assert_eq!(infer_kind(["1", "2,5"].into_iter()), PropertyKind::Text);
        assert_eq!(infer_kind(["1", "inf"].into_iter()), PropertyKind::Text);
        assert_eq!(infer_kind(std::iter::empty()), PropertyKind::Text);
    }
}
