//! Row filtering on coerced coordinates
//!
//! A row survives only when both its X and Y coerced to finite numbers. The
//! surviving rows keep their relative order and stay aligned with the
//! returned coordinate arrays.

use crate::app::models::{NumericColumn, Table};
use crate::{Error, Result};
use tracing::debug;

/// Rows that survived filtering, with their aligned coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredRows {
    pub table: Table,
    pub x_values: Vec<f64>,
    pub y_values: Vec<f64>,
    pub dropped: usize,
}

/// Drop rows whose X or Y failed coercion
///
/// Fails with [`Error::NoValidRows`] when no row survives, including when the
/// table had no data rows to begin with.
pub fn filter_rows(table: Table, x: &NumericColumn, y: &NumericColumn) -> Result<FilteredRows> {
    let rows_before = table.len();
    if x.len() != rows_before || y.len() != rows_before {
        return Err(Error::data_validation(format!(
            "Coerced columns ({} x, {} y) do not match {} table rows",
            x.len(),
            y.len(),
            rows_before
        )));
    }

    let mut keep = Vec::with_capacity(rows_before);
    let mut x_values = Vec::with_capacity(rows_before);
    let mut y_values = Vec::with_capacity(rows_before);

    for (x_value, y_value) in x.values().iter().zip(y.values()) {
        match (x_value, y_value) {
            (Some(x_value), Some(y_value)) => {
                keep.push(true);
                x_values.push(*x_value);
                y_values.push(*y_value);
            }
            _ => keep.push(false),
        }
    }

    let dropped = rows_before - x_values.len();
    if x_values.is_empty() {
        return Err(Error::NoValidRows { rows_before });
    }

    debug!(
        "Filtered {} rows: kept {}, dropped {}",
        rows_before,
        x_values.len(),
        dropped
    );

    Ok(FilteredRows {
        table: table.retain_rows(&keep)?,
        x_values,
        y_values,
        dropped,
    })
}
