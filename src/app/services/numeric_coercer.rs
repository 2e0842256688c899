//! Numeric coercion for hand-entered coordinate text
//!
//! Coordinates typed into spreadsheets come with decimal commas, thousands
//! spaces (often non-breaking) and stray symbols. Coercion is permissive about
//! that noise but still rejects text that is not a number. Failures become the
//! not-a-number marker (`None`) instead of errors; the pipeline drops and
//! counts those rows later.

use crate::app::models::NumericColumn;
use regex::Regex;
use std::sync::LazyLock;

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s\u{00A0}]").expect("valid whitespace pattern"));

static NON_NUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9.\-]").expect("valid non-numeric pattern"));

/// Coerce a column of raw values, preserving order and length
pub fn coerce<'a, I>(raw_column: I) -> NumericColumn
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    NumericColumn::new(
        raw_column
            .into_iter()
            .map(|value| value.and_then(coerce_value))
            .collect(),
    )
}

/// Coerce a single raw value to a finite number
///
/// Steps: strip whitespace and non-breaking spaces, turn every comma into a
/// period, strip anything but digits, periods and minus signs, then parse.
pub fn coerce_value(raw: &str) -> Option<f64> {
    let compact = WHITESPACE.replace_all(raw, "");
    let dotted = compact.replace(',', ".");
    let cleaned = NON_NUMERIC.replace_all(&dotted, "");

    cleaned
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}
