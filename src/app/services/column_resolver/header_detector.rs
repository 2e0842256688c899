//! Header row detection for tables with banner or comment rows
//!
//! Scans rows in order and picks the first one that names both an X-role and
//! a Y-role column. Rows are never re-scored: the first match wins.

use super::normalize::{NormalizedSynonyms, normalize_name};
use crate::app::models::{RawTable, is_blank_row};
use crate::{Error, Result};
use tracing::debug;

/// Find the index of the header row in a headerless table
///
/// Falls back to the first row with any non-blank cell when no row mentions
/// both coordinate roles. A table with no non-blank row is an error.
pub fn detect_header<S: AsRef<str>>(
    raw: &RawTable,
    x_synonyms: &[S],
    y_synonyms: &[S],
) -> Result<usize> {
    let x_synonyms = NormalizedSynonyms::new(x_synonyms);
    let y_synonyms = NormalizedSynonyms::new(y_synonyms);
    detect_header_normalized(raw, &x_synonyms, &y_synonyms)
}

/// Header detection over pre-normalised synonym sets
pub fn detect_header_normalized(
    raw: &RawTable,
    x_synonyms: &NormalizedSynonyms,
    y_synonyms: &NormalizedSynonyms,
) -> Result<usize> {
    let mut first_non_blank = None;

    for (index, row) in raw.rows().iter().enumerate() {
        if first_non_blank.is_none() && !is_blank_row(row) {
            first_non_blank = Some(index);
        }

        if names_both_roles(row, x_synonyms, y_synonyms) {
            debug!("Header row detected at index {}", index);
            return Ok(index);
        }
    }

    match first_non_blank {
        Some(index) => {
            debug!(
                "No row names both coordinate roles, using first non-blank row {}",
                index
            );
            Ok(index)
        }
        None => Err(Error::HeaderNotDetected { rows: raw.len() }),
    }
}

fn names_both_roles(
    row: &[String],
    x_synonyms: &NormalizedSynonyms,
    y_synonyms: &NormalizedSynonyms,
) -> bool {
    let mut has_x = false;
    let mut has_y = false;

    for cell in row {
        let normalized = normalize_name(cell);
        has_x |= x_synonyms.contains(&normalized);
        has_y |= y_synonyms.contains(&normalized);
        if has_x && has_y {
            return true;
        }
    }

    false
}
