//! Coordinate column discovery for loosely-structured tables
//!
//! Spreadsheet exports rarely agree on what the coordinate columns are called,
//! and often carry banner rows above the real header. This module finds both.
//!
//! ## Architecture
//!
//! - [`normalize`] - Case-folding and symbol stripping used for name comparison
//! - [`header_detector`] - Locates the header row in a headerless table
//! - [`resolver`] - Selects the X and Y columns from a header
//!
//! ## Usage
//!
//! ```rust
//! use sheet2geojson::app::models::{Header, RawTable};
//! use sheet2geojson::app::services::column_resolver::{ColumnResolver, detect_header};
//!
//! # fn example() -> sheet2geojson::Result<()> {
//! let raw = RawTable::from_rows(vec![
//!     vec!["Informe de dictámenes"],
//!     vec!["Nombre", "Este", "Norte"],
//!     vec!["A", "491000", "1098000"],
//! ]);
//! let x = ["x", "este"];
//! let y = ["y", "norte"];
//!
//! let header_row = detect_header(&raw, &x, &y)?;
//! assert_eq!(header_row, 1);
//!
//! let header = Header::from_cells(&raw.rows()[header_row]);
//! let resolved = ColumnResolver::new(&x, &y, "X", "Y").resolve(&header)?;
//! assert_eq!(resolved.x_name(), "Este");
//! # Ok(())
//! # }
//! ```

pub mod header_detector;
pub mod normalize;
pub mod resolver;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use header_detector::{detect_header, detect_header_normalized};
pub use normalize::{NormalizedSynonyms, normalize_name};
pub use resolver::{ColumnResolver, MatchRule};
