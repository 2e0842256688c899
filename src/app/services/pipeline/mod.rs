//! End-to-end conversion pipeline
//!
//! Orchestrates the per-table stages in a fixed order:
//!
//! 1. **Header detection**: pick the header row behind any banner rows
//! 2. **Column resolution**: find the X and Y columns in the header
//! 3. **Coercion**: turn both coordinate columns into numbers
//! 4. **Filtering**: drop every row with a non-numeric X or Y, once
//! 5. **Reprojection**: map the surviving points to WGS84
//! 6. **Feature building**: emit one point feature per surviving row
//!
//! Configuration is validated in [`Pipeline::new`], so a bad CRS or vocabulary
//! is reported before any row is touched.
//!
//! # Example
//!
//! ```rust
//! use sheet2geojson::{Config, Pipeline, RawTable};
//!
//! # fn example() -> sheet2geojson::Result<()> {
//! let raw = RawTable::from_rows(vec![
//!     vec!["Nombre", "X", "Y"],
//!     vec!["Lote A", "491000", "1098000"],
//! ]);
//!
//! let output = Pipeline::new(Config::default())?.run_raw(&raw)?;
//! assert_eq!(output.collection.len(), 1);
//! assert_eq!(output.report.dropped, 0);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod filter;
pub mod processor;
pub mod stats;

#[cfg(test)]
mod tests;

pub use filter::{FilteredRows, filter_rows};
pub use processor::Pipeline;
pub use stats::{PipelineOutput, PipelineReport};
