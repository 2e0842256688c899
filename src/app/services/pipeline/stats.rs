//! Pipeline report and result structures

use crate::app::models::FeatureCollection;
use serde::Serialize;

/// What one pipeline run saw and did
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineReport {
    /// Index of the header row in the raw table, when header detection ran
    pub header_row: Option<usize>,
    /// Resolved X column name
    pub x_column: String,
    /// Resolved Y column name
    pub y_column: String,
    /// Data rows before filtering
    pub rows_before: usize,
    /// Data rows after filtering
    pub rows_after: usize,
    /// Rows dropped for a non-numeric X or Y
    pub dropped: usize,
    /// Source CRS code
    pub source_crs: u32,
    /// Source CRS name
    pub source_crs_name: String,
    /// Number of features emitted
    pub features: usize,
}

impl PipelineReport {
    /// Share of data rows that became features, as a percentage
    pub fn kept_rate(&self) -> f64 {
        if self.rows_before == 0 {
            0.0
        } else {
            (self.rows_after as f64 / self.rows_before as f64) * 100.0
        }
    }

    /// One-line summary for logs
    pub fn summary(&self) -> String {
        format!(
            "Pipeline Summary: {} -> {} rows ({:.1}% kept) | Dropped: {} | X = '{}', Y = '{}' | EPSG:{}",
            self.rows_before,
            self.rows_after,
            self.kept_rate(),
            self.dropped,
            self.x_column,
            self.y_column,
            self.source_crs
        )
    }
}

/// Result of a pipeline run
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput {
    pub collection: FeatureCollection,
    pub report: PipelineReport,
}
