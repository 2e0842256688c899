//! Pipeline orchestration

use super::filter::filter_rows;
use super::stats::{PipelineOutput, PipelineReport};
use crate::Result;
use crate::app::models::{RawTable, Table};
use crate::app::services::column_resolver::{
    ColumnResolver, NormalizedSynonyms, detect_header_normalized,
};
use crate::app::services::feature_builder::FeatureBuilder;
use crate::app::services::numeric_coercer::coerce;
use crate::app::services::reprojection::CoordinateReprojector;
use crate::config::{Config, HeaderMode};
use tracing::{debug, info, warn};

/// Conversion pipeline from a table to a WGS84 feature collection
///
/// Holds everything derived from the configuration, so one pipeline can
/// convert any number of tables.
#[derive(Debug)]
pub struct Pipeline {
    config: Config,
    resolver: ColumnResolver,
    header_x_names: NormalizedSynonyms,
    header_y_names: NormalizedSynonyms,
    reprojector: CoordinateReprojector,
}

impl Pipeline {
    /// Create a pipeline, validating the configuration first
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let resolver = ColumnResolver::new(
            &config.x_synonyms,
            &config.y_synonyms,
            config.exact_names.x.as_str(),
            config.exact_names.y.as_str(),
        );
        let header_x_names = resolver
            .x_synonyms()
            .clone()
            .with_extra(&config.exact_names.x);
        let header_y_names = resolver
            .y_synonyms()
            .clone()
            .with_extra(&config.exact_names.y);
        let reprojector = CoordinateReprojector::from_epsg(config.source_crs_id)?;

        Ok(Self {
            config,
            resolver,
            header_x_names,
            header_y_names,
            reprojector,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn reprojector(&self) -> &CoordinateReprojector {
        &self.reprojector
    }

    /// Locate the header row of a raw table
    pub fn detect_header(&self, raw: &RawTable) -> Result<usize> {
        match self.config.header_mode {
            HeaderMode::Detect => {
                detect_header_normalized(raw, &self.header_x_names, &self.header_y_names)
            }
            HeaderMode::FirstRow => Ok(0),
        }
    }

    /// Convert a headerless raw table
    pub fn run_raw(&self, raw: &RawTable) -> Result<PipelineOutput> {
        let header_row = self.detect_header(raw)?;
        if header_row > 0 {
            info!("Skipping {} rows above the header", header_row);
        }

        let table = Table::from_raw(raw, header_row)?;
        let mut output = self.run_table(table)?;
        output.report.header_row = Some(header_row);
        Ok(output)
    }

    /// Convert a table whose header is already known
    pub fn run_table(&self, table: Table) -> Result<PipelineOutput> {
        let resolved = self.resolver.resolve(table.header())?;
        let rows_before = table.len();

        let x = coerce(table.column(resolved.x_index()));
        let y = coerce(table.column(resolved.y_index()));
        debug!(
            "Coerced coordinates: {} invalid X, {} invalid Y",
            x.invalid_count(),
            y.invalid_count()
        );

        let filtered = filter_rows(table, &x, &y)?;
        if filtered.dropped > 0 {
            warn!(
                "Dropped {} of {} rows with non-numeric coordinates",
                filtered.dropped, rows_before
            );
        }

        let (lon_values, lat_values) = self
            .reprojector
            .reproject(&filtered.x_values, &filtered.y_values)?;

        let collection = FeatureBuilder::new()
            .with_coordinate_columns(&resolved)
            .build(&filtered.table, &lon_values, &lat_values)?;

        let definition = self.reprojector.definition();
        let report = PipelineReport {
            header_row: None,
            x_column: resolved.x_name().to_string(),
            y_column: resolved.y_name().to_string(),
            rows_before,
            rows_after: filtered.table.len(),
            dropped: filtered.dropped,
            source_crs: definition.code,
            source_crs_name: definition.name.clone(),
            features: collection.len(),
        };

        info!("{}", report.summary());
        Ok(PipelineOutput { collection, report })
    }
}
