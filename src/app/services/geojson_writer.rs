//! GeoJSON document serialisation and persistence
//!
//! Documents are written to a temporary file next to the destination and
//! renamed into place, so a failed run never leaves a truncated document.

use crate::app::models::FeatureCollection;
use crate::{Error, Result};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Writer for GeoJSON feature collections
#[derive(Debug, Clone, Copy, Default)]
pub struct GeoJsonWriter {
    pretty: bool,
}

impl GeoJsonWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Indent the document instead of writing it compactly
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Serialise a collection into any writer
    pub fn to_writer<W: Write>(&self, collection: &FeatureCollection, writer: W) -> Result<()> {
        let result = if self.pretty {
            serde_json::to_writer_pretty(writer, collection)
        } else {
            serde_json::to_writer(writer, collection)
        };
        result.map_err(|e| Error::serialization("Failed to serialize feature collection", e))
    }

    /// Serialise a collection into a string
    pub fn to_string(&self, collection: &FeatureCollection) -> Result<String> {
        let mut buffer = Vec::new();
        self.to_writer(collection, &mut buffer)?;
        String::from_utf8(buffer)
            .map_err(|e| Error::data_validation(format!("Serialized document is not UTF-8: {}", e)))
    }

    /// Write a collection to `path`, creating parent directories as needed
    ///
    /// Returns the number of bytes written.
    pub fn write_file(&self, collection: &FeatureCollection, path: &Path) -> Result<u64> {
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        fs::create_dir_all(parent).map_err(|e| {
            Error::io(
                format!("Failed to create output directory '{}'", parent.display()),
                e,
            )
        })?;

        let temp_file = NamedTempFile::new_in(parent).map_err(|e| {
            Error::io(
                format!("Failed to create temporary file in '{}'", parent.display()),
                e,
            )
        })?;

        {
            let mut writer = BufWriter::new(temp_file.as_file());
            self.to_writer(collection, &mut writer)?;
            writer
                .flush()
                .map_err(|e| Error::io("Failed to flush GeoJSON document", e))?;
        }

        temp_file.persist(path).map_err(|e| {
            Error::io(
                format!("Failed to move document into place at '{}'", path.display()),
                e.error,
            )
        })?;

        let bytes = fs::metadata(path)
            .map_err(|e| Error::io(format!("Failed to stat '{}'", path.display()), e))?
            .len();

        debug!("Wrote {} bytes", bytes);
        info!(
            "Wrote {} features to {}",
            collection.len(),
            path.display()
        );

        Ok(bytes)
    }
}
