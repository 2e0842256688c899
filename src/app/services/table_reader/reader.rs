//! Headerless, flexible CSV parsing into a raw table

use super::decode::{decode_bytes, sniff_delimiter};
use super::source::InputSource;
use crate::app::models::RawTable;
use crate::{Error, Result};
use serde::Serialize;
use tracing::{debug, info, warn};

/// Reading result with the raw table and basic statistics
#[derive(Debug, Clone)]
pub struct ReadResult {
    /// Every parsed record, header not yet identified
    pub table: RawTable,

    /// Basic reading statistics
    pub stats: ReadStats,
}

/// Simple reading statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReadStats {
    /// Bytes received from the source
    pub bytes: usize,

    /// Delimiter used for parsing
    pub delimiter: char,

    /// Records parsed into rows
    pub records_read: usize,

    /// Records skipped because they could not be parsed
    pub records_skipped: usize,
}

/// CSV table reader that makes no assumption about the header position
#[derive(Debug, Clone, Default)]
pub struct TableReader {
    delimiter: Option<u8>,
}

impl TableReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a fixed delimiter instead of sniffing one
    pub fn with_delimiter(mut self, delimiter: Option<char>) -> Result<Self> {
        self.delimiter = match delimiter {
            None => None,
            Some(c) if c.is_ascii() => Some(c as u8),
            Some(c) => {
                return Err(Error::configuration(format!(
                    "Delimiter must be a single ASCII character, got {:?}",
                    c
                )));
            }
        };
        Ok(self)
    }

    /// Fetch and parse a source
    pub fn read(&self, source: &InputSource) -> Result<ReadResult> {
        let bytes = source.fetch()?;
        self.read_bytes(&bytes, &source.display_name())
    }

    /// Parse raw bytes
    pub fn read_bytes(&self, bytes: &[u8], source_name: &str) -> Result<ReadResult> {
        let text = decode_bytes(bytes);
        let mut result = self.read_str(&text, source_name)?;
        result.stats.bytes = bytes.len();
        Ok(result)
    }

    /// Parse already-decoded text
    pub fn read_str(&self, text: &str, source_name: &str) -> Result<ReadResult> {
        let delimiter = self.delimiter.unwrap_or_else(|| sniff_delimiter(text));

        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(delimiter)
            .from_reader(text.as_bytes());

        let mut rows = Vec::new();
        let mut stats = ReadStats {
            bytes: text.len(),
            delimiter: char::from(delimiter),
            ..Default::default()
        };

        for (index, record) in csv_reader.records().enumerate() {
            match record {
                Ok(record) => {
                    rows.push(record.iter().map(str::to_string).collect::<Vec<_>>());
                    stats.records_read += 1;
                }
                Err(e) => {
                    stats.records_skipped += 1;
                    debug!("Skipped record {} in {}: {}", index, source_name, e);
                }
            }
        }

        if stats.records_skipped > 0 {
            warn!(
                "Skipped {} unparsable records in {}",
                stats.records_skipped, source_name
            );
        }

        info!(
            "Read {} records from {} (delimiter {:?})",
            stats.records_read, source_name, stats.delimiter
        );

        Ok(ReadResult {
            table: RawTable::new(rows),
            stats,
        })
    }
}
