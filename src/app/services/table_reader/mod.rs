//! Tabular source ingestion
//!
//! Fetches raw bytes from a local file or an HTTP(S) URL, decodes them,
//! sniffs the field delimiter and parses every record without assuming a
//! header. The result is a [`RawTable`](crate::app::models::RawTable) for the
//! header detector.
//!
//! - [`source`] - Input locations and byte retrieval
//! - [`decode`] - Text decoding and delimiter sniffing
//! - [`reader`] - Headerless, flexible CSV parsing

pub mod decode;
pub mod reader;
pub mod source;

// Re-export main types for easy access
pub use decode::{decode_bytes, sniff_delimiter};
pub use reader::{ReadResult, ReadStats, TableReader};
pub use source::InputSource;
