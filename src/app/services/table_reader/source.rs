//! Input locations and byte retrieval

use crate::constants::FETCH_TIMEOUT_SECS;
use crate::{Error, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

/// Where the tabular data comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Local file
    File(PathBuf),
    /// HTTP or HTTPS URL (e.g. a published spreadsheet CSV export)
    Url(String),
}

impl InputSource {
    /// Read the full contents of the source
    pub fn fetch(&self) -> Result<Vec<u8>> {
        match self {
            InputSource::File(path) => read_file(path),
            InputSource::Url(url) => fetch_url(url),
        }
    }

    /// Short name used in diagnostics
    pub fn display_name(&self) -> String {
        self.to_string()
    }
}

impl FromStr for InputSource {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(Error::configuration("Input source cannot be empty"));
        }

        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Ok(InputSource::Url(trimmed.to_string()))
        } else {
            Ok(InputSource::File(PathBuf::from(trimmed)))
        }
    }
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputSource::File(path) => write!(f, "{}", path.display()),
            InputSource::Url(url) => write!(f, "{}", url),
        }
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    let bytes = std::fs::read(path)
        .map_err(|e| Error::io(format!("Failed to read '{}'", path.display()), e))?;
    debug!("Read {} bytes from {}", bytes.len(), path.display());
    Ok(bytes)
}

fn fetch_url(url: &str) -> Result<Vec<u8>> {
    info!("Fetching {}", url);

    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
        .build()
        .map_err(|e| Error::fetch(url, format!("Failed to build HTTP client: {}", e)))?;

    let response = client
        .get(url)
        .send()
        .map_err(|e| Error::fetch(url, e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::fetch(url, format!("HTTP status {}", status)));
    }

    let bytes = response
        .bytes()
        .map_err(|e| Error::fetch(url, format!("Failed to read response body: {}", e)))?;

    debug!("Fetched {} bytes from {}", bytes.len(), url);
    Ok(bytes.to_vec())
}
