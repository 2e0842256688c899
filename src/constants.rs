//! Application constants for sheet2geojson
//!
//! Default coordinate-column vocabularies, CRS codes, missing-value markers
//! and the names used for pipeline-internal working columns.

// =============================================================================
// Coordinate Column Vocabulary
// =============================================================================

/// Default X-role (easting) synonyms. The first entry anchors the prefix fallback.
pub const DEFAULT_X_SYNONYMS: &[&str] = &[
    "x",
    "este",
    "easting",
    "coordx",
    "coordenadax",
    "crtm05x",
    "xcrtm05",
];

/// Default Y-role (northing) synonyms. The first entry anchors the prefix fallback.
pub const DEFAULT_Y_SYNONYMS: &[&str] = &[
    "y",
    "norte",
    "northing",
    "coordy",
    "coordenaday",
    "crtm05y",
    "ycrtm05",
];

/// Preferred exact header for the X role (compared after trimming only)
pub const DEFAULT_EXACT_X_NAME: &str = "X";

/// Preferred exact header for the Y role (compared after trimming only)
pub const DEFAULT_EXACT_Y_NAME: &str = "Y";

// =============================================================================
// Coordinate Reference Systems
// =============================================================================

/// Default source CRS: CR05 / CRTM05 (Costa Rica transverse Mercator 2005)
pub const DEFAULT_SOURCE_CRS: u32 = 5367;

/// Target CRS of every output document: WGS 84 geographic, lon/lat order
pub const TARGET_CRS: u32 = 4326;

// =============================================================================
// Table Handling
// =============================================================================

/// Cell contents treated as missing values (after trimming)
pub const MISSING_VALUE_MARKERS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Prefix given to header cells that are blank
pub const UNNAMED_COLUMN_PREFIX: &str = "Unnamed: ";

/// Candidate delimiters tried when sniffing a CSV export
pub const CANDIDATE_DELIMITERS: &[u8] = b",;\t|";

/// Number of non-blank lines inspected when sniffing the delimiter
pub const DELIMITER_SNIFF_LINES: usize = 20;

/// Working column holding computed longitudes (never emitted as a property)
pub const LONGITUDE_WORKING_COLUMN: &str = "_lon";

/// Working column holding computed latitudes (never emitted as a property)
pub const LATITUDE_WORKING_COLUMN: &str = "_lat";

// =============================================================================
// I/O Defaults
// =============================================================================

/// Default output document path
pub const DEFAULT_OUTPUT_PATH: &str = "output.geojson";

/// Timeout for fetching remote sources
pub const FETCH_TIMEOUT_SECS: u64 = 60;

/// Application directory name under the user configuration directory
pub const CONFIG_DIR_NAME: &str = "sheet2geojson";

/// Default configuration file name
pub const CONFIG_FILE_NAME: &str = "config.json";
