// src/error.rs

//! Error types shared by every catalog, decode and extraction operation

use thiserror::Error;

/// Errors reported to the shell by core operations
///
/// None of these are fatal to the process. Each one maps to an outcome the
/// shell presents; per-file extraction failures are counted in the report
/// instead of being returned.
#[derive(Error, Debug)]
pub enum Error {
    /// Catalog database missing, unreadable, or not the expected schema
    #[error("Failed to open catalog '{path}': {reason}")]
    CatalogOpen { path: String, reason: String },

    /// Manifest.plist or Status.plist missing or unreadable
    #[error("Failed to read property list '{path}': {reason}")]
    PropertyListRead { path: String, reason: String },

    /// Per-file metadata blob could not be decoded
    #[error("Failed to decode metadata: {0}")]
    MetadataDecode(String),

    /// Read or write failure while copying a payload
    #[error("Payload I/O error for '{path}': {source}")]
    PayloadIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Bulk extraction into a directory that already has entries
    #[error("Destination directory is not empty: {0}")]
    DestinationNotEmpty(String),

    /// Bulk extraction requested with no displayed rows
    #[error("No records selected for extraction")]
    NoSelection,

    /// Single-row copy of a directory or symlink record
    #[error("Record {0} is not a regular file")]
    NotRegularFile(String),

    /// Relative path that would escape the destination root
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Unknown domain: {0}")]
    UnknownDomain(String),

    #[error("Record not found: {0}")]
    RecordNotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("CSV export failed: {0}")]
    CsvExport(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for manifestdb operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Wrap an I/O error raised while touching a payload or its destination
    pub fn payload_io(path: impl AsRef<std::path::Path>, source: std::io::Error) -> Self {
        Self::PayloadIo {
            path: path.as_ref().display().to_string(),
            source,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Self::CsvExport(err.to_string())
    }
}
