//! Error types for the Augur library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Augur operations.
#[derive(Debug, Error)]
pub enum AugurError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File extension is not one of the supported formats.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Error reading a spreadsheet workbook.
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    /// Override references a column that was never inferred.
    #[error("Column '{0}' not found")]
    ColumnNotFound(String),

    /// Override type string is empty or blank.
    #[error("Invalid override type: {0}")]
    InvalidOverrideType(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for Augur operations.
pub type Result<T> = std::result::Result<T, AugurError>;
