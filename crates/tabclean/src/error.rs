//! Error types for the tabclean library.

use std::path::PathBuf;
use thiserror::Error;

use crate::table::TableError;

/// Main error type for tabclean operations.
///
/// Only loading, exporting and configuration surface errors. Cleaning and
/// instruction application absorb bad values as nulls instead.
#[derive(Debug, Error)]
pub enum TabCleanError {
    /// Error reading or writing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed delimited data.
    #[error("Parse error at row {row}, column {column}: {message}")]
    Parse {
        row: usize,
        column: usize,
        message: String,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Input bytes are not valid UTF-8.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// File format not supported.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Empty file or no header to read.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Spreadsheet could not be opened or read.
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(String),

    /// Writing an export failed.
    #[error("Export error: {0}")]
    Export(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Text-generation provider failure.
    #[error("LLM error: {0}")]
    Llm(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A table was built with inconsistent shape.
    #[error("Table error: {0}")]
    Table(#[from] TableError),
}

/// Result type alias for tabclean operations.
pub type Result<T> = std::result::Result<T, TabCleanError>;
