use std::path::PathBuf;

use thiserror::Error;

/// Fatal failure while reading a results file.
///
/// `row` is the 1-based data row, not counting the CSV header line.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("Unsupported file extension: .{0}")]
    UnsupportedExtension(String),

    #[error("Missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("Row {row}: '{value}' is not a valid date")]
    InvalidDate { row: usize, value: String },

    #[error("Row {row}, column {column}: '{value}' is not a number")]
    InvalidNumber {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("Row {row}: {reason}")]
    InvalidRecord { row: usize, reason: String },

    #[error("File not found: {0}")]
    NotFound(PathBuf),
}

/// An aggregate could not run because its column is absent from the data.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Column '{column}' was not found in the filtered data")]
pub struct MissingColumn {
    pub column: &'static str,
}
