//! Error types for table loading and validation.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for table operations.
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors that can occur while loading or validating a station table.
#[derive(Debug, Error)]
pub enum DataError {
    /// Input table file does not exist
    #[error("Input table missing: {}", .path.display())]
    MissingInput {
        /// Path that was checked
        path: PathBuf,
    },

    /// A required column is absent from the table
    #[error("Missing required column: {column}")]
    MissingColumn {
        /// Name of the absent column
        column: String,
    },

    /// A non-nullable cell was null
    #[error("Null value in column {column} at row {row}")]
    NullValue {
        /// Column containing the null
        column: String,
        /// Zero-based row index
        row: usize,
    },

    /// Polars error
    #[error("Polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
