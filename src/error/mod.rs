//! Error handling for the report engine.

pub mod util;

use arrow::error::ArrowError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Specialized error type for loading tables and generating reports
#[derive(Debug, Error)]
pub enum Error {
    /// Error opening or reading a file
    #[error("IO error for {path}: {source}")]
    Io {
        /// Path the operation was performed on
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: io::Error,
    },
    /// Error reading or writing Arrow/CSV data
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),
    /// A required column is absent from an input table
    #[error("table '{table}' is missing required column '{column}'")]
    MissingColumn {
        /// Logical name of the table
        table: String,
        /// Name of the missing column
        column: String,
    },
    /// An input table violated a schema expectation beyond a missing column
    #[error("schema error in table '{table}': {message}")]
    Schema {
        /// Logical name of the table
        table: String,
        /// Description of the violated expectation
        message: String,
    },
    /// Error converting typed report rows into record batches
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_arrow::Error),
    /// Error writing JSON output
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Attach a path to an IO error
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Schema expectation failure for a named table
    pub fn schema(table: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Schema {
            table: table.into(),
            message: message.into(),
        }
    }

    /// Missing required column in a named table
    pub fn missing_column(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self::MissingColumn {
            table: table.into(),
            column: column.into(),
        }
    }
}

/// Result type for report engine operations
pub type Result<T> = std::result::Result<T, Error>;
