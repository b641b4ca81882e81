use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LogSyncError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Missing or empty header in {0}")]
    EmptyHeader(String),

    #[error("No data rows in {0}")]
    NoDataRows(String),

    #[error("Column {column:?} not found in {path}")]
    ColumnNotFound { column: String, path: String },

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl LogSyncError {
    pub fn column_not_found(column: &str, path: &Path) -> Self {
        LogSyncError::ColumnNotFound {
            column: column.to_string(),
            path: path.display().to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LogSyncError>;
