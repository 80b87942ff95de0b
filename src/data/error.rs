//! Errors raised while reading a location table.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV in {path}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("malformed JSON in {path}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("unreadable parquet file {path}")]
    Parquet {
        path: PathBuf,
        #[source]
        source: parquet::errors::ParquetError,
    },

    #[error("unreadable record batch in {path}")]
    Arrow {
        path: PathBuf,
        #[source]
        source: arrow::error::ArrowError,
    },

    #[error("{path} is missing required column '{column}'")]
    MissingColumn { path: PathBuf, column: &'static str },

    #[error("row {row} of {path}: {reason}")]
    InvalidRow {
        path: PathBuf,
        row: usize,
        reason: String,
    },

    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
}
