//! Error types for catalog loading operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when loading catalogs and datasets.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    /// Catalog directory not found.
    #[error("Catalog directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// CSV file not found.
    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to open a file.
    #[error("Failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read or parse CSV input.
    #[error("Failed to read CSV {source_name}: {source}")]
    CsvRead {
        source_name: String,
        #[source]
        source: csv::Error,
    },

    /// A required column is absent from the header row.
    #[error("Missing column '{column}' in {source_name}")]
    MissingColumn {
        column: &'static str,
        source_name: String,
    },

    /// Invalid value in CSV field.
    #[error("Invalid {field} value '{value}' in {source_name} (line {line})")]
    InvalidValue {
        field: &'static str,
        value: String,
        source_name: String,
        line: u64,
    },
}

/// Result type for catalog loading operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
