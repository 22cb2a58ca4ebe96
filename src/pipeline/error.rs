//! Fatal load failures
//!
//! Row-level defects are never errors; they become removal-log entries or
//! sentinel values inside the stages. Only a source that cannot be turned into
//! a working table at all aborts the run.

use std::path::PathBuf;

use polars::prelude::PolarsError;
use thiserror::Error;

/// Reasons the loader can refuse an input before any stage runs.
#[derive(Debug, Error)]
pub enum LoadError {
    /// File extension is not one the loader understands.
    #[error("Unsupported file format: '{extension}'. Supported formats: csv, parquet")]
    UnsupportedFormat { extension: String },

    /// The file exists (or was expected to) but could not be parsed as a table.
    #[error("Failed to read {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },

    /// The table parsed but holds no rows or no columns.
    #[error("No citation records found in {}", .path.display())]
    Empty { path: PathBuf },

    /// A column the pipeline cannot run without is absent.
    #[error("Required column '{column}' not found in {}. Available columns: {available:?}", .path.display())]
    MissingColumn {
        path: PathBuf,
        column: String,
        available: Vec<String>,
    },
}
