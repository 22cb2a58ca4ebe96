//! Dataset loader and writer for CSV and Parquet files

use std::path::Path;

use anyhow::{Context, Result};
use polars::prelude::*;

use super::columns::REQUIRED_RAW_COLUMNS;
use super::error::LoadError;

fn file_extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

/// Load raw citations into the working table.
///
/// CSV columns are all read as text so codes keep their original form
/// (leading zeros, trailing meridiem letters). Parquet keeps its own types.
///
/// Returns the table with its row count, column count and estimated memory in MB.
pub fn load_dataset(path: &Path) -> Result<(DataFrame, usize, usize, f64)> {
    let extension = file_extension(path);

    let loaded = match extension.as_str() {
        "csv" => LazyCsvReader::new(path)
            .with_infer_schema_length(Some(0))
            .finish()
            .and_then(|lf| lf.collect()),
        "parquet" => {
            LazyFrame::scan_parquet(path, Default::default()).and_then(|lf| lf.collect())
        }
        _ => return Err(LoadError::UnsupportedFormat { extension }.into()),
    };

    let df = loaded.map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    validate_raw_table(&df, path)?;

    let (rows, cols) = df.shape();
    let memory_mb = df.estimated_size() as f64 / (1024.0 * 1024.0);

    Ok((df, rows, cols, memory_mb))
}

/// Reject tables the pipeline cannot start from.
pub fn validate_raw_table(df: &DataFrame, path: &Path) -> Result<(), LoadError> {
    if df.height() == 0 || df.width() == 0 {
        return Err(LoadError::Empty {
            path: path.to_path_buf(),
        });
    }

    let available: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    require_columns(available, path)
}

fn require_columns(available: Vec<String>, path: &Path) -> Result<(), LoadError> {
    for required in REQUIRED_RAW_COLUMNS {
        if !available.iter().any(|c| c == required) {
            return Err(LoadError::MissingColumn {
                path: path.to_path_buf(),
                column: required.to_string(),
                available,
            });
        }
    }

    Ok(())
}

/// Read only the schema of a dataset and return its column names.
pub fn get_column_names(path: &Path) -> Result<Vec<String>> {
    let extension = file_extension(path);

    let scanned = match extension.as_str() {
        "csv" => LazyCsvReader::new(path)
            .with_infer_schema_length(Some(0))
            .finish(),
        "parquet" => LazyFrame::scan_parquet(path, Default::default()),
        _ => return Err(LoadError::UnsupportedFormat { extension }.into()),
    };

    let schema = scanned
        .and_then(|mut lf| lf.collect_schema())
        .map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(schema.iter_names().map(|s| s.to_string()).collect())
}

/// Fail fast on a missing required column using the schema alone, before
/// any rows are read.
pub fn check_required_columns(path: &Path) -> Result<Vec<String>> {
    let columns = get_column_names(path)?;
    require_columns(columns.clone(), path)?;
    log::debug!("Schema of {}: {:?}", path.display(), columns);
    Ok(columns)
}

/// Save dataset to file (CSV or Parquet based on extension)
pub fn save_dataset(df: &mut DataFrame, path: &Path) -> Result<()> {
    let extension = file_extension(path);

    match extension.as_str() {
        "csv" => {
            let mut file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            CsvWriter::new(&mut file)
                .finish(df)
                .with_context(|| format!("Failed to write CSV file: {}", path.display()))?;
        }
        "parquet" => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            ParquetWriter::new(file)
                .finish(df)
                .with_context(|| format!("Failed to write Parquet file: {}", path.display()))?;
        }
        _ => anyhow::bail!(
            "Unsupported output format: {}. Supported formats: csv, parquet",
            extension
        ),
    }

    Ok(())
}
