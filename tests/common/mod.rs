//! Shared test utilities and fixture generators

#![allow(dead_code)]

use polars::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

/// Raw citations as they arrive from the open-data export, all text.
///
/// Row by row:
/// - 0: clean Manhattan citation, summons 1
/// - 1: same summons as row 0 with a different plate (duplicate)
/// - 2: unparseable issue date
/// - 3: negative fine, abbreviated Brooklyn county, `HH:mmA` time
/// - 4: blank county (missing critical field)
/// - 5: state typo and a garbled violation time
/// - 6: reduction larger than the fine, weekend date, high fine
pub fn create_raw_citations() -> DataFrame {
    df! {
        "summons_number" => ["1", "1", "3", "4", "5", "6", "7"],
        "plate" => ["ABC1234", "XYZ9876", "JKL5555", "GHI4321", "MNO0001", "PQR7777", "STU2468"],
        "state" => ["NY", "NY", "NJ", "ny", "PA", "n.y", "CALIF"],
        "license_type" => ["PAS", "PAS", "COM", "PAS", "PAS", "OMT", "PAS"],
        "issue_date" => ["2024-01-05", "2024-01-05", "not-a-date", "2024-03-15", "2024-04-01", "2024-05-20", "2024-06-08"],
        "violation_time" => ["0830A", "0830A", "1200P", "11:45P", "0715P", "25XXP", "1159A"],
        "fine_amount" => ["65", "65", "115", "-20", "45", "65", "750"],
        "reduction_amount" => ["0", "0", "0", "0", "0", "", "800"],
        "county" => ["NY", "NY", "K", "K", "", "Q", "BX"],
        "precinct" => ["019", "019", "077", "077", "114", "109", "040"],
        "issuing_agency" => ["POLICE", "POLICE", "TRAFFIC", "TRAFFIC", "POLICE", "TRAFFIC", "POLICE"],
    }
    .unwrap()
}

/// Minimal raw table: one citation with only the required columns plus a plate
pub fn create_single_citation(issue_date: &str) -> DataFrame {
    df! {
        "summons_number" => ["100"],
        "issue_date" => [issue_date],
        "county" => ["NY"],
        "plate" => ["ABC1234"],
    }
    .unwrap()
}

/// Create a temporary directory with a test CSV file
pub fn create_temp_csv(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("citations.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    CsvWriter::new(&mut file).finish(df).unwrap();

    (temp_dir, csv_path)
}

/// Create a temporary directory with a test Parquet file
pub fn create_temp_parquet(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let parquet_path = temp_dir.path().join("citations.parquet");

    let file = std::fs::File::create(&parquet_path).unwrap();
    ParquetWriter::new(file).finish(df).unwrap();

    (temp_dir, parquet_path)
}

/// Read one column as text for assertions
pub fn column_text(df: &DataFrame, name: &str) -> Vec<Option<String>> {
    df.column(name)
        .unwrap()
        .cast(&DataType::String)
        .unwrap()
        .str()
        .unwrap()
        .into_iter()
        .map(|v| v.map(str::to_string))
        .collect()
}

/// Assert that a DataFrame contains specific columns
pub fn assert_has_columns(df: &DataFrame, expected_cols: &[&str]) {
    let actual_cols: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    for col in expected_cols {
        assert!(
            actual_cols.contains(&col.to_string()),
            "Missing expected column: '{}'. Actual columns: {:?}",
            col,
            actual_cols
        );
    }
}

/// Assert that a DataFrame does NOT contain specific columns
pub fn assert_missing_columns(df: &DataFrame, unexpected_cols: &[&str]) {
    let actual_cols: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    for col in unexpected_cols {
        assert!(
            !actual_cols.contains(&col.to_string()),
            "Unexpected column still present: '{}'",
            col
        );
    }
}
