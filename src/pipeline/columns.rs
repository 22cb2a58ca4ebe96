//! Column names and typed accessors shared by the cleaning stages
//!
//! Stages read raw values out of the working table, transform them row by row
//! and write whole columns back. These helpers keep the read side uniform so an
//! absent optional column behaves like an all-null one.

use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use polars::prelude::*;

pub const SUMMONS_NUMBER: &str = "summons_number";
pub const ISSUE_DATE: &str = "issue_date";
pub const VIOLATION_TIME: &str = "violation_time";
pub const VIOLATION_TIME_PARSED: &str = "violation_time_parsed";
pub const VIOLATION_HOUR: &str = "violation_hour";
pub const TIME_OF_DAY: &str = "time_of_day";
pub const YEAR: &str = "year";
pub const MONTH: &str = "month";
pub const MONTH_NAME: &str = "month_name";
pub const DAY: &str = "day";
pub const DAY_OF_WEEK: &str = "day_of_week";
pub const WEEK_OF_YEAR: &str = "week_of_year";
pub const QUARTER: &str = "quarter";
pub const IS_WEEKEND: &str = "is_weekend";
pub const IS_BUSINESS_HOURS: &str = "is_business_hours";
pub const STATE: &str = "state";
pub const IS_NY_PLATE: &str = "is_ny_plate";
pub const COUNTY: &str = "county";
pub const PRECINCT: &str = "precinct";
pub const PRECINCT_NUMERIC: &str = "precinct_numeric";
pub const FINE_AMOUNT: &str = "fine_amount";
pub const FINE_AMOUNT_FLAG: &str = "fine_amount_flag";
pub const REDUCTION_AMOUNT: &str = "reduction_amount";
pub const NET_FINE: &str = "net_fine";
pub const PLATE: &str = "plate";
pub const PLATE_MASKED: &str = "plate_masked";

/// Prefix for bookkeeping columns that never leave the pipeline.
pub const INTERNAL_PREFIX: &str = "__";
/// Load-order position of each row, reported as `original_index`.
pub const ROW_INDEX: &str = "__row_index";
/// Issue date text as it was loaded, kept for the removal log.
pub const ISSUE_DATE_RAW: &str = "__issue_date_raw";

/// Raw columns the loader refuses to run without.
pub const REQUIRED_RAW_COLUMNS: [&str; 2] = [SUMMONS_NUMBER, ISSUE_DATE];

/// Fields that must be non-null in the finalized table.
pub const CRITICAL_FIELDS: [&str; 3] = [SUMMONS_NUMBER, ISSUE_DATE, COUNTY];

/// Days between 0001-01-01 (CE day 1) and 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

pub fn has_column(df: &DataFrame, name: &str) -> bool {
    df.get_column_names().iter().any(|c| c.as_str() == name)
}

/// Read a column as text, one entry per row.
///
/// Any dtype is accepted and cast to String. A missing column yields all `None`.
pub fn text_values(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let Ok(column) = df.column(name) else {
        return Ok(vec![None; df.height()]);
    };

    let as_text = column.cast(&DataType::String)?;
    let values = as_text
        .str()?
        .into_iter()
        .map(|v| v.map(str::to_string))
        .collect();

    Ok(values)
}

/// Read an integer column. A missing column yields all `None`.
pub fn int_values(df: &DataFrame, name: &str) -> Result<Vec<Option<i64>>> {
    let Ok(column) = df.column(name) else {
        return Ok(vec![None; df.height()]);
    };

    let as_int = column.cast(&DataType::Int64)?;
    Ok(as_int.i64()?.into_iter().collect())
}

/// Read a Date column back into chrono dates.
pub fn date_values(df: &DataFrame, name: &str) -> Result<Vec<Option<NaiveDate>>> {
    let Ok(column) = df.column(name) else {
        return Ok(vec![None; df.height()]);
    };

    let days = column.cast(&DataType::Int32)?;
    let values = days
        .i32()?
        .into_iter()
        .map(|d| d.and_then(date_from_epoch_days))
        .collect();

    Ok(values)
}

/// Build a polars Date column from chrono dates.
pub fn date_column(name: &str, dates: &[Option<NaiveDate>]) -> Result<Column> {
    let days: Vec<Option<i32>> = dates.iter().map(|d| d.map(epoch_days)).collect();
    let column = Column::new(name.into(), days).cast(&DataType::Date)?;
    Ok(column)
}

/// Load-order index of every row currently in the table.
pub fn row_indices(df: &DataFrame) -> Result<Vec<usize>> {
    let Ok(column) = df.column(ROW_INDEX) else {
        return Ok((0..df.height()).collect());
    };

    let as_u64 = column.cast(&DataType::UInt64)?;
    let indices = as_u64
        .u64()?
        .into_iter()
        .enumerate()
        .map(|(pos, v)| v.map(|i| i as usize).unwrap_or(pos))
        .collect();

    Ok(indices)
}

/// Trimmed text, with blank values treated as missing.
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

fn epoch_days(date: NaiveDate) -> i32 {
    date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE
}

fn date_from_epoch_days(days: i32) -> Option<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt(days.checked_add(UNIX_EPOCH_DAYS_FROM_CE)?)
}
