//! Read-only data quality assessment of the raw table

use std::collections::HashMap;

use anyhow::Result;
use polars::prelude::*;
use serde::Serialize;

use super::columns::{has_column, text_values, COUNTY, FINE_AMOUNT, REDUCTION_AMOUNT, STATE, SUMMONS_NUMBER};
use super::config::CleaningConfig;
use super::dedup::{first_occurrence_mask, normalize_summons_number};
use super::numeric::{amount_values, FineFlag};

/// Categorical fields whose cardinality is reported
pub const CATEGORICAL_FIELDS: [&str; 4] = [STATE, "license_type", COUNTY, "issuing_agency"];

/// Monetary fields summarized after lenient coercion
pub const NUMERIC_FIELDS: [&str; 2] = [FINE_AMOUNT, REDUCTION_AMOUNT];

/// Value counts are listed when a field has at most this many distinct values
pub const MAX_LISTED_CATEGORIES: usize = 10;

#[derive(Debug, Clone, Serialize)]
pub struct MissingValueEntry {
    pub column: String,
    pub count: usize,
    pub ratio: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CardinalityEntry {
    pub column: String,
    pub unique: usize,
    /// Value counts, most frequent first; only for low-cardinality fields
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<(String, usize)>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NumericFieldSummary {
    pub column: String,
    pub parsed: usize,
    pub unparsed: usize,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
    pub median: Option<f64>,
    pub zero: usize,
    pub negative: usize,
    pub high: usize,
}

/// Diagnostics collected before any stage runs
#[derive(Debug, Clone, Serialize)]
pub struct QualityAssessment {
    pub rows: usize,
    pub columns: usize,
    /// Columns with at least one missing value, most missing first
    pub missing: Vec<MissingValueEntry>,
    pub duplicate_summons: usize,
    pub dtypes: Vec<(String, String)>,
    pub cardinality: Vec<CardinalityEntry>,
    pub numeric: Vec<NumericFieldSummary>,
}

/// Missing count and ratio for every column, sorted by ratio descending.
pub fn analyze_missing_values(df: &DataFrame) -> Result<Vec<MissingValueEntry>> {
    if df.height() == 0 {
        return Ok(Vec::new());
    }

    let total = df.height() as f64;
    let mut entries: Vec<MissingValueEntry> = df
        .get_columns()
        .iter()
        .map(|column| {
            let count = column.null_count();
            MissingValueEntry {
                column: column.name().to_string(),
                count,
                ratio: count as f64 / total,
            }
        })
        .collect();

    entries.sort_by(|a, b| {
        b.ratio
            .partial_cmp(&a.ratio)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    Ok(entries)
}

/// Rows that would be discarded by keep-first deduplication on `summons_number`.
pub fn count_duplicate_keys(df: &DataFrame) -> Result<usize> {
    let keys: Vec<Option<String>> = text_values(df, SUMMONS_NUMBER)?
        .iter()
        .map(|raw| normalize_summons_number(raw.as_deref()))
        .collect();
    Ok(first_occurrence_mask(&keys).iter().filter(|k| !**k).count())
}

fn cardinality(df: &DataFrame, name: &str) -> Result<CardinalityEntry> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for value in text_values(df, name)?.into_iter().flatten() {
        *counts.entry(value).or_default() += 1;
    }

    let unique = counts.len();
    let values = (unique <= MAX_LISTED_CATEGORIES).then(|| {
        let mut values: Vec<(String, usize)> = counts.into_iter().collect();
        values.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        values
    });

    Ok(CardinalityEntry {
        column: name.to_string(),
        unique,
        values,
    })
}

fn summarize_amounts(df: &DataFrame, name: &str, high_threshold: f64) -> Result<NumericFieldSummary> {
    let raw = amount_values(df, name)?;
    let mut values: Vec<f64> = raw.iter().flatten().copied().collect();
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let count_flag = |flag: FineFlag| {
        values
            .iter()
            .filter(|v| FineFlag::classify(**v, high_threshold) == flag)
            .count()
    };

    let median = if values.is_empty() {
        None
    } else if values.len() % 2 == 1 {
        Some(values[values.len() / 2])
    } else {
        let mid = values.len() / 2;
        Some((values[mid - 1] + values[mid]) / 2.0)
    };

    Ok(NumericFieldSummary {
        column: name.to_string(),
        parsed: values.len(),
        unparsed: raw.len() - values.len(),
        min: values.first().copied(),
        max: values.last().copied(),
        mean: (!values.is_empty()).then(|| values.iter().sum::<f64>() / values.len() as f64),
        median,
        zero: count_flag(FineFlag::Zero),
        negative: count_flag(FineFlag::Negative),
        high: count_flag(FineFlag::High),
    })
}

/// Quality Assessor. Reads the table, never mutates it.
pub fn assess_quality(df: &DataFrame, config: &CleaningConfig) -> Result<QualityAssessment> {
    let missing = analyze_missing_values(df)?
        .into_iter()
        .filter(|entry| entry.count > 0)
        .collect();

    let dtypes = df
        .get_columns()
        .iter()
        .map(|c| (c.name().to_string(), c.dtype().to_string()))
        .collect();

    let cardinality = CATEGORICAL_FIELDS
        .iter()
        .filter(|name| has_column(df, name))
        .map(|name| cardinality(df, name))
        .collect::<Result<Vec<_>>>()?;

    let numeric = NUMERIC_FIELDS
        .iter()
        .filter(|name| has_column(df, name))
        .map(|name| summarize_amounts(df, name, config.high_fine_threshold))
        .collect::<Result<Vec<_>>>()?;

    Ok(QualityAssessment {
        rows: df.height(),
        columns: df.width(),
        missing,
        duplicate_summons: count_duplicate_keys(df)?,
        dtypes,
        cardinality,
        numeric,
    })
}
