//! Pipeline context threaded through every stage
//!
//! A run owns one `PipelineContext`: the working table, the cleaning report
//! counters and the removal log. Each stage takes the context by value and
//! hands back the updated one, so stages can be exercised in isolation.

use std::fmt;

use anyhow::Result;
use polars::prelude::*;
use serde::Serialize;

use super::columns::{
    has_column, row_indices, text_values, ISSUE_DATE, ISSUE_DATE_RAW, ROW_INDEX, SUMMONS_NUMBER,
};

/// The mutating stages, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    DateNormalization,
    CategoricalNormalization,
    NumericNormalization,
    Deduplication,
    FeatureDerivation,
    Finalization,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::DateNormalization => "date_normalization",
            Stage::CategoricalNormalization => "categorical_normalization",
            Stage::NumericNormalization => "numeric_normalization",
            Stage::Deduplication => "deduplication",
            Stage::FeatureDerivation => "feature_derivation",
            Stage::Finalization => "finalization",
        }
    }

    /// Human-readable step title for the CLI
    pub fn title(&self) -> &'static str {
        match self {
            Stage::DateNormalization => "Dates and Times",
            Stage::CategoricalNormalization => "Categorical Fields",
            Stage::NumericNormalization => "Numeric Fields",
            Stage::Deduplication => "Duplicate Removal",
            Stage::FeatureDerivation => "Derived Features",
            Stage::Finalization => "Finalize",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One dropped row. Created once and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RemovedRow {
    pub original_index: usize,
    pub summons_number: Option<String>,
    pub original_issue_date: Option<String>,
    pub reason: String,
    pub stage: Stage,
}

/// Counters for one pipeline run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CleaningReport {
    pub initial_records: usize,
    pub final_records: usize,
    pub duplicates_removed: usize,
    pub invalid_dates_removed: usize,
    /// Rows dropped by the finalizer for null critical fields
    pub finalize_removed: usize,
    /// Rows whose `violation_time` was present but unparseable
    pub unparsed_times: usize,
    /// Rows whose `state` resolved to the UNKNOWN sentinel
    pub unknown_states: usize,
    /// Rows where `reduction_amount` exceeds `fine_amount`
    pub net_fine_anomalies: usize,
}

impl CleaningReport {
    pub fn new(initial_records: usize) -> Self {
        Self {
            initial_records,
            final_records: initial_records,
            ..Default::default()
        }
    }

    pub fn total_removed(&self) -> usize {
        self.duplicates_removed + self.invalid_dates_removed + self.finalize_removed
    }

    /// Fraction of loaded rows that survived. Zero when nothing was loaded.
    pub fn retention_rate(&self) -> f64 {
        if self.initial_records == 0 {
            0.0
        } else {
            self.final_records as f64 / self.initial_records as f64
        }
    }

    /// Check the counters add up and agree with the removal log.
    pub fn reconciles(&self, removals: &[RemovedRow]) -> bool {
        self.final_records + self.total_removed() == self.initial_records
            && removals.len() == self.total_removed()
    }
}

/// Working state for one run
#[derive(Debug, Clone)]
pub struct PipelineContext {
    pub table: DataFrame,
    pub report: CleaningReport,
    pub removals: Vec<RemovedRow>,
}

impl PipelineContext {
    /// Wrap a freshly loaded table, tagging each row with its load position.
    pub fn new(mut table: DataFrame) -> Result<Self> {
        let height = table.height();
        let positions: Vec<u32> = (0..height as u32).collect();
        table.with_column(Column::new(ROW_INDEX.into(), positions))?;

        Ok(Self {
            table,
            report: CleaningReport::new(height),
            removals: Vec::new(),
        })
    }

    /// Drop every row whose `keep` entry is false, logging each one.
    ///
    /// `reason` receives the row position in the current table.
    pub fn remove_rows<F>(mut self, keep: &[bool], stage: Stage, reason: F) -> Result<Self>
    where
        F: Fn(usize) -> String,
    {
        if keep.iter().all(|k| *k) {
            return Ok(self);
        }

        let indices = row_indices(&self.table)?;
        let summons = text_values(&self.table, SUMMONS_NUMBER)?;
        let issue_dates = if has_column(&self.table, ISSUE_DATE_RAW) {
            text_values(&self.table, ISSUE_DATE_RAW)?
        } else {
            text_values(&self.table, ISSUE_DATE)?
        };

        for (pos, kept) in keep.iter().enumerate() {
            if !kept {
                self.removals.push(RemovedRow {
                    original_index: indices[pos],
                    summons_number: summons[pos].clone(),
                    original_issue_date: issue_dates[pos].clone(),
                    reason: reason(pos),
                    stage,
                });
            }
        }

        let mask = BooleanChunked::from_slice("keep".into(), keep);
        self.table = self.table.filter(&mask)?;
        self.report.final_records = self.table.height();

        Ok(self)
    }

    pub fn removed_in(&self, stage: Stage) -> usize {
        self.removals.iter().filter(|r| r.stage == stage).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_context() -> PipelineContext {
        let df = df! {
            "summons_number" => ["1", "2", "3"],
            "issue_date" => ["2024-01-05", "bad", "2024-01-07"],
        }
        .unwrap();
        PipelineContext::new(df).unwrap()
    }

    #[test]
    fn test_new_records_initial_count() {
        let ctx = sample_context();
        assert_eq!(ctx.report.initial_records, 3);
        assert_eq!(ctx.report.final_records, 3);
        assert!(ctx.removals.is_empty());
    }

    #[test]
    fn test_remove_rows_logs_and_filters() {
        let ctx = sample_context();
        let ctx = ctx
            .remove_rows(&[true, false, true], Stage::DateNormalization, |_| {
                "invalid issue_date".to_string()
            })
            .unwrap();

        assert_eq!(ctx.table.height(), 2);
        assert_eq!(ctx.removals.len(), 1);
        let removed = &ctx.removals[0];
        assert_eq!(removed.original_index, 1);
        assert_eq!(removed.summons_number.as_deref(), Some("2"));
        assert_eq!(removed.original_issue_date.as_deref(), Some("bad"));
        assert_eq!(removed.stage, Stage::DateNormalization);
    }

    #[test]
    fn test_original_index_survives_earlier_filtering() {
        let ctx = sample_context()
            .remove_rows(&[false, true, true], Stage::DateNormalization, |_| "x".into())
            .unwrap()
            .remove_rows(&[true, false], Stage::Deduplication, |_| "y".into())
            .unwrap();

        assert_eq!(ctx.removals[1].original_index, 2);
        assert_eq!(ctx.removed_in(Stage::Deduplication), 1);
    }

    #[test]
    fn test_retention_rate_empty() {
        let report = CleaningReport::default();
        assert_eq!(report.retention_rate(), 0.0);
    }
}
