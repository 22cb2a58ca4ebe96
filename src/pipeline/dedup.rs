//! Natural-key deduplication

use std::collections::HashSet;

use anyhow::Result;
use polars::prelude::*;

use super::columns::{non_blank, text_values, SUMMONS_NUMBER};
use super::config::CleaningConfig;
use super::context::{PipelineContext, Stage};

pub const DUPLICATE_REASON: &str = "duplicate summons_number";

/// Canonical text form of the natural key; blank keys are missing.
///
/// All-digit keys lose their leading zeros so "0012" and "12" collide.
/// Anything else is compared as trimmed text.
pub fn normalize_summons_number(raw: Option<&str>) -> Option<String> {
    let key = non_blank(raw)?;
    if !key.bytes().all(|b| b.is_ascii_digit()) {
        return Some(key.to_string());
    }

    match key.trim_start_matches('0') {
        "" => Some("0".to_string()),
        digits => Some(digits.to_string()),
    }
}

/// Keep-first mask over a key column. Missing keys are always kept and left
/// to the finalizer.
pub fn first_occurrence_mask(keys: &[Option<String>]) -> Vec<bool> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(keys.len());
    keys.iter()
        .map(|key| match key {
            Some(key) => seen.insert(key.as_str()),
            None => true,
        })
        .collect()
}

/// Deduplicator stage. The first row in current order wins outright.
pub fn remove_duplicates(mut ctx: PipelineContext, _config: &CleaningConfig) -> Result<PipelineContext> {
    let keys: Vec<Option<String>> = text_values(&ctx.table, SUMMONS_NUMBER)?
        .iter()
        .map(|raw| normalize_summons_number(raw.as_deref()))
        .collect();
    let keep = first_occurrence_mask(&keys);
    let duplicates = keep.iter().filter(|k| !**k).count();

    ctx.table
        .with_column(Column::new(SUMMONS_NUMBER.into(), keys))?;

    if duplicates > 0 {
        log::info!(
            "Found {} duplicate summons numbers - keeping first occurrence",
            duplicates
        );
    } else {
        log::debug!("No duplicate summons numbers");
    }

    let mut ctx = ctx.remove_rows(&keep, Stage::Deduplication, |_| DUPLICATE_REASON.to_string())?;
    ctx.report.duplicates_removed += duplicates;
    Ok(ctx)
}
