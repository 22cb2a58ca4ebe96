//! Jurisdiction code standardization: state, county (borough), precinct
//!
//! No row is ever removed here. Unresolvable states fall back to the
//! `UNKNOWN` sentinel; unmapped counties pass through so the finalizer does
//! not lose rows over spelling.

use std::collections::HashMap;

use anyhow::Result;
use polars::prelude::*;

use super::columns::{non_blank, text_values, COUNTY, IS_NY_PLATE, PRECINCT, PRECINCT_NUMERIC, STATE};
use super::config::CleaningConfig;
use super::context::PipelineContext;
use super::numeric::parse_amount;
use super::vocab::{borough_for, is_valid_state, state_typo, UNKNOWN_STATE};

/// Resolve a registration state to a valid code or `UNKNOWN`.
///
/// Order: reject blank or purely numeric, exact match, typo table, reject
/// anything longer than 3, then retry a 3-character value on its first two
/// characters. The truncation step accepts some 3-letter garbage (e.g. `CAX`
/// becomes `CA`); that is a known limitation of the heuristic.
pub fn normalize_state(raw: Option<&str>) -> String {
    let Some(value) = raw.map(|s| s.trim().to_uppercase()) else {
        return UNKNOWN_STATE.to_string();
    };

    if value.is_empty() || value.chars().all(|c| c.is_ascii_digit()) {
        return UNKNOWN_STATE.to_string();
    }

    if is_valid_state(&value) {
        return value;
    }

    if let Some(state) = state_typo(&value) {
        return state.to_string();
    }

    if value.chars().count() == 3 {
        let prefix: String = value.chars().take(2).collect();
        if is_valid_state(&prefix) {
            return prefix;
        }
    }

    UNKNOWN_STATE.to_string()
}

/// Uppercase, trim and expand borough abbreviations.
///
/// Blank values become `None`; unknown names pass through unchanged.
pub fn normalize_county(raw: Option<&str>) -> Option<String> {
    let value = non_blank(raw)?.to_uppercase();
    match borough_for(&value) {
        Some(borough) => Some(borough.to_string()),
        None => Some(value),
    }
}

/// Trimmed display string and numeric parse of a precinct.
///
/// Only non-numeric text leaves the companion missing; fractional codes
/// are kept as written.
pub fn parse_precinct(raw: Option<&str>) -> (Option<String>, Option<f64>) {
    let Some(value) = non_blank(raw) else {
        return (None, None);
    };

    (Some(value.to_string()), parse_amount(value))
}

/// Categorical Normalizer stage.
pub fn normalize_categoricals(
    mut ctx: PipelineContext,
    _config: &CleaningConfig,
) -> Result<PipelineContext> {
    let states: Vec<String> = text_values(&ctx.table, STATE)?
        .iter()
        .map(|raw| normalize_state(raw.as_deref()))
        .collect();
    let unknown_states = states.iter().filter(|s| *s == UNKNOWN_STATE).count();
    let is_ny: Vec<bool> = states.iter().map(|s| s == "NY").collect();

    let counties: Vec<Option<String>> = text_values(&ctx.table, COUNTY)?
        .iter()
        .map(|raw| normalize_county(raw.as_deref()))
        .collect();

    let (precincts, precinct_numbers): (Vec<Option<String>>, Vec<Option<f64>>) =
        text_values(&ctx.table, PRECINCT)?
            .iter()
            .map(|raw| parse_precinct(raw.as_deref()))
            .unzip();

    if unknown_states > 0 {
        log::info!("{} plate states could not be resolved (UNKNOWN)", unknown_states);
    }
    log_distribution(COUNTY, counties.iter().map(|c| c.as_deref().unwrap_or("<missing>")));

    for column in [
        Column::new(STATE.into(), states),
        Column::new(IS_NY_PLATE.into(), is_ny),
        Column::new(COUNTY.into(), counties),
        Column::new(PRECINCT.into(), precincts),
        Column::new(PRECINCT_NUMERIC.into(), precinct_numbers),
    ] {
        ctx.table.with_column(column)?;
    }

    ctx.report.unknown_states += unknown_states;
    Ok(ctx)
}

fn log_distribution<'a>(label: &str, values: impl Iterator<Item = &'a str>) {
    if !log::log_enabled!(log::Level::Debug) {
        return;
    }

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for value in values {
        *counts.entry(value).or_default() += 1;
    }
    let mut counts: Vec<_> = counts.into_iter().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    for (value, count) in counts {
        log::debug!("{} {:15}: {}", label, value, count);
    }
}
