//! Monetary field coercion and fine classification

use anyhow::Result;
use polars::prelude::*;

use super::columns::{FINE_AMOUNT, FINE_AMOUNT_FLAG, NET_FINE, REDUCTION_AMOUNT};
use super::config::CleaningConfig;
use super::context::PipelineContext;

/// Audit classification of `fine_amount`. Never causes removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FineFlag {
    Normal,
    Zero,
    Negative,
    High,
}

impl FineFlag {
    pub fn classify(amount: f64, high_threshold: f64) -> Self {
        if amount > high_threshold {
            FineFlag::High
        } else if amount < 0.0 {
            FineFlag::Negative
        } else if amount == 0.0 {
            FineFlag::Zero
        } else {
            FineFlag::Normal
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FineFlag::Normal => "normal",
            FineFlag::Zero => "zero",
            FineFlag::Negative => "negative",
            FineFlag::High => "high",
        }
    }
}

/// Lenient number parse: surrounding whitespace is ignored, non-finite is missing.
pub fn parse_amount(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Coerce a column to amounts. Numeric dtypes are cast, text is parsed.
pub fn amount_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let Ok(column) = df.column(name) else {
        return Ok(vec![None; df.height()]);
    };

    if column.dtype().is_primitive_numeric() {
        let as_float = column.cast(&DataType::Float64)?;
        return Ok(as_float
            .f64()?
            .into_iter()
            .map(|v| v.filter(|v| v.is_finite()))
            .collect());
    }

    let as_text = column.cast(&DataType::String)?;
    Ok(as_text
        .str()?
        .into_iter()
        .map(|v| v.and_then(parse_amount))
        .collect())
}

/// Numeric Normalizer stage.
///
/// `fine_amount` stays missing when unparseable; `reduction_amount` defaults
/// to 0 so `net_fine` is only missing when the fine itself is. A missing fine
/// is flagged `normal`: none of the other flags can be shown to hold.
pub fn normalize_numerics(mut ctx: PipelineContext, config: &CleaningConfig) -> Result<PipelineContext> {
    let fines = amount_values(&ctx.table, FINE_AMOUNT)?;
    let reductions: Vec<f64> = amount_values(&ctx.table, REDUCTION_AMOUNT)?
        .into_iter()
        .map(|r| r.unwrap_or(0.0))
        .collect();

    let flags: Vec<&str> = fines
        .iter()
        .map(|f| {
            f.map_or(FineFlag::Normal, |f| {
                FineFlag::classify(f, config.high_fine_threshold)
            })
            .as_str()
        })
        .collect();

    let net_fines: Vec<Option<f64>> = fines
        .iter()
        .zip(&reductions)
        .map(|(fine, reduction)| fine.map(|f| f - reduction))
        .collect();

    let unparsed_fines = fines.iter().filter(|f| f.is_none()).count();
    let negative_net = net_fines.iter().filter(|n| n.is_some_and(|n| n < 0.0)).count();
    let flagged = flags
        .iter()
        .filter(|f| **f != FineFlag::Normal.as_str())
        .count();

    if unparsed_fines > 0 {
        log::info!("{} fine amounts missing or unparseable", unparsed_fines);
    }
    if flagged > 0 {
        log::info!("{} fine amounts flagged as zero, negative or high", flagged);
    }
    if negative_net > 0 {
        log::warn!(
            "{} records have reduction_amount greater than fine_amount (negative net_fine kept)",
            negative_net
        );
    }

    for column in [
        Column::new(FINE_AMOUNT.into(), fines),
        Column::new(FINE_AMOUNT_FLAG.into(), flags),
        Column::new(REDUCTION_AMOUNT.into(), reductions),
        Column::new(NET_FINE.into(), net_fines),
    ] {
        ctx.table.with_column(column)?;
    }

    ctx.report.net_fine_anomalies += negative_net;
    Ok(ctx)
}
