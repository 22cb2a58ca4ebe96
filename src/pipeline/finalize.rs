//! Critical-field enforcement and retention statistics
//!
//! The finalizer is the single place that decides whether a row is usable:
//! any null in a critical field drops the row, whichever stage left it so.

use anyhow::Result;

use super::columns::{text_values, INTERNAL_PREFIX};
use super::config::CleaningConfig;
use super::context::{PipelineContext, Stage};

pub fn missing_fields_reason(fields: &[&str]) -> String {
    format!("missing critical field(s): {}", fields.join(", "))
}

/// Finalizer stage.
pub fn finalize(ctx: PipelineContext, config: &CleaningConfig) -> Result<PipelineContext> {
    let height = ctx.table.height();
    let mut missing: Vec<Vec<&str>> = vec![Vec::new(); height];

    for field in config.critical_fields() {
        for (pos, value) in text_values(&ctx.table, field)?.iter().enumerate() {
            if value.is_none() {
                missing[pos].push(*field);
            }
        }
    }

    let keep: Vec<bool> = missing.iter().map(Vec::is_empty).collect();
    let removed = keep.iter().filter(|k| !**k).count();
    if removed > 0 {
        log::info!("Removing {} records with missing critical fields", removed);
    }

    let mut ctx = ctx.remove_rows(&keep, Stage::Finalization, |pos| {
        missing_fields_reason(&missing[pos])
    })?;

    let internal: Vec<String> = ctx
        .table
        .get_column_names()
        .iter()
        .filter(|name| name.starts_with(INTERNAL_PREFIX))
        .map(|name| name.to_string())
        .collect();
    ctx.table = ctx.table.drop_many(internal);

    ctx.report.finalize_removed += removed;
    ctx.report.final_records = ctx.table.height();

    log::info!(
        "Retained {} of {} records ({:.2}%)",
        ctx.report.final_records,
        ctx.report.initial_records,
        ctx.report.retention_rate() * 100.0
    );

    Ok(ctx)
}
