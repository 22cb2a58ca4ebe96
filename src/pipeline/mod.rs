//! Pipeline module - the cleaning stages and their orchestration

pub mod categorical;
pub mod columns;
pub mod config;
pub mod context;
pub mod datetime;
pub mod dedup;
pub mod error;
pub mod features;
pub mod finalize;
pub mod loader;
pub mod numeric;
pub mod quality;
pub mod vocab;

pub use categorical::*;
pub use config::*;
pub use context::*;
pub use datetime::*;
pub use dedup::*;
pub use error::LoadError;
pub use features::*;
pub use finalize::*;
pub use loader::*;
pub use numeric::*;
pub use quality::*;

use anyhow::Result;
use polars::prelude::DataFrame;

/// Signature shared by every mutating stage
pub type StageFn = fn(PipelineContext, &CleaningConfig) -> Result<PipelineContext>;

/// The mutating stages in dependency order. The finalizer is always last.
pub fn stages() -> [(Stage, StageFn); 6] {
    [
        (Stage::DateNormalization, normalize_dates as StageFn),
        (Stage::CategoricalNormalization, normalize_categoricals as StageFn),
        (Stage::NumericNormalization, normalize_numerics as StageFn),
        (Stage::Deduplication, remove_duplicates as StageFn),
        (Stage::FeatureDerivation, derive_features as StageFn),
        (Stage::Finalization, finalize as StageFn),
    ]
}

/// Run every stage over a loaded table.
pub fn run_pipeline(table: DataFrame, config: &CleaningConfig) -> Result<PipelineContext> {
    let mut ctx = PipelineContext::new(table)?;
    for (stage, run) in stages() {
        log::debug!("Running stage {}", stage);
        ctx = run(ctx, config)?;
    }
    Ok(ctx)
}
