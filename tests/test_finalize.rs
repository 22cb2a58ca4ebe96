//! Tests for critical-field enforcement

use parkclean::pipeline::*;
use polars::prelude::*;

#[path = "common/mod.rs"]
mod common;

use common::*;

#[test]
fn test_rows_with_null_critical_fields_removed() {
    let df = df! {
        "summons_number" => [Some("1"), None, Some("3"), Some("4")],
        "issue_date" => [Some("2024-01-05"), Some("2024-01-05"), None, Some("2024-01-05")],
        "county" => [Some("MANHATTAN"), None, Some("QUEENS"), Some("BRONX")],
    }
    .unwrap();

    let ctx = finalize(PipelineContext::new(df).unwrap(), &CleaningConfig::default()).unwrap();

    assert_eq!(ctx.table.height(), 2);
    assert_eq!(ctx.report.finalize_removed, 2);
    assert_eq!(ctx.report.final_records, 2);
    assert_eq!(
        ctx.removals[0].reason,
        "missing critical field(s): summons_number, county"
    );
    assert_eq!(ctx.removals[1].reason, "missing critical field(s): issue_date");
    assert!(ctx.report.reconciles(&ctx.removals));
}

#[test]
fn test_internal_columns_dropped() {
    let df = df! {
        "summons_number" => ["1"],
        "issue_date" => ["2024-01-05"],
        "county" => ["QUEENS"],
    }
    .unwrap();

    let ctx = finalize(PipelineContext::new(df).unwrap(), &CleaningConfig::default()).unwrap();

    assert_missing_columns(&ctx.table, &["__row_index"]);
    assert_eq!(ctx.report.retention_rate(), 1.0);
}

#[test]
fn test_everything_removed_gives_zero_retention() {
    let df = df! {
        "summons_number" => ["1", "2"],
        "issue_date" => ["bad", "worse"],
        "county" => ["NY", "K"],
    }
    .unwrap();

    let ctx = run_pipeline(df, &CleaningConfig::default()).unwrap();

    assert_eq!(ctx.table.height(), 0);
    assert_eq!(ctx.report.final_records, 0);
    assert_eq!(ctx.report.retention_rate(), 0.0);
    assert!(ctx.report.reconciles(&ctx.removals));
}
