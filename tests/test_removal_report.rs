//! Tests for removal report construction and export

use parkclean::pipeline::*;
use parkclean::report::{export_removal_report, RemovalReport, RemovalReportMetadata};
use std::path::Path;
use tempfile::TempDir;

#[path = "common/mod.rs"]
mod common;

use common::*;

#[test]
fn test_report_from_pipeline_run() {
    let ctx = run_pipeline(create_raw_citations(), &CleaningConfig::default()).unwrap();
    let report = RemovalReport::build(&ctx.report, &ctx.removals);

    assert_eq!(report.total_removed, 3);
    assert!(report.reconciled);

    let stages: Vec<&str> = report.by_stage.iter().map(|g| g.key.as_str()).collect();
    assert_eq!(stages, vec!["date_normalization", "deduplication", "finalization"]);

    let total_pct: f64 = report.by_reason.iter().map(|g| g.percentage).sum();
    assert!((total_pct - 100.0).abs() < 1e-9);
}

#[test]
fn test_export_writes_metadata_and_rows() {
    let config = CleaningConfig::default();
    let ctx = run_pipeline(create_raw_citations(), &config).unwrap();
    let report = RemovalReport::build(&ctx.report, &ctx.removals);

    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("removal_report.json");
    let metadata = RemovalReportMetadata::new(Path::new("in.csv"), Path::new("out.csv"), &config);

    export_removal_report(&report, &ctx.removals, &metadata, &path).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();

    assert_eq!(json["metadata"]["input_file"], "in.csv");
    assert_eq!(json["metadata"]["config"]["mask_token"], "***");
    assert!(chrono::DateTime::parse_from_rfc3339(json["metadata"]["timestamp"].as_str().unwrap()).is_ok());
    assert_eq!(json["summary"]["cleaning"]["initial_records"], 7);
    assert_eq!(json["summary"]["total_removed"], 3);

    let rows = json["removed_rows"].as_array().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["stage"], "date_normalization");
    assert_eq!(rows[0]["original_issue_date"], "not-a-date");
}

#[test]
fn test_export_empty_report() {
    let cleaning = CleaningReport::new(2);
    let report = RemovalReport::build(&cleaning, &[]);

    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("empty.json");
    let metadata = RemovalReportMetadata::new(
        Path::new("in.csv"),
        Path::new("out.csv"),
        &CleaningConfig::default(),
    );

    export_removal_report(&report, &[], &metadata, &path).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json["removed_rows"].as_array().unwrap().len(), 0);
    assert_eq!(json["summary"]["reconciled"], true);
}
