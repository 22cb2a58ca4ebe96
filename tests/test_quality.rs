//! Tests for the read-only quality assessment

use parkclean::pipeline::*;
use polars::prelude::*;

#[path = "common/mod.rs"]
mod common;

use common::*;

#[test]
fn test_assessment_does_not_mutate() {
    let df = create_raw_citations();
    let before = df.clone();

    let _ = assess_quality(&df, &CleaningConfig::default()).unwrap();

    assert!(df.equals_missing(&before));
}

#[test]
fn test_assessment_shape_and_duplicates() {
    let df = create_raw_citations();
    let assessment = assess_quality(&df, &CleaningConfig::default()).unwrap();

    assert_eq!(assessment.rows, 7);
    assert_eq!(assessment.columns, df.width());
    assert_eq!(assessment.duplicate_summons, 1);
    assert_eq!(assessment.dtypes.len(), df.width());
}

#[test]
fn test_missing_values_sorted_and_nonzero() {
    let df = df! {
        "summons_number" => [Some("1"), Some("2"), Some("3"), Some("4")],
        "issue_date" => [Some("2024-01-05"), None, None, Some("2024-01-05")],
        "county" => [Some("NY"), None, Some("K"), Some("Q")],
    }
    .unwrap();

    let assessment = assess_quality(&df, &CleaningConfig::default()).unwrap();

    let columns: Vec<&str> = assessment.missing.iter().map(|m| m.column.as_str()).collect();
    assert_eq!(columns, vec!["issue_date", "county"]);
    assert_eq!(assessment.missing[0].count, 2);
    assert!((assessment.missing[0].ratio - 0.5).abs() < 1e-9);
}

#[test]
fn test_cardinality_lists_small_vocabularies() {
    let df = create_raw_citations();
    let assessment = assess_quality(&df, &CleaningConfig::default()).unwrap();

    let license = assessment
        .cardinality
        .iter()
        .find(|c| c.column == "license_type")
        .unwrap();
    assert_eq!(license.unique, 3);
    let values = license.values.as_ref().unwrap();
    assert_eq!(values[0], ("PAS".to_string(), 5));
}

#[test]
fn test_cardinality_omits_large_vocabularies() {
    let states: Vec<String> = (0..12).map(|i| format!("S{}", i)).collect();
    let df = df! {
        "summons_number" => (0..12).map(|i| i.to_string()).collect::<Vec<_>>(),
        "issue_date" => vec!["2024-01-05"; 12],
        "state" => states,
    }
    .unwrap();

    let assessment = assess_quality(&df, &CleaningConfig::default()).unwrap();
    let state = &assessment.cardinality[0];
    assert_eq!(state.unique, 12);
    assert!(state.values.is_none());
}

#[test]
fn test_numeric_summary() {
    let df = create_raw_citations();
    let assessment = assess_quality(&df, &CleaningConfig::default()).unwrap();

    let fines = assessment
        .numeric
        .iter()
        .find(|n| n.column == "fine_amount")
        .unwrap();
    assert_eq!(fines.parsed, 7);
    assert_eq!(fines.unparsed, 0);
    assert_eq!(fines.min, Some(-20.0));
    assert_eq!(fines.max, Some(750.0));
    assert_eq!(fines.median, Some(65.0));
    assert_eq!(fines.negative, 1);
    assert_eq!(fines.high, 1);
    assert_eq!(fines.zero, 0);

    let reductions = assessment
        .numeric
        .iter()
        .find(|n| n.column == "reduction_amount")
        .unwrap();
    assert_eq!(reductions.unparsed, 1);
}
