//! Tests for issue date and violation time normalization

use chrono::{Datelike, NaiveDate};
use parkclean::pipeline::*;
use polars::prelude::*;

#[path = "common/mod.rs"]
mod common;

use common::*;

fn formats() -> Vec<String> {
    CleaningConfig::default().date_formats
}

#[test]
fn test_issue_date_formats() {
    let expected = NaiveDate::from_ymd_opt(2024, 3, 15);
    for raw in [
        "2024-03-15",
        "03/15/2024",
        "2024-03-15T00:00:00.000",
        "2024-03-15 08:30:00",
        "03/15/2024 12:00:00 AM",
        " 2024/03/15 ",
        "03/15/24",
        "2024-03-15T00:00:00.000Z",
        "2024-03-15T00:00:00Z",
        "2024-03-15T23:10:00+02:00",
    ] {
        assert_eq!(parse_issue_date(raw, &formats()), expected, "{}", raw);
    }
}

#[test]
fn test_two_digit_year_is_not_read_as_first_century() {
    let parsed = parse_issue_date("01/05/24", &formats()).unwrap();
    assert_eq!(parsed.year(), 2024);
    assert_eq!(parse_issue_date("0024-01-05", &formats()), None);
}

#[test]
fn test_issue_date_rejects_garbage() {
    for raw in ["not-a-date", "", "2024-02-30", "13/01/2024", "2024"] {
        assert_eq!(parse_issue_date(raw, &formats()), None, "{}", raw);
    }
}

#[test]
fn test_violation_time_encodings_agree() {
    for (compact, colon) in [("0830A", "08:30A"), ("1145P", "11:45P"), ("1200A", "12:00a")] {
        assert_eq!(ViolationTime::parse(compact), ViolationTime::parse(colon));
    }
}

#[test]
fn test_violation_time_meridiem_boundaries() {
    let hour = |raw: &str| ViolationTime::parse(raw).map(|t| t.hour);
    assert_eq!(hour("1200A"), Some(0));
    assert_eq!(hour("1259P"), Some(12));
    assert_eq!(hour("0100P"), Some(13));
    assert_eq!(hour("1159P"), Some(23));
    assert_eq!(hour("1530"), Some(15));
}

#[test]
fn test_violation_time_rejects_malformed() {
    for raw in ["", "A", "25XXP", "1275A", "ab:cdP", "1300P", "9999"] {
        assert_eq!(ViolationTime::parse(raw), None, "{}", raw);
    }
}

#[test]
fn test_time_of_day_buckets() {
    assert_eq!(TimeOfDay::from_hour(Some(4)), TimeOfDay::Night);
    assert_eq!(TimeOfDay::from_hour(Some(5)), TimeOfDay::Morning);
    assert_eq!(TimeOfDay::from_hour(Some(12)), TimeOfDay::Afternoon);
    assert_eq!(TimeOfDay::from_hour(Some(17)), TimeOfDay::Evening);
    assert_eq!(TimeOfDay::from_hour(Some(21)), TimeOfDay::Night);
    assert_eq!(TimeOfDay::from_hour(None), TimeOfDay::Unknown);
}

#[test]
fn test_single_valid_row_gains_calendar_columns() {
    let ctx = PipelineContext::new(create_single_citation("2024-01-06")).unwrap();
    let ctx = normalize_dates(ctx, &CleaningConfig::default()).unwrap();

    assert_eq!(ctx.table.height(), 1);
    assert!(ctx.removals.is_empty());
    assert_eq!(column_text(&ctx.table, "month_name")[0].as_deref(), Some("January"));
    assert_eq!(column_text(&ctx.table, "day_of_week")[0].as_deref(), Some("Saturday"));
    assert_eq!(column_text(&ctx.table, "week_of_year")[0].as_deref(), Some("1"));
    // No violation_time column at all: time columns exist but are empty
    assert_eq!(column_text(&ctx.table, "time_of_day")[0].as_deref(), Some("Unknown"));
    assert_eq!(ctx.report.unparsed_times, 0);
}

#[test]
fn test_single_invalid_row_removed() {
    let ctx = PipelineContext::new(create_single_citation("not-a-date")).unwrap();
    let ctx = normalize_dates(ctx, &CleaningConfig::default()).unwrap();

    assert_eq!(ctx.table.height(), 0);
    assert_eq!(ctx.report.invalid_dates_removed, 1);
    assert_eq!(ctx.report.final_records, 0);
    assert_eq!(ctx.removals.len(), 1);
    assert_eq!(ctx.removals[0].reason, "invalid issue_date");
    assert_eq!(ctx.removals[0].stage, Stage::DateNormalization);
}

#[test]
fn test_bad_time_does_not_remove_row() {
    let df = df! {
        "summons_number" => ["1", "2"],
        "issue_date" => ["2024-01-05", "2024-01-05"],
        "violation_time" => ["99:99P", "0830A"],
    }
    .unwrap();

    let ctx = normalize_dates(PipelineContext::new(df).unwrap(), &CleaningConfig::default()).unwrap();

    assert_eq!(ctx.table.height(), 2);
    assert_eq!(ctx.report.unparsed_times, 1);
    let hours = ctx.table.column("violation_hour").unwrap();
    assert_eq!(hours.null_count(), 1);
}
