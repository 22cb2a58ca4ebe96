//! Issue date and violation time normalization
//!
//! `issue_date` is a structural field: a row whose date cannot be parsed is
//! removed. `violation_time` is partial information: a bad time only blanks
//! the derived time columns.
//!
//! Violation times arrive in two encodings of the same moment, `HHmmA` and
//! `HH:mmA` (meridiem letter `A`/`P`, any case). A value without a meridiem
//! letter is taken as already being on the 24-hour clock.

use std::fmt;

use anyhow::Result;
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use polars::prelude::*;

use super::columns::{
    date_column, text_values, DAY, DAY_OF_WEEK, ISSUE_DATE, ISSUE_DATE_RAW, MONTH, MONTH_NAME,
    TIME_OF_DAY, VIOLATION_HOUR, VIOLATION_TIME, VIOLATION_TIME_PARSED, WEEK_OF_YEAR, YEAR,
};
use super::config::CleaningConfig;
use super::context::{PipelineContext, Stage};

pub const INVALID_ISSUE_DATE_REASON: &str = "invalid issue_date";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Meridiem {
    Am,
    Pm,
}

/// A violation time on the 24-hour clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViolationTime {
    pub hour: u32,
    pub minute: u32,
}

impl ViolationTime {
    /// Parse `HHmmA`, `HH:mmA` or bare 24-hour digits.
    ///
    /// Returns `None` for anything malformed or out of range.
    pub fn parse(raw: &str) -> Option<Self> {
        let value = raw.trim();
        if value.is_empty() || !value.is_ascii() {
            return None;
        }

        let (digits, meridiem) = match value.as_bytes()[value.len() - 1].to_ascii_uppercase() {
            b'A' => (&value[..value.len() - 1], Some(Meridiem::Am)),
            b'P' => (&value[..value.len() - 1], Some(Meridiem::Pm)),
            _ => (value, None),
        };

        let (mut hour, minute) = if let Some((h, m)) = digits.split_once(':') {
            (parse_component(h)?, parse_component(m)?)
        } else {
            if digits.trim().is_empty() {
                return None;
            }
            let padded = format!("{:0>4}", digits);
            (parse_component(&padded[..2])?, parse_component(&padded[2..4])?)
        };

        match meridiem {
            Some(Meridiem::Pm) if hour != 12 => hour += 12,
            Some(Meridiem::Am) if hour == 12 => hour = 0,
            _ => {}
        }

        if hour > 23 || minute > 59 {
            return None;
        }

        Some(Self { hour, minute })
    }
}

impl fmt::Display for ViolationTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

fn parse_component(text: &str) -> Option<u32> {
    let text = text.trim();
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

/// Coarse time-of-day bucket derived from `violation_hour`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
    Night,
    Unknown,
}

impl TimeOfDay {
    /// Morning [5,12), Afternoon [12,17), Evening [17,21), Night otherwise.
    pub fn from_hour(hour: Option<u32>) -> Self {
        match hour {
            None => TimeOfDay::Unknown,
            Some(5..=11) => TimeOfDay::Morning,
            Some(12..=16) => TimeOfDay::Afternoon,
            Some(17..=20) => TimeOfDay::Evening,
            Some(_) => TimeOfDay::Night,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeOfDay::Morning => "Morning",
            TimeOfDay::Afternoon => "Afternoon",
            TimeOfDay::Evening => "Evening",
            TimeOfDay::Night => "Night",
            TimeOfDay::Unknown => "Unknown",
        }
    }
}

/// Earliest year accepted for an issue date. chrono's `%Y` also matches a
/// two-digit year, so "01/05/24" would otherwise come back as year 24.
const MIN_ISSUE_YEAR: i32 = 1000;

/// Parse a free-text issue date against the accepted formats, in order.
///
/// RFC 3339 timestamps with an offset are accepted as a last resort and
/// keep the calendar date as written.
pub fn parse_issue_date(raw: &str, formats: &[String]) -> Option<NaiveDate> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }

    formats
        .iter()
        .find_map(|format| {
            NaiveDate::parse_from_str(value, format)
                .ok()
                .or_else(|| {
                    NaiveDateTime::parse_from_str(value, format)
                        .ok()
                        .map(|dt| dt.date())
                })
                .filter(|date| date.year() >= MIN_ISSUE_YEAR)
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.date_naive())
                .filter(|date| date.year() >= MIN_ISSUE_YEAR)
        })
}

/// Date/Time Normalizer stage.
///
/// Replaces `issue_date` with a Date column, adds the calendar parts and the
/// parsed time columns, then removes rows whose date did not parse.
pub fn normalize_dates(mut ctx: PipelineContext, config: &CleaningConfig) -> Result<PipelineContext> {
    let raw_dates = text_values(&ctx.table, ISSUE_DATE)?;
    let dates: Vec<Option<NaiveDate>> = raw_dates
        .iter()
        .map(|raw| {
            raw.as_deref()
                .and_then(|s| parse_issue_date(s, &config.date_formats))
        })
        .collect();

    let raw_times = text_values(&ctx.table, VIOLATION_TIME)?;
    let times: Vec<Option<ViolationTime>> = raw_times
        .iter()
        .map(|raw| raw.as_deref().and_then(ViolationTime::parse))
        .collect();

    let unparsed_times = raw_times
        .iter()
        .zip(&times)
        .filter(|(raw, parsed)| {
            raw.as_deref().is_some_and(|s| !s.trim().is_empty()) && parsed.is_none()
        })
        .count();

    let columns = vec![
        Column::new(ISSUE_DATE_RAW.into(), raw_dates.clone()),
        date_column(ISSUE_DATE, &dates)?,
        Column::new(
            YEAR.into(),
            dates.iter().map(|d| d.map(|d| d.year())).collect::<Vec<_>>(),
        ),
        Column::new(
            MONTH.into(),
            dates.iter().map(|d| d.map(|d| d.month() as i32)).collect::<Vec<_>>(),
        ),
        Column::new(
            MONTH_NAME.into(),
            dates
                .iter()
                .map(|d| d.map(|d| d.format("%B").to_string()))
                .collect::<Vec<_>>(),
        ),
        Column::new(
            DAY.into(),
            dates.iter().map(|d| d.map(|d| d.day() as i32)).collect::<Vec<_>>(),
        ),
        Column::new(
            DAY_OF_WEEK.into(),
            dates
                .iter()
                .map(|d| d.map(|d| d.format("%A").to_string()))
                .collect::<Vec<_>>(),
        ),
        Column::new(
            WEEK_OF_YEAR.into(),
            dates
                .iter()
                .map(|d| d.map(|d| d.iso_week().week() as i32))
                .collect::<Vec<_>>(),
        ),
        Column::new(VIOLATION_TIME.into(), raw_times),
        Column::new(
            VIOLATION_TIME_PARSED.into(),
            times.iter().map(|t| t.map(|t| t.to_string())).collect::<Vec<_>>(),
        ),
        Column::new(
            VIOLATION_HOUR.into(),
            times.iter().map(|t| t.map(|t| t.hour as i32)).collect::<Vec<_>>(),
        ),
        Column::new(
            TIME_OF_DAY.into(),
            times
                .iter()
                .map(|t| TimeOfDay::from_hour(t.map(|t| t.hour)).as_str())
                .collect::<Vec<_>>(),
        ),
    ];

    for column in columns {
        ctx.table.with_column(column)?;
    }

    let keep: Vec<bool> = dates.iter().map(Option::is_some).collect();
    let invalid = keep.iter().filter(|k| !**k).count();
    if invalid > 0 {
        log::info!("Found {} invalid issue dates - removing", invalid);
    }

    let mut ctx = ctx.remove_rows(&keep, Stage::DateNormalization, |_| {
        INVALID_ISSUE_DATE_REASON.to_string()
    })?;
    ctx.report.invalid_dates_removed += invalid;
    ctx.report.unparsed_times += unparsed_times;

    log::debug!(
        "Parsed {} violation times, {} unparseable",
        times.iter().filter(|t| t.is_some()).count(),
        unparsed_times
    );

    Ok(ctx)
}
