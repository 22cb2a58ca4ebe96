//! Derived convenience columns
//!
//! Purely additive apart from one privacy rule: the raw `plate` column is
//! dropped as soon as `plate_masked` exists.

use anyhow::Result;
use chrono::{Datelike, NaiveDate, Weekday};
use polars::prelude::*;

use super::columns::{
    date_values, has_column, int_values, text_values, ISSUE_DATE, IS_BUSINESS_HOURS, IS_WEEKEND,
    PLATE, PLATE_MASKED, QUARTER, VIOLATION_HOUR,
};
use super::config::CleaningConfig;
use super::context::PipelineContext;

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

pub fn quarter(date: NaiveDate) -> i32 {
    (date.month0() / 3 + 1) as i32
}

/// 09:00 through 17:59 counts as business hours; a missing hour does not.
pub fn is_business_hours(hour: Option<i64>) -> bool {
    hour.is_some_and(|h| (9..=17).contains(&h))
}

/// Mask token followed by the last `suffix_len` characters of the plate,
/// taken as stored (surrounding whitespace included).
pub fn mask_plate(plate: &str, token: &str, suffix_len: usize) -> String {
    let chars: Vec<char> = plate.chars().collect();
    let start = chars.len().saturating_sub(suffix_len);
    let suffix: String = chars[start..].iter().collect();
    format!("{}{}", token, suffix)
}

/// Feature Deriver stage.
///
/// `plate_masked` is only written when a raw `plate` column is present, so a
/// second pass over already-cleaned output leaves the masked values alone.
pub fn derive_features(mut ctx: PipelineContext, config: &CleaningConfig) -> Result<PipelineContext> {
    let dates = date_values(&ctx.table, ISSUE_DATE)?;
    let hours = int_values(&ctx.table, VIOLATION_HOUR)?;

    let weekend: Vec<Option<bool>> = dates.iter().map(|d| d.map(is_weekend)).collect();
    let quarters: Vec<Option<i32>> = dates.iter().map(|d| d.map(quarter)).collect();
    let business: Vec<bool> = hours.iter().map(|h| is_business_hours(*h)).collect();

    for column in [
        Column::new(IS_WEEKEND.into(), weekend),
        Column::new(QUARTER.into(), quarters),
        Column::new(IS_BUSINESS_HOURS.into(), business),
    ] {
        ctx.table.with_column(column)?;
    }

    if has_column(&ctx.table, PLATE) {
        let masked: Vec<Option<String>> = text_values(&ctx.table, PLATE)?
            .iter()
            .map(|p| {
                p.as_deref()
                    .map(|p| mask_plate(p, &config.mask_token, config.plate_suffix_len))
            })
            .collect();
        ctx.table
            .with_column(Column::new(PLATE_MASKED.into(), masked))?;
        ctx.table = ctx.table.drop(PLATE)?;
        log::debug!("Masked plates and dropped the raw plate column");
    }

    Ok(ctx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekend_and_quarter() {
        let saturday = NaiveDate::from_ymd_opt(2024, 1, 6).unwrap();
        let friday = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert!(is_weekend(saturday));
        assert!(!is_weekend(friday));
        assert_eq!(quarter(friday), 1);
        assert_eq!(quarter(NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()), 4);
        assert_eq!(quarter(NaiveDate::from_ymd_opt(2024, 7, 1).unwrap()), 3);
    }

    #[test]
    fn test_business_hours() {
        assert!(is_business_hours(Some(9)));
        assert!(is_business_hours(Some(17)));
        assert!(!is_business_hours(Some(8)));
        assert!(!is_business_hours(Some(18)));
        assert!(!is_business_hours(None));
    }

    #[test]
    fn test_mask_plate() {
        assert_eq!(mask_plate("ABC1234", "***", 3), "***234");
        assert_eq!(mask_plate(" XY ", "***", 3), "***XY ");
        assert_eq!(mask_plate(" AB12 ", "***", 3), "***12 ");
        assert_eq!(mask_plate("7", "***", 3), "***7");
        assert_eq!(mask_plate("ÄBCDÉ", "***", 3), "***CDÉ");
    }
}
