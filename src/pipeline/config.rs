//! Cleaning configuration consumed by the stages

use serde::{Deserialize, Serialize};

use super::columns::CRITICAL_FIELDS;

/// Fines strictly above this amount are flagged `high`.
pub const DEFAULT_HIGH_FINE_THRESHOLD: f64 = 500.0;

/// Prefix placed in front of the last plate characters.
pub const DEFAULT_MASK_TOKEN: &str = "***";

/// Issue date layouts seen in the open-data exports, tried in order.
pub const DEFAULT_DATE_FORMATS: [&str; 11] = [
    "%Y-%m-%d",
    "%Y-%m-%dT%H:%M:%S%.fZ",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%m/%d/%Y",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%y",
    "%Y/%m/%d",
];

/// Settings for one cleaning run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CleaningConfig {
    /// `fine_amount` values above this are flagged `high`
    pub high_fine_threshold: f64,
    /// Token prepended to the retained plate suffix
    pub mask_token: String,
    /// Number of trailing plate characters kept after masking
    pub plate_suffix_len: usize,
    /// chrono format strings accepted for `issue_date`
    pub date_formats: Vec<String>,
}

impl Default for CleaningConfig {
    fn default() -> Self {
        Self {
            high_fine_threshold: DEFAULT_HIGH_FINE_THRESHOLD,
            mask_token: DEFAULT_MASK_TOKEN.to_string(),
            plate_suffix_len: 3,
            date_formats: DEFAULT_DATE_FORMATS.iter().map(|f| f.to_string()).collect(),
        }
    }
}

impl CleaningConfig {
    /// Fields the finalizer requires to be non-null. Fixed.
    pub fn critical_fields(&self) -> &'static [&'static str] {
        &CRITICAL_FIELDS
    }

    pub fn with_high_fine_threshold(mut self, threshold: f64) -> Self {
        self.high_fine_threshold = threshold;
        self
    }

    pub fn with_mask_token(mut self, token: impl Into<String>) -> Self {
        self.mask_token = token.into();
        self
    }
}
