//! Command-line argument definitions using clap

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::pipeline::{CleaningConfig, DEFAULT_MASK_TOKEN};

/// parkclean - Clean raw parking citation records into an analysis-ready table
#[derive(Parser, Debug)]
#[command(name = "parkclean")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Input file path (CSV or Parquet)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output file path (CSV or Parquet, determined by extension).
    /// Defaults to input directory with '_cleaned' suffix (e.g., citations.csv -> citations_cleaned.csv).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Removal report path (JSON).
    /// Defaults to input directory with '_removal_report.json' suffix.
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Do not write the removal report
    #[arg(long, default_value = "false")]
    pub no_report: bool,

    /// Fines strictly above this amount are flagged as high
    #[arg(long, default_value = "500", value_parser = validate_threshold)]
    pub high_fine_threshold: f64,

    /// Token placed before the visible suffix of a masked plate
    #[arg(long, default_value = DEFAULT_MASK_TOKEN)]
    pub mask_token: String,

    /// Skip the pre-cleaning quality assessment
    #[arg(long, default_value = "false")]
    pub skip_assessment: bool,

    /// Skip interactive confirmation prompts
    #[arg(long, default_value = "false")]
    pub no_confirm: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load a file and print its quality assessment without cleaning it
    Assess {
        /// Input file path (CSV or Parquet)
        input: PathBuf,
    },
}

impl Cli {
    pub fn input(&self) -> Option<&PathBuf> {
        self.input.as_ref()
    }

    /// Get the output path, deriving from input if not explicitly provided.
    pub fn output_path(&self) -> Option<PathBuf> {
        let input = self.input.as_ref()?;
        Some(self.output.clone().unwrap_or_else(|| {
            let extension = input
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or("csv");
            sibling_path(input, &format!("_cleaned.{}", extension))
        }))
    }

    /// Get the removal report path, or `None` when reporting is disabled.
    pub fn report_path(&self) -> Option<PathBuf> {
        if self.no_report {
            return None;
        }
        let input = self.input.as_ref()?;
        Some(
            self.report
                .clone()
                .unwrap_or_else(|| sibling_path(input, "_removal_report.json")),
        )
    }

    pub fn cleaning_config(&self) -> CleaningConfig {
        CleaningConfig::default()
            .with_high_fine_threshold(self.high_fine_threshold)
            .with_mask_token(self.mask_token.clone())
    }
}

fn sibling_path(input: &Path, suffix: &str) -> PathBuf {
    let parent = input.parent().unwrap_or_else(|| Path::new("."));
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    parent.join(format!("{}{}", stem, suffix))
}

/// Validator for high_fine_threshold parameter
fn validate_threshold(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;

    if !value.is_finite() || value < 0.0 {
        Err(format!(
            "high_fine_threshold must be a non-negative number, got {}",
            value
        ))
    } else {
        Ok(value)
    }
}
