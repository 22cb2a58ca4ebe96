//! Removal report generation
//!
//! Breaks the removal log down by stage and by reason (count and share of all
//! removed rows) and exports the whole audit trail as JSON.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, CellAlignment, Color, Table};
use console::style;
use serde::Serialize;

use crate::pipeline::{CleaningConfig, CleaningReport, RemovedRow, Stage};

/// Count and share for one group of removed rows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RemovalGroup {
    pub key: String,
    pub count: usize,
    /// Percentage of all removed rows, 0 when nothing was removed
    pub percentage: f64,
}

/// Removal breakdown for one run
#[derive(Debug, Clone, Serialize)]
pub struct RemovalReport {
    pub cleaning: CleaningReport,
    pub retention_rate: f64,
    pub total_removed: usize,
    pub by_stage: Vec<RemovalGroup>,
    pub by_reason: Vec<RemovalGroup>,
    pub reconciled: bool,
}

impl RemovalReport {
    /// Build the breakdown. Read-only over the collected diagnostics.
    pub fn build(cleaning: &CleaningReport, removals: &[RemovedRow]) -> Self {
        let total = removals.len();

        let mut stages: BTreeMap<Stage, usize> = BTreeMap::new();
        let mut reasons: BTreeMap<&str, usize> = BTreeMap::new();
        for removed in removals {
            *stages.entry(removed.stage).or_default() += 1;
            *reasons.entry(removed.reason.as_str()).or_default() += 1;
        }

        let by_stage = stages
            .into_iter()
            .map(|(stage, count)| group(stage.as_str(), count, total))
            .collect();

        let mut by_reason: Vec<RemovalGroup> = reasons
            .into_iter()
            .map(|(reason, count)| group(reason, count, total))
            .collect();
        by_reason.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.key.cmp(&b.key)));

        Self {
            cleaning: cleaning.clone(),
            retention_rate: cleaning.retention_rate(),
            total_removed: total,
            by_stage,
            by_reason,
            reconciled: cleaning.reconciles(removals),
        }
    }

    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("🧾").cyan(),
            style("REMOVAL REPORT").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());

        if self.total_removed == 0 {
            println!();
            println!("      {}", style("No rows were removed").green());
            return;
        }

        print_groups("By Stage", "Stage", &self.by_stage);
        print_groups("By Reason", "Reason", &self.by_reason);

        if !self.reconciled {
            println!();
            println!(
                "    {} {}",
                style("⚠").yellow().bold(),
                style("Removal log does not reconcile with record counts").yellow()
            );
        }
    }
}

fn group(key: &str, count: usize, total: usize) -> RemovalGroup {
    let percentage = if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    };

    RemovalGroup {
        key: key.to_string(),
        count,
        percentage,
    }
}

fn print_groups(title: &str, header: &str, groups: &[RemovalGroup]) {
    println!();
    println!("      {}", style(title).yellow());

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new(header).add_attribute(Attribute::Bold),
        Cell::new("Rows").add_attribute(Attribute::Bold),
        Cell::new("Share").add_attribute(Attribute::Bold),
    ]);

    for g in groups {
        table.add_row(vec![
            Cell::new(&g.key),
            Cell::new(g.count)
                .fg(Color::Red)
                .set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.1}%", g.percentage)).set_alignment(CellAlignment::Right),
        ]);
    }

    for line in table.to_string().lines() {
        println!("      {}", line);
    }
}

/// Run metadata written alongside the breakdown
#[derive(Debug, Clone, Serialize)]
pub struct RemovalReportMetadata {
    pub timestamp: String,
    pub parkclean_version: String,
    pub input_file: String,
    pub output_file: String,
    pub config: CleaningConfig,
}

impl RemovalReportMetadata {
    pub fn new(input_file: &Path, output_file: &Path, config: &CleaningConfig) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            parkclean_version: env!("CARGO_PKG_VERSION").to_string(),
            input_file: input_file.display().to_string(),
            output_file: output_file.display().to_string(),
            config: config.clone(),
        }
    }
}

#[derive(Serialize)]
struct RemovalReportExport<'a> {
    metadata: &'a RemovalReportMetadata,
    summary: &'a RemovalReport,
    removed_rows: &'a [RemovedRow],
}

/// Export the removal breakdown and every removed row to a JSON file
pub fn export_removal_report(
    report: &RemovalReport,
    removals: &[RemovedRow],
    metadata: &RemovalReportMetadata,
    output_path: &Path,
) -> Result<()> {
    let export = RemovalReportExport {
        metadata,
        summary: report,
        removed_rows: removals,
    };

    let json = serde_json::to_string_pretty(&export)
        .context("Failed to serialize removal report to JSON")?;

    std::fs::write(output_path, json).with_context(|| {
        format!(
            "Failed to write removal report to {}",
            output_path.display()
        )
    })?;

    Ok(())
}
