//! Cleaning summary report generation

use std::time::Duration;

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

use crate::pipeline::{CleaningReport, Stage};

/// Summary of one cleaning run, with step timings
#[derive(Debug, Default)]
pub struct CleaningSummary {
    pub report: CleaningReport,
    pub load_time: Option<Duration>,
    pub stage_times: Vec<(Stage, Duration)>,
    pub save_time: Option<Duration>,
}

impl CleaningSummary {
    pub fn new(report: CleaningReport) -> Self {
        Self {
            report,
            ..Default::default()
        }
    }

    pub fn set_report(&mut self, report: CleaningReport) {
        self.report = report;
    }

    pub fn set_load_time(&mut self, elapsed: Duration) {
        self.load_time = Some(elapsed);
    }

    pub fn add_stage_time(&mut self, stage: Stage, elapsed: Duration) {
        self.stage_times.push((stage, elapsed));
    }

    pub fn set_save_time(&mut self, elapsed: Duration) {
        self.save_time = Some(elapsed);
    }

    pub fn total_time(&self) -> Duration {
        self.load_time.unwrap_or_default()
            + self.stage_times.iter().map(|(_, d)| *d).sum::<Duration>()
            + self.save_time.unwrap_or_default()
    }

    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("📋").cyan(),
            style("CLEANING SUMMARY").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        let report = &self.report;
        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![
            Cell::new("📁 Initial Records"),
            Cell::new(report.initial_records),
        ]);
        table.add_row(vec![
            Cell::new("📅 Removed (Invalid Date)"),
            removal_cell(report.invalid_dates_removed),
        ]);
        table.add_row(vec![
            Cell::new("🔁 Removed (Duplicate)"),
            removal_cell(report.duplicates_removed),
        ]);
        table.add_row(vec![
            Cell::new("🕳️  Removed (Missing Critical)"),
            removal_cell(report.finalize_removed),
        ]);
        table.add_row(vec![
            Cell::new("✅ Final Records"),
            Cell::new(report.final_records)
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
        ]);

        let retention_pct = report.retention_rate() * 100.0;
        let color = if retention_pct >= 95.0 {
            Color::Green
        } else if retention_pct >= 80.0 {
            Color::Yellow
        } else {
            Color::Red
        };
        table.add_row(vec![
            Cell::new("📈 Retention"),
            Cell::new(format!("{:.2}%", retention_pct))
                .fg(color)
                .add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![
            Cell::new("⏰ Unparsed Times"),
            anomaly_cell(report.unparsed_times),
        ]);
        table.add_row(vec![
            Cell::new("🗺️  Unknown States"),
            anomaly_cell(report.unknown_states),
        ]);
        table.add_row(vec![
            Cell::new("💸 Negative Net Fines"),
            anomaly_cell(report.net_fine_anomalies),
        ]);

        for line in table.to_string().lines() {
            println!("    {}", line);
        }

        if !self.stage_times.is_empty() || self.load_time.is_some() {
            println!();
            println!(
                "    {} {}",
                style("⏱").cyan(),
                style("TIMINGS").white().bold()
            );
            println!("    {}", style("─".repeat(50)).dim());

            if let Some(load) = self.load_time {
                print_timing("load", load);
            }
            for (stage, elapsed) in &self.stage_times {
                print_timing(stage.as_str(), *elapsed);
            }
            if let Some(save) = self.save_time {
                print_timing("save", save);
            }
            print_timing("total", self.total_time());
        }
    }
}

fn removal_cell(count: usize) -> Cell {
    Cell::new(count).fg(if count == 0 { Color::White } else { Color::Red })
}

fn anomaly_cell(count: usize) -> Cell {
    Cell::new(count).fg(if count == 0 { Color::White } else { Color::Yellow })
}

fn print_timing(label: &str, elapsed: Duration) {
    println!(
        "      {:<28} {}",
        label,
        style(format!("{:.2}s", elapsed.as_secs_f64())).dim()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_time_sums_steps() {
        let mut summary = CleaningSummary::new(CleaningReport::new(3));
        summary.set_load_time(Duration::from_millis(100));
        summary.add_stage_time(Stage::DateNormalization, Duration::from_millis(50));
        summary.add_stage_time(Stage::Finalization, Duration::from_millis(25));
        summary.set_save_time(Duration::from_millis(10));

        assert_eq!(summary.total_time(), Duration::from_millis(185));
    }
}
