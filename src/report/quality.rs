//! Quality assessment display

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, CellAlignment, Color, Table};
use console::style;

use crate::pipeline::QualityAssessment;

fn section(icon: &str, title: &str) {
    println!();
    println!("    {} {}", style(icon).cyan(), style(title).white().bold());
    println!("    {}", style("─".repeat(50)).dim());
}

fn print_indented(table: &Table) {
    for line in table.to_string().lines() {
        println!("      {}", line);
    }
}

fn format_amount(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.2}", v))
}

/// Print the pre-cleaning diagnostics
pub fn display_quality_assessment(assessment: &QualityAssessment) {
    section("🔍", "DATA QUALITY");
    println!(
        "      {} rows, {} columns",
        style(assessment.rows).yellow().bold(),
        style(assessment.columns).yellow().bold()
    );

    let dup_style = if assessment.duplicate_summons == 0 {
        style(assessment.duplicate_summons).green()
    } else {
        style(assessment.duplicate_summons).red()
    };
    println!("      Duplicate summons numbers: {}", dup_style.bold());

    if assessment.missing.is_empty() {
        println!("      {}", style("No missing values").green());
    } else {
        println!();
        println!("      {}", style("Missing Values").yellow());
        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Column").add_attribute(Attribute::Bold),
            Cell::new("Missing").add_attribute(Attribute::Bold),
            Cell::new("Ratio").add_attribute(Attribute::Bold),
        ]);
        for entry in &assessment.missing {
            let color = if entry.ratio > 0.3 {
                Color::Red
            } else if entry.ratio > 0.05 {
                Color::Yellow
            } else {
                Color::White
            };
            table.add_row(vec![
                Cell::new(&entry.column),
                Cell::new(entry.count).set_alignment(CellAlignment::Right),
                Cell::new(format!("{:.2}%", entry.ratio * 100.0))
                    .fg(color)
                    .set_alignment(CellAlignment::Right),
            ]);
        }
        print_indented(&table);
    }

    log::debug!("Column types: {:?}", assessment.dtypes);

    if !assessment.cardinality.is_empty() {
        section("🏷️ ", "CATEGORICAL FIELDS");
        for entry in &assessment.cardinality {
            println!();
            println!(
                "      {} {}",
                style(&entry.column).yellow(),
                style(format!("({} unique)", entry.unique)).dim()
            );
            if let Some(values) = &entry.values {
                for (value, count) in values {
                    println!("        {} {:<20} {}", style("•").dim(), value, count);
                }
            }
        }
    }

    if !assessment.numeric.is_empty() {
        section("💲", "MONETARY FIELDS");
        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(
            ["Column", "Parsed", "Unparsed", "Min", "Max", "Mean", "Median", "Zero", "Negative", "High"]
                .iter()
                .map(|h| Cell::new(h).add_attribute(Attribute::Bold))
                .collect::<Vec<_>>(),
        );
        for summary in &assessment.numeric {
            table.add_row(vec![
                Cell::new(&summary.column),
                Cell::new(summary.parsed),
                Cell::new(summary.unparsed),
                Cell::new(format_amount(summary.min)),
                Cell::new(format_amount(summary.max)),
                Cell::new(format_amount(summary.mean)),
                Cell::new(format_amount(summary.median)),
                Cell::new(summary.zero),
                Cell::new(summary.negative).fg(if summary.negative > 0 {
                    Color::Red
                } else {
                    Color::White
                }),
                Cell::new(summary.high).fg(if summary.high > 0 {
                    Color::Yellow
                } else {
                    Color::White
                }),
            ]);
        }
        print_indented(&table);
    }
}
