//! Terminal styling for the cleaning run

use std::path::Path;
use std::time::Duration;

use console::{style, Emoji};

// Emoji icons with fallbacks for terminals that don't support them
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "[*] ");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "[!] ");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", ">> ");
pub static FOLDER: Emoji<'_, '_> = Emoji("📂 ", "");
pub static SAVE: Emoji<'_, '_> = Emoji("💾 ", "");
pub static RECEIPT: Emoji<'_, '_> = Emoji("🧾 ", "");
pub static MONEY: Emoji<'_, '_> = Emoji("💲 ", "");
pub static LOCK: Emoji<'_, '_> = Emoji("🔒 ", "");

/// Print the application banner
pub fn print_banner(version: &str) {
    let banner = r#"
     ___  ___  ___ _  __ ___ _    ___   _   _  _
    | _ \/ _ \| _ \ |/ // __| |  | __| /_\ | \| |
    |  _/ _ \ |   / ' <| (__| |__| _| / _ \| .` |
    |_|/_/ \_\|_|_\_|\_\\___|____|___/_/ \_\_|\_|
    "#;

    println!();
    println!("{}", style(banner).cyan().bold());
    println!(
        "    {}",
        style("Parking citation cleaning with a full removal audit").dim()
    );
    println!("    {}", style(format!("v{}", version)).dim());
    println!("    {}", style("━".repeat(50)).dim());
    println!();
}

/// Settings shown on the configuration card
pub struct RunSettings<'a> {
    pub input: &'a Path,
    pub output: &'a Path,
    pub report: Option<&'a Path>,
    pub high_fine_threshold: f64,
    pub mask_token: &'a str,
}

/// Print configuration card
pub fn print_config(settings: &RunSettings<'_>) {
    let box_width = 56;
    let line = "─".repeat(box_width - 2);
    let report = settings
        .report
        .map(|p| truncate_path(p, 38))
        .unwrap_or_else(|| "disabled".to_string());

    println!("    ┌{}┐", line);
    println!(
        "    │ {}{}│",
        style("⚙️  Configuration").cyan().bold(),
        " ".repeat(box_width - 20)
    );
    println!("    ├{}┤", line);
    println!(
        "    │  {} Input:  {:<39}│",
        FOLDER,
        truncate_path(settings.input, 38)
    );
    println!(
        "    │  {} Output: {:<39}│",
        SAVE,
        truncate_path(settings.output, 38)
    );
    println!("    │  {} Report: {:<39}│", RECEIPT, report);
    println!("    ├{}┤", line);
    println!(
        "    │  {} High fine threshold: {:<26}│",
        MONEY,
        style(format!("{:.2}", settings.high_fine_threshold)).yellow()
    );
    println!(
        "    │  {} Plate mask token:    {:<26}│",
        LOCK,
        style(truncate_string(settings.mask_token, 24)).yellow()
    );
    println!("    └{}┘", line);
    println!();
}

/// Print a step header with styling
pub fn print_step_header(step_num: usize, title: &str) {
    println!();
    println!(
        "    {} {} {}",
        style(format!("STEP {}", step_num)).cyan().bold(),
        style("│").dim(),
        style(title).white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("    {} {}", style("✓").green().bold(), style(message).green());
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("    {} {}", INFO, message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("    {} {}", WARN, style(message).yellow());
}

/// Print how long a step took
pub fn print_step_time(elapsed: Duration) {
    println!(
        "      {}",
        style(format!("({:.2}s)", elapsed.as_secs_f64())).dim()
    );
}

/// Print the final completion message
pub fn print_completion() {
    println!();
    println!(
        "    {} {}",
        ROCKET,
        style("Cleaning complete!").green().bold()
    );
    println!();
}

/// Print a styled count message
pub fn print_count(description: &str, count: usize, detail: Option<&str>) {
    if let Some(info) = detail {
        println!(
            "      Found {} {} {}",
            style(count).yellow().bold(),
            description,
            style(info).dim()
        );
    } else {
        println!(
            "      Found {} {}",
            style(count).yellow().bold(),
            description
        );
    }
}

fn truncate_path(path: &Path, max_len: usize) -> String {
    truncate_string(&path.display().to_string(), max_len)
}

fn truncate_string(s: &str, max_len: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= max_len {
        s.to_string()
    } else {
        let tail: String = chars[chars.len() - (max_len - 3)..].iter().collect();
        format!("...{}", tail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("short", 10), "short");
        assert_eq!(truncate_string("abcdefghijkl", 8), "...hijkl");
    }
}
