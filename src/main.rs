//! parkclean: Parking Citation Cleaning CLI Tool
//!
//! Loads raw citation records, normalizes them through a fixed sequence of
//! stages and writes the cleaned table together with a removal report.

use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use console::style;

use parkclean::cli::{confirm_overwrite, Cli, Commands};
use parkclean::pipeline::{
    assess_quality, check_required_columns, load_dataset, save_dataset, stages, CleaningConfig,
    PipelineContext,
};
use parkclean::report::{
    display_quality_assessment, export_removal_report, CleaningSummary, RemovalReport,
    RemovalReportMetadata,
};
use parkclean::utils::{
    create_spinner, finish_with_error, finish_with_success, print_banner, print_completion,
    print_config, print_count, print_info, print_step_header, print_step_time, print_success,
    print_warning, RunSettings,
};

fn main() -> Result<()> {
    pretty_env_logger::init();

    let cli = Cli::parse();

    if let Some(command) = &cli.command {
        return match command {
            Commands::Assess { input } => run_assess(input, &cli.cleaning_config()),
        };
    }

    let input = cli.input().ok_or_else(|| {
        anyhow::anyhow!("Input file is required. Use -i/--input to specify a file.")
    })?;
    let output_path = cli
        .output_path()
        .ok_or_else(|| anyhow::anyhow!("Could not derive an output path from the input"))?;
    let report_path = cli.report_path();
    let config = cli.cleaning_config();

    print_banner(env!("CARGO_PKG_VERSION"));
    print_config(&RunSettings {
        input,
        output: &output_path,
        report: report_path.as_deref(),
        high_fine_threshold: config.high_fine_threshold,
        mask_token: &config.mask_token,
    });

    if let Err(err) = check_required_columns(input) {
        log::error!("Input rejected: {:#}", err);
        return Err(err);
    }

    if output_path.exists() && !cli.no_confirm && !confirm_overwrite(&output_path)? {
        println!("Cancelled by user.");
        return Ok(());
    }

    // Step 1: Load
    print_step_header(1, "Load Dataset");
    let step_start = Instant::now();
    let spinner = create_spinner("Reading input file...");
    let (df, rows, cols, memory_mb) = match load_dataset(input) {
        Ok(loaded) => loaded,
        Err(err) => {
            finish_with_error(&spinner, "Failed to load dataset");
            log::error!("Load failed: {:#}", err);
            return Err(err);
        }
    };
    finish_with_success(&spinner, "Dataset loaded");

    println!("\n    {} Dataset Statistics:", style("✧").cyan());
    println!("      Rows: {}", rows);
    println!("      Columns: {}", cols);
    println!("      Estimated memory: {:.2} MB", memory_mb);
    log::info!("Loaded {} rows and {} columns from {}", rows, cols, input.display());

    let load_elapsed = step_start.elapsed();
    print_step_time(load_elapsed);

    let mut step_num = 2;

    // Step 2: Quality assessment (read-only)
    if cli.skip_assessment {
        print_info("Quality assessment skipped");
    } else {
        print_step_header(step_num, "Quality Assessment");
        step_num += 1;
        let step_start = Instant::now();
        let assessment = assess_quality(&df, &config)?;
        display_quality_assessment(&assessment);
        print_step_time(step_start.elapsed());
    }

    // Cleaning stages
    let mut ctx = PipelineContext::new(df)?;
    let mut summary = CleaningSummary::new(ctx.report.clone());
    summary.set_load_time(load_elapsed);

    for (stage, run) in stages() {
        print_step_header(step_num, stage.title());
        step_num += 1;

        let step_start = Instant::now();
        let before = ctx.report.clone();
        ctx = run(ctx, &config)?;

        let removed = ctx.removed_in(stage);
        if removed > 0 {
            print_count("row(s) removed", removed, None);
        } else {
            print_info("No rows removed");
        }
        report_anomalies(&before, &ctx);
        print_success(&format!("{} rows remaining", ctx.table.height()));

        let elapsed = step_start.elapsed();
        summary.add_stage_time(stage, elapsed);
        print_step_time(elapsed);
    }

    if !ctx.report.reconciles(&ctx.removals) {
        log::error!(
            "Removal log ({} rows) does not reconcile with counters {:?}",
            ctx.removals.len(),
            ctx.report
        );
    }

    // Save
    print_step_header(step_num, "Save Results");
    let step_start = Instant::now();
    let spinner = create_spinner("Writing output file...");
    save_dataset(&mut ctx.table, &output_path)?;
    finish_with_success(&spinner, &format!("Saved to {}", output_path.display()));
    let save_elapsed = step_start.elapsed();
    summary.set_save_time(save_elapsed);
    print_step_time(save_elapsed);

    summary.set_report(ctx.report.clone());
    summary.display();

    let removal_report = RemovalReport::build(&ctx.report, &ctx.removals);
    removal_report.display();

    if let Some(report_path) = report_path {
        write_removal_report(
            &removal_report,
            &ctx,
            input,
            &output_path,
            &report_path,
            &config,
        )?;
    }

    print_completion();

    Ok(())
}

/// Load a file and print its quality assessment without cleaning it
fn run_assess(input: &Path, config: &CleaningConfig) -> Result<()> {
    print_banner(env!("CARGO_PKG_VERSION"));

    let columns = check_required_columns(input)?;
    print_info(&format!("{} columns found in {}", columns.len(), input.display()));

    let spinner = create_spinner("Reading input file...");
    let (df, _, _, _) = match load_dataset(input) {
        Ok(loaded) => loaded,
        Err(err) => {
            finish_with_error(&spinner, "Failed to load dataset");
            return Err(err);
        }
    };
    finish_with_success(&spinner, "Dataset loaded");

    let assessment = assess_quality(&df, config)?;
    display_quality_assessment(&assessment);
    println!();

    Ok(())
}

fn report_anomalies(before: &parkclean::pipeline::CleaningReport, ctx: &PipelineContext) {
    let after = &ctx.report;
    let unparsed = after.unparsed_times - before.unparsed_times;
    let unknown = after.unknown_states - before.unknown_states;
    let negative = after.net_fine_anomalies - before.net_fine_anomalies;

    if unparsed > 0 {
        print_warning(&format!("{} violation time(s) could not be parsed", unparsed));
    }
    if unknown > 0 {
        print_warning(&format!("{} plate state(s) resolved to UNKNOWN", unknown));
    }
    if negative > 0 {
        print_warning(&format!("{} record(s) with negative net fine", negative));
    }
}

fn write_removal_report(
    report: &RemovalReport,
    ctx: &PipelineContext,
    input: &Path,
    output: &Path,
    report_path: &Path,
    config: &CleaningConfig,
) -> Result<()> {
    let spinner = create_spinner("Writing removal report...");
    let metadata = RemovalReportMetadata::new(input, output, config);
    export_removal_report(report, &ctx.removals, &metadata, report_path)?;
    finish_with_success(
        &spinner,
        &format!("Removal report saved to {}", report_path.display()),
    );
    Ok(())
}
