//! Parse command implementation
//!
//! Parses each input file and reports its rows and data errors.

use super::shared::{
    FileReport, RunSummary, collect_input_files, load_parser_config, parse_files, setup_logging,
};
use crate::app::services::error_report::format_errors_with_limit;
use crate::app::services::telemetry_parser::TelemetryParser;
use crate::cli::args::{OutputFormat, ParseArgs};
use anyhow::Context;
use colored::*;
use indicatif::HumanDuration;
use std::time::Instant;
use tracing::{debug, info};

/// Parse command runner
///
/// 1. Set up logging and configuration
/// 2. Resolve inputs to files
/// 3. Parse every file
/// 4. Report per-file results
pub async fn run_parse(args: &ParseArgs) -> anyhow::Result<RunSummary> {
    let start_time = Instant::now();

    setup_logging(&args.common)?;
    debug!("Command line arguments: {:?}", args);

    let config = load_parser_config(&args.common)?;
    let max_examples = config.max_error_examples;
    let parser = TelemetryParser::new(config)?;

    let files = collect_input_files(&args.inputs).context("Failed to resolve inputs")?;
    if files.is_empty() {
        anyhow::bail!("No telemetry files matched {:?}", args.inputs);
    }
    info!("Parsing {} telemetry files", files.len());

    let reports = parse_files(&files, &parser, args.common.show_progress()).await?;

    let mut summary = RunSummary::default();
    for report in &reports {
        summary.record_file(&report.result);
    }
    summary.processing_time = start_time.elapsed();

    match args.common.output_format {
        OutputFormat::Human => print_human_report(&reports, &summary, max_examples),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&reports)
                .context("Failed to serialize parse results")?;
            println!("{}", json);
        }
    }

    Ok(summary)
}

fn print_human_report(reports: &[FileReport], summary: &RunSummary, max_examples: usize) {
    for report in reports {
        let result = &report.result;
        let rate = format!("{:.1}%", result.success_rate());
        let rate = if result.is_successful() {
            rate.green()
        } else if result.successful_rows > 0 {
            rate.yellow()
        } else {
            rate.red()
        };

        println!("{}", report.path.display().to_string().bright_cyan().bold());
        println!(
            "  Rows: {} of {} parsed ({})",
            result.successful_rows.to_string().bold(),
            result.total_rows,
            rate
        );

        if !result.errors.is_empty() {
            for line in format_errors_with_limit(&result.errors, max_examples).lines() {
                println!("  {}", line);
            }
        }
        println!();
    }

    let errors = if summary.errors_encountered > 0 {
        summary.errors_encountered.to_string().yellow()
    } else {
        summary.errors_encountered.to_string().green()
    };
    println!(
        "{} {} files, {} of {} rows parsed, {} errors in {}",
        "Done:".bright_green().bold(),
        summary.files_processed,
        summary.successful_rows,
        summary.total_rows,
        errors,
        HumanDuration(summary.processing_time)
    );
}
