//! Aggregate command implementation
//!
//! Parses every input file, then buckets the combined records by time.

use super::shared::{
    RunSummary, collect_input_files, load_parser_config, parse_files, setup_logging,
};
use crate::app::services::aggregation::{AggregatedData, AggregationOptions, aggregate};
use crate::app::services::telemetry_parser::TelemetryParser;
use crate::cli::args::{AggregateArgs, OutputFormat};
use anyhow::Context;
use colored::*;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Aggregate command runner
pub async fn run_aggregate(args: &AggregateArgs) -> anyhow::Result<RunSummary> {
    let start_time = Instant::now();

    setup_logging(&args.common)?;
    debug!("Command line arguments: {:?}", args);

    let parser = TelemetryParser::new(load_parser_config(&args.common)?)?;
    let options = args.aggregation_options();

    let files = collect_input_files(&args.inputs).context("Failed to resolve inputs")?;
    if files.is_empty() {
        anyhow::bail!("No telemetry files matched {:?}", args.inputs);
    }

    let reports = parse_files(&files, &parser, args.common.show_progress()).await?;

    let mut summary = RunSummary::default();
    let mut records = Vec::new();
    for report in reports {
        summary.record_file(&report.result);
        records.extend(report.result.data);
    }
    if summary.errors_encountered > 0 {
        warn!(
            "{} data errors while parsing; affected fields aggregate as fallback values",
            summary.errors_encountered
        );
    }

    let buckets = aggregate(&records, &options);
    info!(
        "Aggregated {} records into {} buckets",
        records.len(),
        buckets.len()
    );
    summary.processing_time = start_time.elapsed();

    match args.common.output_format {
        OutputFormat::Human => print_human_table(&buckets, &options),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&buckets)
                .context("Failed to serialize aggregation results")?;
            println!("{}", json);
        }
    }

    Ok(summary)
}

fn print_human_table(buckets: &[AggregatedData], options: &AggregationOptions) {
    println!(
        "{}",
        format!("{} {} by {}", options.method, "values".bold(), options.interval).bright_green()
    );

    if buckets.is_empty() {
        println!("{}", "No records with a usable timestamp".yellow());
        return;
    }

    let paths: Vec<&str> = options.selected_fields().iter().map(|f| f.path()).collect();
    let mut header = format!("{:<18} {:>6}", "period", "count");
    for path in &paths {
        header.push_str(&format!(" {:>20}", path));
    }
    println!("{}", header.bold());

    for bucket in buckets {
        let mut line = format!("{:<18} {:>6}", bucket.period, bucket.count);
        for path in &paths {
            let value = bucket.values.get(*path).copied().unwrap_or_default();
            line.push_str(&format!(" {:>20.2}", value));
        }
        println!("{}", line);
    }
}
