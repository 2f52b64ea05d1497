//! Command implementations for the inverter telemetry CLI
//!
//! Each command is implemented in its own module; shared logging, input
//! discovery and parsing live in [`shared`].

pub mod aggregate;
pub mod parse;
pub mod shared;

pub use shared::RunSummary;

use crate::cli::args::{Args, Commands};

/// Main command runner
///
/// Dispatches to the subcommand handler:
/// - `parse`: per-file validation report
/// - `aggregate`: time-bucketed summary of all parsed records
pub async fn run(args: Args) -> anyhow::Result<RunSummary> {
    match args.get_command()? {
        Commands::Parse(parse_args) => parse::run_parse(parse_args).await,
        Commands::Aggregate(aggregate_args) => aggregate::run_aggregate(aggregate_args).await,
    }
}
