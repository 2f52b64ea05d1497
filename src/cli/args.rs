//! Command-line argument definitions for the inverter telemetry tool
//!
//! This module defines the CLI interface using the clap derive API.

use crate::app::models::RecordField;
use crate::app::services::aggregation::{AggregationMethod, AggregationOptions, Interval};
use crate::{Error, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the inverter telemetry tool
///
/// Validates solar-inverter logger CSV exports and summarizes their readings
/// over time.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "inverter-telemetry",
    version,
    about = "Validate and aggregate solar-inverter logger CSV exports",
    long_about = "Parses the CSV exports written by solar-inverter data loggers into validated \
                  records, reporting every malformed or out-of-range field by row, and \
                  aggregates the parsed readings into minute, hour, day or month buckets."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Parse telemetry files and report records and errors
    Parse(ParseArgs),
    /// Parse telemetry files and aggregate their readings by time bucket
    Aggregate(AggregateArgs),
}

/// Options shared by every subcommand
#[derive(Debug, Clone, clap::Args)]
pub struct CommonArgs {
    /// Path to a JSON parser configuration file
    ///
    /// Overrides validation ranges, the CSV delimiter and the number of
    /// example lines per error kind. Missing keys keep their defaults.
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (JSON format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors and the final report. Overrides verbose settings.
    #[arg(short = 'q', long = "quiet", help = "Suppress progress output")]
    pub quiet: bool,

    /// Output format for results
    #[arg(
        long = "output-format",
        value_enum,
        default_value = "human",
        help = "Output format for results"
    )]
    pub output_format: OutputFormat,
}

/// Arguments for the parse command
#[derive(Debug, Clone, Parser)]
pub struct ParseArgs {
    /// Files, directories or glob patterns to parse
    ///
    /// Directories are searched recursively for .csv files.
    #[arg(value_name = "INPUTS", required = true)]
    pub inputs: Vec<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Arguments for the aggregate command
#[derive(Debug, Clone, Parser)]
pub struct AggregateArgs {
    /// Files, directories or glob patterns to parse
    #[arg(value_name = "INPUTS", required = true)]
    pub inputs: Vec<String>,

    /// Bucket width
    #[arg(long = "interval", value_enum, default_value = "hour")]
    pub interval: Interval,

    /// Reduction applied within each bucket
    #[arg(long = "method", value_enum, default_value = "average")]
    pub method: AggregationMethod,

    /// Comma-separated dotted field paths (e.g. pv.powerW,battery.soc)
    ///
    /// Defaults to PV power, battery voltage, battery SOC, inverter voltage
    /// and grid voltage.
    #[arg(long = "fields", value_name = "LIST", value_delimiter = ',')]
    pub fields: Option<Vec<RecordField>>,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON format for scripting
    Json,
}

impl Args {
    /// Get the command if one was specified
    pub fn get_command(&self) -> Result<&Commands> {
        self.command
            .as_ref()
            .ok_or_else(|| Error::configuration("No command given"))
    }
}

impl CommonArgs {
    /// Get the log level based on verbosity
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress bars (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet && self.output_format == OutputFormat::Human
    }

    /// Validate the shared arguments
    pub fn validate(&self) -> Result<()> {
        if let Some(config_file) = &self.config_file {
            if !config_file.exists() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }
        Ok(())
    }
}

impl AggregateArgs {
    /// Aggregation options described by these arguments
    pub fn aggregation_options(&self) -> AggregationOptions {
        let options = AggregationOptions::new(self.interval, self.method);
        match &self.fields {
            Some(fields) => options.with_fields(fields.clone()),
            None => options,
        }
    }
}
