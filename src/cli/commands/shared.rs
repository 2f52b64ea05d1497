//! Shared components for CLI commands
//!
//! This module contains logging setup, input discovery, configuration loading
//! and file parsing used by every command.

use crate::app::services::telemetry_parser::{ParseResult, TelemetryParser};
use crate::cli::args::CommonArgs;
use crate::config::ParserConfig;
use crate::constants::TELEMETRY_FILE_EXTENSION;
use crate::{Error, Result};
use anyhow::Context;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Run statistics reported by every command
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Number of files parsed
    pub files_processed: usize,
    /// Data rows seen across all files
    pub total_rows: usize,
    /// Rows that produced a record
    pub successful_rows: usize,
    /// Data errors collected across all files
    pub errors_encountered: usize,
    /// Total processing time
    pub processing_time: Duration,
}

impl RunSummary {
    /// Accumulate one file's parse result
    pub fn record_file(&mut self, result: &ParseResult) {
        self.files_processed += 1;
        self.total_rows += result.total_rows;
        self.successful_rows += result.successful_rows;
        self.errors_encountered += result.errors.len();
    }
}

/// Parse result for one input file
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileReport {
    pub path: PathBuf,
    #[serde(flatten)]
    pub result: ParseResult,
}

/// Set up structured logging for a command
pub fn setup_logging(common: &CommonArgs) -> anyhow::Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = common.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("inverter_telemetry={}", log_level)));

    if common.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
            .context("Failed to initialize logging")?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
            .context("Failed to initialize logging")?;
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Load the parser configuration named on the command line, or the defaults
pub fn load_parser_config(common: &CommonArgs) -> anyhow::Result<ParserConfig> {
    common.validate()?;

    match &common.config_file {
        Some(path) => {
            let config = ParserConfig::from_json_file(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?;
            info!("Loaded parser configuration from {}", path.display());
            Ok(config)
        }
        None => Ok(ParserConfig::default()),
    }
}

/// Resolve command-line inputs into a list of telemetry files
///
/// Each input may be a file, a directory (searched recursively for `.csv`
/// files) or a glob pattern. Files are returned in input order, directory and
/// glob matches sorted, each path at most once.
pub fn collect_input_files(inputs: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut seen = HashSet::new();

    for input in inputs {
        let path = Path::new(input);

        let found = if path.is_dir() {
            discover_csv_files(path)?
        } else if path.is_file() {
            vec![path.to_path_buf()]
        } else if is_glob_pattern(input) {
            expand_glob(input)?
        } else {
            return Err(Error::file_not_found(input.as_str()));
        };

        if found.is_empty() {
            warn!("No telemetry files found for input '{}'", input);
        }

        for file in found {
            if seen.insert(file.clone()) {
                files.push(file);
            }
        }
    }

    debug!("Collected {} input files", files.len());
    Ok(files)
}

/// Discover CSV files under a directory
pub fn discover_csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    use walkdir::WalkDir;

    let mut csv_files = Vec::new();
    for entry in WalkDir::new(dir).follow_links(false) {
        let entry = entry?;
        if entry.file_type().is_file() && has_telemetry_extension(entry.path()) {
            csv_files.push(entry.into_path());
        }
    }

    csv_files.sort();
    debug!(
        "Discovered {} CSV files in {}",
        csv_files.len(),
        dir.display()
    );
    Ok(csv_files)
}

fn expand_glob(pattern: &str) -> Result<Vec<PathBuf>> {
    let paths = glob::glob(pattern).map_err(|e| {
        Error::configuration(format!("Invalid glob pattern '{}': {}", pattern, e))
    })?;

    let mut matches = Vec::new();
    for entry in paths {
        match entry {
            Ok(path) if path.is_file() => matches.push(path),
            Ok(_) => {}
            Err(e) => warn!("Skipping unreadable glob match: {}", e),
        }
    }

    matches.sort();
    Ok(matches)
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains(['*', '?', '['])
}

fn has_telemetry_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(TELEMETRY_FILE_EXTENSION))
}

/// Read a telemetry file as text
pub async fn read_telemetry_file(path: &Path) -> Result<String> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| Error::io(format!("Failed to read {}", path.display()), e))?;

    String::from_utf8(bytes).map_err(|_| {
        Error::telemetry_format(path.display().to_string(), "File is not valid UTF-8 text")
    })
}

/// Read and parse every file, in order
pub async fn parse_files(
    files: &[PathBuf],
    parser: &TelemetryParser,
    show_progress: bool,
) -> anyhow::Result<Vec<FileReport>> {
    let progress = if show_progress && files.len() > 1 {
        Some(create_progress_bar(files.len() as u64, "Parsing telemetry files"))
    } else {
        None
    };

    let mut reports = Vec::with_capacity(files.len());
    for path in files {
        if let Some(pb) = &progress {
            pb.set_message(display_name(path));
        }

        let content = read_telemetry_file(path).await?;
        let result = parser
            .parse_async(content)
            .await
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        info!("{}: {}", path.display(), result.summary());
        reports.push(FileReport {
            path: path.clone(),
            result,
        });

        if let Some(pb) = &progress {
            pb.inc(1);
        }
    }

    if let Some(pb) = progress {
        pb.finish_with_message("Parsing complete");
    }

    Ok(reports)
}

/// Create a progress bar with the standard style
pub fn create_progress_bar(total: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
        .map(|style| style.progress_chars("#>-"))
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_directory_walk_finds_csv_only() {
        let temp_dir = TempDir::new().unwrap();
        let a = write(temp_dir.path(), "a.csv", "ID\n");
        let b = write(temp_dir.path(), "nested/b.CSV", "ID\n");
        write(temp_dir.path(), "notes.txt", "ignore me");

        let files = collect_input_files(&[temp_dir.path().to_string_lossy().to_string()]).unwrap();

        assert_eq!(files, vec![a, b]);
    }

    #[test]
    fn test_glob_and_file_inputs_are_deduplicated() {
        let temp_dir = TempDir::new().unwrap();
        let a = write(temp_dir.path(), "a.csv", "ID\n");
        let b = write(temp_dir.path(), "b.csv", "ID\n");

        let pattern = temp_dir.path().join("*.csv").to_string_lossy().to_string();
        let inputs = vec![b.to_string_lossy().to_string(), pattern];
        let files = collect_input_files(&inputs).unwrap();

        assert_eq!(files, vec![b, a]);
    }

    #[test]
    fn test_missing_input_is_an_error() {
        let result = collect_input_files(&["/definitely/not/here.csv".to_string()]);
        assert!(matches!(result, Err(Error::FileNotFound { .. })));
    }

    #[test]
    fn test_unmatched_glob_yields_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let pattern = temp_dir.path().join("*.csv").to_string_lossy().to_string();

        assert!(collect_input_files(&[pattern]).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_parse_files_in_order() {
        let temp_dir = TempDir::new().unwrap();
        let first = write(
            temp_dir.path(),
            "first.csv",
            "ID,Date,Time\nINV-1,2025-09-28,10:00\n",
        );
        let second = write(temp_dir.path(), "second.csv", "ID,Date,Time\n,,10:00\n");

        let reports = parse_files(
            &[first.clone(), second.clone()],
            &TelemetryParser::default(),
            false,
        )
        .await
        .unwrap();

        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].path, first);
        assert_eq!(reports[0].result.successful_rows, 1);
        assert_eq!(reports[1].result.successful_rows, 0);

        let mut summary = RunSummary::default();
        for report in &reports {
            summary.record_file(&report.result);
        }
        assert_eq!(summary.files_processed, 2);
        assert_eq!(summary.total_rows, 2);
        assert_eq!(summary.successful_rows, 1);
    }

    #[tokio::test]
    async fn test_non_utf8_file_is_format_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("binary.csv");
        fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();

        let result = read_telemetry_file(&path).await;
        assert!(matches!(result, Err(Error::TelemetryFormat { .. })));
    }
}
