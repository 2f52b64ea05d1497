//! Core telemetry CSV parser implementation
//!
//! This module tokenizes already-read CSV text, resolves the header row into
//! canonical fields, and drives row assembly over every data row, merging the
//! per-row errors into one result.

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{debug, info, warn};

use super::column_mapping::{ColumnMapping, RawRow};
use super::record_parser::{RowOutcome, assemble_record};
use super::stats::ParseResult;
use crate::app::models::ParseError;
use crate::config::ParserConfig;
use crate::constants::{FILE_FIELD, PARSING_FIELD};
use crate::{Error, Result};

/// Parser for solar-inverter logger CSV exports
///
/// This parser focuses on data integrity:
/// - Header aliasing for the loggers' duplicated column names
/// - Per-field validation with typed errors
/// - Partial success: malformed fields never suppress an identifiable row
/// - Malformed data never fails the parse as a whole
#[derive(Debug, Clone, Default)]
pub struct TelemetryParser {
    config: ParserConfig,
}

impl TelemetryParser {
    /// Create a new parser, rejecting configurations the tokenizer cannot use
    pub fn new(config: ParserConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse CSV text into records and errors
    ///
    /// The first line is the header. Data rows are numbered from 2 so error rows
    /// match line numbers in the file. Only input without a usable header row
    /// short-circuits, returning zero rows and a single file-level error.
    pub fn parse(&self, content: &str) -> ParseResult {
        if content.trim().is_empty() {
            warn!("Telemetry input is empty");
            return ParseResult::from_file_error(ParseError::format(
                0,
                FILE_FIELD,
                "",
                "Input contains no header row",
            ));
        }

        let mut csv_reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::Headers)
            .delimiter(self.config.delimiter_byte())
            .from_reader(content.as_bytes());

        let headers = match csv_reader.headers() {
            Ok(headers) => headers.clone(),
            Err(e) => {
                warn!("Failed to read CSV header: {}", e);
                return ParseResult::from_file_error(ParseError::format(
                    0,
                    FILE_FIELD,
                    "",
                    format!("Failed to read CSV header: {}", e),
                ));
            }
        };

        let column_mapping = ColumnMapping::analyze(&headers);
        let (total_cols, resolved, aliased, ignored) = column_mapping.stats();
        debug!(
            "Column mapping: {} total, {} resolved ({} via legacy alias), {} ignored",
            total_cols, resolved, aliased, ignored
        );
        if !column_mapping.ignored_columns.is_empty() {
            debug!("Ignored columns: {:?}", column_mapping.ignored_columns);
        }
        if resolved == 0 {
            warn!("Header row contains no recognized telemetry columns");
        }

        let mut result = ParseResult::new();
        let mut data_index = 0;

        for item in csv_reader.records() {
            match item {
                Ok(record) => {
                    if is_blank_line(&record) {
                        continue;
                    }

                    let row_number = data_index + 2;
                    data_index += 1;

                    result.push_row(self.parse_row(&record, &column_mapping, row_number));
                }
                // Only invalid UTF-8 fails here, which &str input never contains
                Err(e) => {
                    let row_number = e
                        .position()
                        .map(|position| position.line() as usize)
                        .unwrap_or(data_index + 2);
                    data_index += 1;

                    debug!("Tokenizer error at row {}: {}", row_number, e);
                    result.push_row(RowOutcome {
                        record: None,
                        errors: vec![ParseError::format(
                            row_number,
                            PARSING_FIELD,
                            "",
                            format!("CSV parse error: {}", e),
                        )],
                    });
                }
            }
        }

        info!("{}", result.summary());
        result
    }

    /// Parse on a blocking task so async callers are not stalled by large inputs
    pub async fn parse_async(&self, content: String) -> Result<ParseResult> {
        let parser = self.clone();
        tokio::task::spawn_blocking(move || parser.parse(&content))
            .await
            .map_err(|e| Error::processing_interrupted(format!("Parse task failed: {}", e)))
    }

    /// Assemble one tokenized row, flagging ragged field counts first
    fn parse_row(
        &self,
        record: &StringRecord,
        column_mapping: &ColumnMapping,
        row_number: usize,
    ) -> RowOutcome {
        let raw_row = RawRow::from_record(record, column_mapping);
        let mut outcome = assemble_record(&raw_row, row_number, &self.config.limits);

        if record.len() != column_mapping.column_count {
            let structural = ParseError::format(
                row_number,
                PARSING_FIELD,
                "",
                format!(
                    "Row has {} fields but the header has {}",
                    record.len(),
                    column_mapping.column_count
                ),
            );
            outcome.errors.insert(0, structural);
        }

        outcome
    }
}

/// A line holding nothing but whitespace
///
/// Lines of bare delimiters are rows with empty fields, not blank lines.
fn is_blank_line(record: &StringRecord) -> bool {
    record.len() == 1 && record[0].trim().is_empty()
}
