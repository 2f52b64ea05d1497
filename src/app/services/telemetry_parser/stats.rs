//! Parse results and summary statistics for telemetry ingestion
//!
//! This module provides the result type returned by the parser, together with
//! the success-rate and error-breakdown helpers used by reports.

use super::record_parser::RowOutcome;
use crate::app::models::{ErrorKind, InverterRecord, ParseError};
use crate::constants::SUCCESS_RATE_THRESHOLD;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Records and errors produced from one CSV input
///
/// `successful_rows == data.len()` and `successful_rows <= total_rows` always hold.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseResult {
    /// Accepted records in input row order
    pub data: Vec<InverterRecord>,

    /// All errors, ordered by row then field
    pub errors: Vec<ParseError>,

    /// Data rows seen by the tokenizer (blank lines excluded)
    pub total_rows: usize,

    /// Rows that produced a record
    pub successful_rows: usize,
}

impl ParseResult {
    /// Create an empty result
    pub fn new() -> Self {
        Self::default()
    }

    /// Result for input that could not be tokenized at all
    pub fn from_file_error(error: ParseError) -> Self {
        Self {
            errors: vec![error],
            ..Self::default()
        }
    }

    /// Count one tokenized data row and merge its assembly outcome
    pub fn push_row(&mut self, outcome: RowOutcome) {
        self.total_rows += 1;
        self.errors.extend(outcome.errors);
        if let Some(record) = outcome.record {
            self.data.push(record);
            self.successful_rows += 1;
        }
    }

    /// Rows that were seen but produced no record
    pub fn failed_rows(&self) -> usize {
        self.total_rows - self.successful_rows
    }

    /// Calculate success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.total_rows == 0 {
            0.0
        } else {
            (self.successful_rows as f64 / self.total_rows as f64) * 100.0
        }
    }

    /// Check if parsing was mostly successful (>90% success rate)
    pub fn is_successful(&self) -> bool {
        self.success_rate() > SUCCESS_RATE_THRESHOLD
    }

    /// Number of errors per kind; kinds without errors are omitted
    pub fn error_counts(&self) -> BTreeMap<ErrorKind, usize> {
        let mut counts = BTreeMap::new();
        for error in &self.errors {
            *counts.entry(error.kind).or_insert(0) += 1;
        }
        counts
    }

    /// One-line summary for logs and reports
    pub fn summary(&self) -> String {
        format!(
            "Parsed {} of {} rows ({:.1}% success) | Errors: {}",
            self.successful_rows,
            self.total_rows,
            self.success_rate(),
            self.errors.len()
        )
    }
}
