//! Typed data errors collected while parsing telemetry
//!
//! These are values, not failures: the parser returns them alongside the
//! records it could build so callers decide how to surface them.

use serde::{Deserialize, Serialize};

/// Closed taxonomy of data problems
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    /// Required field absent
    Missing,

    /// Wrong shape (date/time/hex pattern mismatch, broken row structure)
    Format,

    /// Not parseable as a number
    Conversion,

    /// Parseable but out of range or otherwise rejected
    Validation,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Missing => "missing",
            ErrorKind::Format => "format",
            ErrorKind::Conversion => "conversion",
            ErrorKind::Validation => "validation",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single problem found in the input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseError {
    /// Line number in the file (the header is line 1, so data starts at 2)
    pub row: usize,

    /// Canonical field name, or `parsing`/`file` for structural problems
    pub field: String,

    /// Raw text as found in the input
    pub value: String,

    pub message: String,

    #[serde(rename = "type")]
    pub kind: ErrorKind,
}

impl ParseError {
    pub fn new(
        row: usize,
        field: impl Into<String>,
        value: impl Into<String>,
        message: impl Into<String>,
        kind: ErrorKind,
    ) -> Self {
        Self {
            row,
            field: field.into(),
            value: value.into(),
            message: message.into(),
            kind,
        }
    }

    pub fn missing(row: usize, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(row, field, "", message, ErrorKind::Missing)
    }

    pub fn format(
        row: usize,
        field: impl Into<String>,
        value: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(row, field, value, message, ErrorKind::Format)
    }

    pub fn conversion(
        row: usize,
        field: impl Into<String>,
        value: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(row, field, value, message, ErrorKind::Conversion)
    }

    pub fn validation(
        row: usize,
        field: impl Into<String>,
        value: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(row, field, value, message, ErrorKind::Validation)
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Row {}, {}: {}", self.row, self.field, self.message)
    }
}
