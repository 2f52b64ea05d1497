//! Inverter Telemetry Library
//!
//! A Rust library for turning the CSV exports of solar-inverter data loggers
//! into strongly-typed, validated records.
//!
//! This library provides tools for:
//! - Resolving the logger's duplicated column headers onto canonical fields
//! - Validating every field against its physical range with typed error reporting
//! - Assembling rows into nested [`InverterRecord`]s with partial-success semantics
//! - Bucketing parsed records by minute/hour/day/month and reducing selected fields
//! - Rendering collected parse errors into a grouped, human-readable report
//!
//! ## Usage
//!
//! ```rust
//! use inverter_telemetry::app::services::telemetry_parser::TelemetryParser;
//! use inverter_telemetry::app::services::aggregation::{aggregate, AggregationOptions};
//! use inverter_telemetry::app::services::error_report::format_errors;
//!
//! let csv = "ID,Name,Date,Time,SOC\nINV-1,Roof,2025-09-28,10:15,81\n";
//! let result = TelemetryParser::default().parse(csv);
//! assert_eq!(result.successful_rows, 1);
//! assert_eq!(format_errors(&result.errors), "No errors");
//!
//! let buckets = aggregate(&result.data, &AggregationOptions::default());
//! assert_eq!(buckets.len(), 1);
//! ```

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod aggregation;
        pub mod error_report;
        pub mod record_history;
        pub mod telemetry_parser;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{ErrorKind, InverterRecord, ParseError, RecordField};
pub use app::services::telemetry_parser::{ParseResult, TelemetryParser};
pub use config::ParserConfig;

/// Result type alias for the telemetry library
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for operations that can fail as a whole
///
/// Problems inside the telemetry data itself are never reported through this
/// type; they are collected as [`ParseError`] values in a [`ParseResult`].
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Input is not a usable telemetry export
    #[error("Telemetry format error in '{file}': {message}")]
    TelemetryFormat { file: String, message: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// JSON (de)serialization error
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Unknown record field path
    #[error("Unknown record field '{path}'")]
    UnknownField { path: String },

    /// File not found
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    /// Directory traversal error
    #[error("Directory traversal error: {message}")]
    DirectoryTraversal {
        message: String,
        #[source]
        source: walkdir::Error,
    },

    /// Processing interrupted
    #[error("Processing interrupted: {reason}")]
    ProcessingInterrupted { reason: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a telemetry format error for a named input
    pub fn telemetry_format(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::TelemetryFormat {
            file: file.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a JSON error with context
    pub fn json(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Json {
            message: message.into(),
            source,
        }
    }

    /// Create an unknown field error
    pub fn unknown_field(path: impl Into<String>) -> Self {
        Self::UnknownField { path: path.into() }
    }

    /// Create a file not found error
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a processing interrupted error
    pub fn processing_interrupted(reason: impl Into<String>) -> Self {
        Self::ProcessingInterrupted {
            reason: reason.into(),
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Json {
            message: "JSON serialization failed".to_string(),
            source: error,
        }
    }
}

impl From<walkdir::Error> for Error {
    fn from(error: walkdir::Error) -> Self {
        Self::DirectoryTraversal {
            message: "Directory traversal failed".to_string(),
            source: error,
        }
    }
}
