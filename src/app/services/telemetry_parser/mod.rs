//! CSV parser for solar-inverter logger telemetry
//!
//! This module turns the text of a logger export into validated
//! [`InverterRecord`](crate::app::models::InverterRecord)s plus a typed list of
//! everything that was wrong with the input.
//!
//! ## Architecture
//!
//! The parser is organized into logical components:
//! - [`parser`] - Tokenizing and orchestration over all rows
//! - [`column_mapping`] - Header alias resolution onto canonical fields
//! - [`record_parser`] - Assembly of one row into a record
//! - [`field_parsers`] - Pure per-field validators
//! - [`stats`] - Parse result and summary statistics
//!
//! ## Usage
//!
//! ```rust
//! use inverter_telemetry::app::services::telemetry_parser::TelemetryParser;
//!
//! let csv = "ID,Date,Time,Voltage,Voltage\nINV-7,2025-09-28,9:05,181.2,400\n";
//! let result = TelemetryParser::default().parse(csv);
//!
//! assert_eq!(result.total_rows, 1);
//! assert_eq!(result.data[0].pv.voltage, 181.2);
//! // The second "Voltage" column is the battery, and 400 V is out of range
//! assert_eq!(result.errors[0].field, "Battery_Voltage");
//! ```

pub mod column_mapping;
pub mod field_parsers;
pub mod parser;
pub mod record_parser;
pub mod stats;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use column_mapping::{CanonicalField, ColumnMapping, RawRow};
pub use parser::TelemetryParser;
pub use record_parser::{RowOutcome, assemble_record};
pub use stats::ParseResult;
