//! Tests for parse result accounting

use crate::app::models::{ErrorKind, InverterRecord, ParseError};
use crate::app::services::telemetry_parser::{ParseResult, RowOutcome};

fn accepted(errors: Vec<ParseError>) -> RowOutcome {
    RowOutcome {
        record: Some(InverterRecord::default()),
        errors,
    }
}

fn rejected(errors: Vec<ParseError>) -> RowOutcome {
    RowOutcome {
        record: None,
        errors,
    }
}

#[test]
fn test_push_row_counts() {
    let mut result = ParseResult::new();
    result.push_row(accepted(vec![]));
    result.push_row(accepted(vec![ParseError::conversion(3, "PV_Voltage", "x", "bad")]));
    result.push_row(rejected(vec![ParseError::missing(4, "Date", "Date is required")]));

    assert_eq!(result.total_rows, 3);
    assert_eq!(result.successful_rows, 2);
    assert_eq!(result.data.len(), 2);
    assert_eq!(result.failed_rows(), 1);
    assert_eq!(result.errors.len(), 2);
    assert_eq!(result.errors[1].row, 4);
}

#[test]
fn test_success_rate() {
    let mut result = ParseResult::new();
    assert_eq!(result.success_rate(), 0.0);
    assert!(!result.is_successful());

    for _ in 0..9 {
        result.push_row(accepted(vec![]));
    }
    result.push_row(rejected(vec![]));

    assert!((result.success_rate() - 90.0).abs() < 1e-9);
    // Exactly 90% is not above the threshold
    assert!(!result.is_successful());

    result.push_row(accepted(vec![]));
    assert!(result.is_successful());
}

#[test]
fn test_error_counts_by_kind() {
    let mut result = ParseResult::new();
    result.push_row(accepted(vec![
        ParseError::format(2, "Time", "25:00", "bad time"),
        ParseError::validation(2, "Battery_SOC", "140", "out of range"),
        ParseError::validation(2, "Grid_Frequency", "10", "out of range"),
    ]));

    let counts = result.error_counts();
    assert_eq!(counts.get(&ErrorKind::Validation), Some(&2));
    assert_eq!(counts.get(&ErrorKind::Format), Some(&1));
    assert_eq!(counts.get(&ErrorKind::Missing), None);
    assert_eq!(counts.keys().next(), Some(&ErrorKind::Format));
}

#[test]
fn test_file_error_result() {
    let result = ParseResult::from_file_error(ParseError::format(0, "file", "", "no header"));

    assert_eq!(result.total_rows, 0);
    assert_eq!(result.successful_rows, 0);
    assert!(result.data.is_empty());
    assert_eq!(result.errors.len(), 1);
}

#[test]
fn test_summary_and_serialization() {
    let mut result = ParseResult::new();
    result.push_row(accepted(vec![]));
    result.push_row(rejected(vec![ParseError::missing(3, "Date", "Date is required")]));

    assert_eq!(
        result.summary(),
        "Parsed 1 of 2 rows (50.0% success) | Errors: 1"
    );

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["totalRows"], 2);
    assert_eq!(json["successfulRows"], 1);
    assert_eq!(json["errors"][0]["type"], "missing");
}
