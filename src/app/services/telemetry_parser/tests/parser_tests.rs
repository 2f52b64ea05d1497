//! Tests for the parse orchestrator

use super::*;
use crate::app::models::ErrorKind;
use crate::app::services::telemetry_parser::TelemetryParser;
use crate::config::ParserConfig;
use crate::constants::{FILE_FIELD, PARSING_FIELD};

#[test]
fn test_full_legacy_row_parses_cleanly() {
    let result = TelemetryParser::default().parse(&legacy_csv(&[FULL_ROW]));

    assert_eq!(result.total_rows, 1);
    assert_eq!(result.successful_rows, 1);
    assert!(result.errors.is_empty(), "{:?}", result.errors);

    let record = &result.data[0];
    assert_eq!(record.user.id, "INV-001");
    assert_eq!(record.user.blackout, Some(false));
    assert_eq!(record.supply.total_kwh, 1520.5);
    assert_eq!(record.pv.voltage, 182.4);
    assert_eq!(record.pv.yearly_wm, 1400.0);
    assert_eq!(record.pv.total_kwh, 9800.0);
    assert_eq!(record.battery.voltage, 52.8);
    assert_eq!(record.battery.current, -12.5);
    assert_eq!(record.battery.temperature, 24.0);
    assert_eq!(record.battery.soc, 87.0);
    assert_eq!(record.inverter.voltage, 230.1);
    assert_eq!(record.inverter.frequency, 50.0);
    assert_eq!(record.grid.voltage, 229.8);
    assert_eq!(record.grid.current, 0.4);
    assert_eq!(record.grid.frequency, 49.98);
    assert_eq!(record.status.hex, "0x03");
}

#[test]
fn test_time_only_row_is_dropped_with_missing_date() {
    let time_only = sparse_row(&[(3, "10:45")]);
    let result = TelemetryParser::default().parse(&legacy_csv(&[FULL_ROW, &time_only]));

    assert_eq!(result.total_rows, 2);
    assert_eq!(result.successful_rows, 1);
    assert_eq!(result.data.len(), 1);
    assert!(
        result
            .errors
            .iter()
            .any(|e| e.kind == ErrorKind::Missing && e.field == "Date" && e.row == 3)
    );
}

#[test]
fn test_row_numbers_follow_file_lines() {
    let bad_soc = sparse_row(&[(0, "INV-2"), (2, "2025-09-28"), (3, "11:00"), (16, "120")]);
    let bad_hex = sparse_row(&[(0, "INV-3"), (2, "2025-09-28"), (3, "11:05"), (23, "zz")]);
    let result = TelemetryParser::default().parse(&legacy_csv(&[FULL_ROW, &bad_soc, &bad_hex]));

    let rows: Vec<(usize, &str)> = result
        .errors
        .iter()
        .map(|e| (e.row, e.field.as_str()))
        .collect();
    assert_eq!(rows, vec![(3, "Battery_SOC"), (4, "Status_Hex")]);
    assert_eq!(result.successful_rows, 3);
}

#[test]
fn test_blank_lines_are_skipped() {
    let content = format!("{}\n\n{}\n   \n{}\n", LEGACY_HEADER, FULL_ROW, FULL_ROW);
    let result = TelemetryParser::default().parse(&content);

    assert_eq!(result.total_rows, 2);
    assert_eq!(result.successful_rows, 2);
}

#[test]
fn test_delimiter_only_line_is_a_rejected_row() {
    let result = TelemetryParser::default().parse(&legacy_csv(&[&sparse_row(&[]), FULL_ROW]));

    assert_eq!(result.total_rows, 2);
    assert_eq!(result.successful_rows, 1);
    assert!(
        result
            .errors
            .iter()
            .any(|e| e.kind == ErrorKind::Missing && e.field == "Date" && e.row == 2)
    );

    let content = "ID,Date,Time,SOC\nINV-1,2025-09-28,10:00,50\n,,,\n";
    let result = TelemetryParser::default().parse(content);
    assert_eq!(result.total_rows, 2);
    assert_eq!(result.successful_rows, 1);
    assert_eq!(result.errors.len(), 2);
    assert!(result.errors.iter().all(|e| e.kind == ErrorKind::Missing && e.row == 3));
}

#[test]
fn test_mixed_header_assigns_legacy_columns_to_unclaimed_fields() {
    let content = "ID,Date,Time,PV_Voltage,Voltage,Voltage,Voltage\n\
                   INV-1,2025-09-28,10:00,100,50,230,231\n";
    let result = TelemetryParser::default().parse(content);

    assert!(result.errors.is_empty(), "{:?}", result.errors);
    let record = &result.data[0];
    assert_eq!(record.pv.voltage, 100.0);
    assert_eq!(record.battery.voltage, 50.0);
    assert_eq!(record.inverter.voltage, 230.0);
    assert_eq!(record.grid.voltage, 231.0);
}

#[test]
fn test_header_whitespace_is_trimmed() {
    let content = " ID , Date ,Time , SOC \nINV-1,2025-09-28,8:00,55\n";
    let result = TelemetryParser::default().parse(content);

    assert!(result.errors.is_empty(), "{:?}", result.errors);
    assert_eq!(result.data[0].battery.soc, 55.0);
}

#[test]
fn test_ragged_row_reports_parsing_error_and_keeps_record() {
    let content = "ID,Date,Time,SOC\nINV-1,2025-09-28\nINV-2,2025-09-28,8:00,50,extra\n";
    let result = TelemetryParser::default().parse(content);

    assert_eq!(result.total_rows, 2);
    assert_eq!(result.successful_rows, 2);

    let parsing: Vec<usize> = result
        .errors
        .iter()
        .filter(|e| e.field == PARSING_FIELD)
        .map(|e| e.row)
        .collect();
    assert_eq!(parsing, vec![2, 3]);
    assert!(
        result
            .errors
            .iter()
            .filter(|e| e.field == PARSING_FIELD)
            .all(|e| e.kind == ErrorKind::Format)
    );

    // Structural error comes first, then the short row's missing time
    assert_eq!(result.errors[0].field, PARSING_FIELD);
    assert_eq!(result.errors[1].field, "Time");
    assert_eq!(result.data[1].battery.soc, 50.0);
}

#[test]
fn test_empty_input_is_file_level_error() {
    for content in ["", "   \n \n"] {
        let result = TelemetryParser::default().parse(content);

        assert_eq!(result.total_rows, 0);
        assert_eq!(result.successful_rows, 0);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].field, FILE_FIELD);
        assert_eq!(result.errors[0].kind, ErrorKind::Format);
    }
}

#[test]
fn test_header_only_input() {
    let result = TelemetryParser::default().parse(LEGACY_HEADER);

    assert_eq!(result.total_rows, 0);
    assert!(result.errors.is_empty());
    assert!(result.data.is_empty());
}

#[test]
fn test_unknown_columns_do_not_error() {
    let content = "ID,Date,Time,Firmware\nINV-1,2025-09-28,8:00,v2.1.7\n";
    let result = TelemetryParser::default().parse(content);

    assert!(result.errors.is_empty());
    assert_eq!(result.successful_rows, 1);
}

#[test]
fn test_quoted_fields() {
    let content = "ID,Name,Date,Time\nINV-1,\"Barn, east roof\",2025-09-28,8:00\n";
    let result = TelemetryParser::default().parse(content);

    assert_eq!(result.data[0].user.name, "Barn, east roof");
}

#[test]
fn test_semicolon_delimiter() {
    let parser = TelemetryParser::new(ParserConfig::default().with_delimiter(';')).unwrap();
    let content = "ID;Date;Time;SOC\nINV-1;2025-09-28;8:00;77\n";
    let result = parser.parse(content);

    assert!(result.errors.is_empty());
    assert_eq!(result.data[0].battery.soc, 77.0);
}

#[test]
fn test_unusable_delimiter_is_rejected_up_front() {
    for delimiter in ['§', '\r', '\n', '"'] {
        let config = ParserConfig::default().with_delimiter(delimiter);
        assert!(TelemetryParser::new(config).is_err(), "{:?}", delimiter);
    }
}

#[test]
fn test_successful_rows_invariant() {
    let rows = [
        FULL_ROW.to_string(),
        sparse_row(&[(3, "10:45")]),
        sparse_row(&[(0, "INV-9")]),
        sparse_row(&[(2, "2025-13-01")]),
        sparse_row(&[(2, "2025-09-28"), (6, "x")]),
    ];
    let row_refs: Vec<&str> = rows.iter().map(String::as_str).collect();
    let result = TelemetryParser::default().parse(&legacy_csv(&row_refs));

    assert_eq!(result.total_rows, 5);
    assert_eq!(result.successful_rows, result.data.len());
    // Rows 3 (time only) and 5 (invalid date, no id) are unidentifiable
    assert_eq!(result.successful_rows, 3);
    assert!(result.successful_rows <= result.total_rows);
}

#[tokio::test]
async fn test_parse_async_matches_sync() {
    let parser = TelemetryParser::default();
    let content = legacy_csv(&[FULL_ROW, &sparse_row(&[(3, "10:45")])]);

    let async_result = parser.parse_async(content.clone()).await.unwrap();
    assert_eq!(async_result, parser.parse(&content));
}
