//! Test utilities for telemetry parser testing
//!
//! This module provides sample logger exports and helpers shared by the
//! component test modules.

mod parser_tests;
mod stats_tests;

/// Header exactly as the loggers write it, with duplicated subsystem columns
pub const LEGACY_HEADER: &str = "ID,Name,Date,Time,Blackout,Total kWh,Voltage,Current,Power W,\
Daily Wh,Monthly Wd,Yearly Wm,Total kWh,Voltage,Current,Temperature,SOC,Voltage,Current,\
Frequency,Voltage,Current,Frequency,Hex";

/// Number of columns in [`LEGACY_HEADER`]
pub const LEGACY_COLUMN_COUNT: usize = 24;

/// A fully populated, in-range data row matching [`LEGACY_HEADER`]
pub const FULL_ROW: &str = "INV-001,Rooftop,2025-09-28,10:30,false,1520.5,182.4,6.1,1112,\
5400,120,1400,9800,52.8,-12.5,24,87,230.1,4.2,50,229.8,0.4,49.98,0x03";

/// Header using canonical column names
pub const CANONICAL_HEADER: &str = "ID,Name,Date,Time,Blackout,Supply_TotalKWh,PV_Voltage,\
PV_Current,PV_PowerW,PV_DailyWh,PV_MonthlyWd,PV_YearlyWm,PV_TotalKWh,Battery_Voltage,\
Battery_Current,Battery_Temperature,Battery_SOC,Inverter_Voltage,Inverter_Current,\
Inverter_Frequency,Grid_Voltage,Grid_Current,Grid_Frequency,Status_Hex";

/// Build a legacy-layout row with only the given (column index, value) cells filled
pub fn sparse_row(cells: &[(usize, &str)]) -> String {
    let mut fields = vec![""; LEGACY_COLUMN_COUNT];
    for &(index, value) in cells {
        fields[index] = value;
    }
    fields.join(",")
}

/// A complete legacy export from the given data rows
pub fn legacy_csv(rows: &[&str]) -> String {
    let mut content = String::from(LEGACY_HEADER);
    for row in rows {
        content.push('\n');
        content.push_str(row);
    }
    content.push('\n');
    content
}
