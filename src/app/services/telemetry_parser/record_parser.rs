//! Row assembly for logger telemetry
//!
//! Runs every field of one row through its validator in a fixed order
//! (user/timestamp, supply, PV, battery, inverter, grid, status), collects all
//! errors rather than stopping at the first, and decides whether the row is
//! identifiable enough to become a record.

use tracing::debug;

use super::column_mapping::{CanonicalField, RawRow};
use super::field_parsers::{
    Quantity, combine_date_time, validate_blackout, validate_date, validate_hex,
    validate_quantity, validate_time,
};
use crate::app::models::{
    BatteryData, GridData, InverterData, InverterRecord, InverterSupply, ParseError, PvData,
    SystemStatus, Timestamp, UserRecord,
};
use crate::config::ValidationLimits;

/// Result of assembling one row
#[derive(Debug, Clone, Default)]
pub struct RowOutcome {
    /// The record, unless the row had neither a device id nor a date
    pub record: Option<InverterRecord>,

    /// Every problem found in the row, in field order
    pub errors: Vec<ParseError>,
}

impl RowOutcome {
    pub fn is_accepted(&self) -> bool {
        self.record.is_some()
    }
}

/// Validates fields of a single row and accumulates their errors
struct FieldCollector<'r, 'a> {
    row: &'r RawRow<'a>,
    row_number: usize,
    limits: &'r ValidationLimits,
    errors: Vec<ParseError>,
}

impl<'r, 'a> FieldCollector<'r, 'a> {
    fn keep<T>(&mut self, (value, error): (T, Option<ParseError>)) -> T {
        if let Some(error) = error {
            self.errors.push(error);
        }
        value
    }

    fn text(&self, field: CanonicalField) -> String {
        self.row
            .get(field)
            .map(|value| value.trim().to_string())
            .unwrap_or_default()
    }

    fn number(&mut self, field: CanonicalField, quantity: Quantity) -> f64 {
        let validated = validate_quantity(
            self.row.get(field),
            field.name(),
            quantity,
            self.limits,
            self.row_number,
        );
        self.keep(validated)
    }
}

/// Assemble one header-keyed row into a record
///
/// A row is rejected (no record, errors still returned) only when both the
/// device id and the validated date are empty. Every other row becomes a
/// record, with fallback values standing in for fields that failed validation.
pub fn assemble_record(
    row: &RawRow<'_>,
    row_number: usize,
    limits: &ValidationLimits,
) -> RowOutcome {
    use CanonicalField::*;

    let mut fields = FieldCollector {
        row,
        row_number,
        limits,
        errors: Vec::new(),
    };

    // User and timestamp
    let id = fields.text(Id);
    let name = fields.text(Name);
    let date = fields.keep(validate_date(row.get(Date), Date.name(), row_number));
    let time = fields.keep(validate_time(row.get(Time), Time.name(), row_number));
    let datetime = if date.is_empty() || time.is_empty() {
        None
    } else {
        combine_date_time(&date, &time)
    };
    let blackout = fields.keep(validate_blackout(
        row.get(Blackout),
        Blackout.name(),
        row_number,
    ));

    let supply = InverterSupply {
        total_kwh: fields.number(SupplyTotalKwh, Quantity::Energy),
    };

    let pv = PvData {
        voltage: fields.number(PvVoltage, Quantity::Voltage),
        current: fields.number(PvCurrent, Quantity::Current),
        power_w: fields.number(PvPowerW, Quantity::Power),
        daily_wh: fields.number(PvDailyWh, Quantity::Energy),
        monthly_wd: fields.number(PvMonthlyWd, Quantity::Energy),
        yearly_wm: fields.number(PvYearlyWm, Quantity::Energy),
        total_kwh: fields.number(PvTotalKwh, Quantity::Energy),
    };

    let battery = BatteryData {
        voltage: fields.number(BatteryVoltage, Quantity::Voltage),
        current: fields.number(BatteryCurrent, Quantity::Current),
        temperature: fields.number(BatteryTemperature, Quantity::Temperature),
        soc: fields.number(BatterySoc, Quantity::Soc),
    };

    let inverter = InverterData {
        voltage: fields.number(InverterVoltage, Quantity::Voltage),
        current: fields.number(InverterCurrent, Quantity::Current),
        frequency: fields.number(InverterFrequency, Quantity::Frequency),
    };

    let grid = GridData {
        voltage: fields.number(GridVoltage, Quantity::Voltage),
        current: fields.number(GridCurrent, Quantity::Current),
        frequency: fields.number(GridFrequency, Quantity::Frequency),
    };

    let hex = fields.keep(validate_hex(row.get(StatusHex), StatusHex.name(), row_number));

    let errors = fields.errors;

    if id.is_empty() && date.is_empty() {
        debug!(
            "Row {} has neither a device id nor a valid date; skipped with {} errors",
            row_number,
            errors.len()
        );
        return RowOutcome {
            record: None,
            errors,
        };
    }

    let record = InverterRecord {
        user: UserRecord {
            id,
            name,
            timestamp: Timestamp {
                date,
                time,
                datetime,
            },
            blackout,
        },
        supply,
        pv,
        battery,
        inverter,
        grid,
        status: SystemStatus { hex, flags: None },
    };

    RowOutcome {
        record: Some(record),
        errors,
    }
}
