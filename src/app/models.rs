//! Data models for inverter telemetry
//!
//! This module contains the core data structures for one parsed logger row: the
//! device/timestamp header, the six measured subsystems, and the status word.
//! Field names serialize in the loggers' own camel-case vocabulary
//! (`totalKWh`, `powerW`, ...) so JSON output lines up with the exports.

pub mod parse_error;

pub use parse_error::{ErrorKind, ParseError};

use crate::{Error, Result};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

// =============================================================================
// Record Structure
// =============================================================================

/// Logger timestamp as written in the export, plus the combined instant
///
/// `datetime` is only present when both `date` and `time` passed validation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Timestamp {
    /// Calendar date, `YYYY-MM-DD`
    pub date: String,

    /// Time of day, `H:MM` or `HH:MM`
    pub time: String,

    /// Combined local instant (the loggers do not record a time zone)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datetime: Option<NaiveDateTime>,
}

/// Device identification and grid-outage flag
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: String,
    pub name: String,
    pub timestamp: Timestamp,

    /// `Some(true)` during a blackout, `None` when the logger did not say
    pub blackout: Option<bool>,
}

/// Energy delivered by the inverter
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct InverterSupply {
    #[serde(rename = "totalKWh")]
    pub total_kwh: f64,
}

/// Photovoltaic array readings
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PvData {
    pub voltage: f64,
    pub current: f64,
    #[serde(rename = "powerW")]
    pub power_w: f64,
    #[serde(rename = "dailyWh")]
    pub daily_wh: f64,
    #[serde(rename = "monthlyWd")]
    pub monthly_wd: f64,
    #[serde(rename = "yearlyWm")]
    pub yearly_wm: f64,
    #[serde(rename = "totalKWh")]
    pub total_kwh: f64,
}

/// Battery bank readings
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BatteryData {
    pub voltage: f64,

    /// Positive while charging, negative while discharging
    pub current: f64,

    pub temperature: f64,

    /// State of charge in percent
    pub soc: f64,
}

/// Inverter AC output readings
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct InverterData {
    pub voltage: f64,
    pub current: f64,
    pub frequency: f64,
}

/// Utility grid readings
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GridData {
    pub voltage: f64,
    pub current: f64,
    pub frequency: f64,
}

/// Raw status word reported by the inverter
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SystemStatus {
    /// Status code, `0x` followed by hex digits
    pub hex: String,

    /// Decoded status bits; reserved, never filled by the parser
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flags: Option<BTreeMap<String, bool>>,
}

/// One fully parsed telemetry row
///
/// Only the row assembler creates these; callers own them outright.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InverterRecord {
    pub user: UserRecord,
    pub supply: InverterSupply,
    pub pv: PvData,
    pub battery: BatteryData,
    pub inverter: InverterData,
    pub grid: GridData,
    pub status: SystemStatus,
}

impl InverterRecord {
    /// Combined timestamp, if both date and time were valid
    pub fn datetime(&self) -> Option<NaiveDateTime> {
        self.user.timestamp.datetime
    }

    /// Read a numeric field by its path
    pub fn value(&self, field: RecordField) -> f64 {
        field.value_of(self)
    }
}

// =============================================================================
// Numeric Field Paths
// =============================================================================

/// Every numeric field of an [`InverterRecord`], addressable by dotted path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum RecordField {
    SupplyTotalKwh,
    PvVoltage,
    PvCurrent,
    PvPowerW,
    PvDailyWh,
    PvMonthlyWd,
    PvYearlyWm,
    PvTotalKwh,
    BatteryVoltage,
    BatteryCurrent,
    BatteryTemperature,
    BatterySoc,
    InverterVoltage,
    InverterCurrent,
    InverterFrequency,
    GridVoltage,
    GridCurrent,
    GridFrequency,
}

impl RecordField {
    /// All numeric fields in record order
    pub const ALL: [RecordField; 18] = [
        RecordField::SupplyTotalKwh,
        RecordField::PvVoltage,
        RecordField::PvCurrent,
        RecordField::PvPowerW,
        RecordField::PvDailyWh,
        RecordField::PvMonthlyWd,
        RecordField::PvYearlyWm,
        RecordField::PvTotalKwh,
        RecordField::BatteryVoltage,
        RecordField::BatteryCurrent,
        RecordField::BatteryTemperature,
        RecordField::BatterySoc,
        RecordField::InverterVoltage,
        RecordField::InverterCurrent,
        RecordField::InverterFrequency,
        RecordField::GridVoltage,
        RecordField::GridCurrent,
        RecordField::GridFrequency,
    ];

    /// Fields reduced by the aggregation engine when none are requested
    pub const AGGREGATION_DEFAULTS: [RecordField; 5] = [
        RecordField::PvPowerW,
        RecordField::BatteryVoltage,
        RecordField::BatterySoc,
        RecordField::InverterVoltage,
        RecordField::GridVoltage,
    ];

    /// Dotted path into the nested record
    pub fn path(self) -> &'static str {
        match self {
            RecordField::SupplyTotalKwh => "supply.totalKWh",
            RecordField::PvVoltage => "pv.voltage",
            RecordField::PvCurrent => "pv.current",
            RecordField::PvPowerW => "pv.powerW",
            RecordField::PvDailyWh => "pv.dailyWh",
            RecordField::PvMonthlyWd => "pv.monthlyWd",
            RecordField::PvYearlyWm => "pv.yearlyWm",
            RecordField::PvTotalKwh => "pv.totalKWh",
            RecordField::BatteryVoltage => "battery.voltage",
            RecordField::BatteryCurrent => "battery.current",
            RecordField::BatteryTemperature => "battery.temperature",
            RecordField::BatterySoc => "battery.soc",
            RecordField::InverterVoltage => "inverter.voltage",
            RecordField::InverterCurrent => "inverter.current",
            RecordField::InverterFrequency => "inverter.frequency",
            RecordField::GridVoltage => "grid.voltage",
            RecordField::GridCurrent => "grid.current",
            RecordField::GridFrequency => "grid.frequency",
        }
    }

    /// Read this field from a record
    pub fn value_of(self, record: &InverterRecord) -> f64 {
        match self {
            RecordField::SupplyTotalKwh => record.supply.total_kwh,
            RecordField::PvVoltage => record.pv.voltage,
            RecordField::PvCurrent => record.pv.current,
            RecordField::PvPowerW => record.pv.power_w,
            RecordField::PvDailyWh => record.pv.daily_wh,
            RecordField::PvMonthlyWd => record.pv.monthly_wd,
            RecordField::PvYearlyWm => record.pv.yearly_wm,
            RecordField::PvTotalKwh => record.pv.total_kwh,
            RecordField::BatteryVoltage => record.battery.voltage,
            RecordField::BatteryCurrent => record.battery.current,
            RecordField::BatteryTemperature => record.battery.temperature,
            RecordField::BatterySoc => record.battery.soc,
            RecordField::InverterVoltage => record.inverter.voltage,
            RecordField::InverterCurrent => record.inverter.current,
            RecordField::InverterFrequency => record.inverter.frequency,
            RecordField::GridVoltage => record.grid.voltage,
            RecordField::GridCurrent => record.grid.current,
            RecordField::GridFrequency => record.grid.frequency,
        }
    }
}

impl FromStr for RecordField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        RecordField::ALL
            .into_iter()
            .find(|field| field.path().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::unknown_field(wanted))
    }
}

impl TryFrom<String> for RecordField {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<RecordField> for String {
    fn from(field: RecordField) -> Self {
        field.path().to_string()
    }
}

impl std::fmt::Display for RecordField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_record() -> InverterRecord {
        InverterRecord {
            supply: InverterSupply { total_kwh: 1520.5 },
            pv: PvData {
                voltage: 182.4,
                current: 6.1,
                power_w: 1112.0,
                daily_wh: 5400.0,
                monthly_wd: 120.0,
                yearly_wm: 1400.0,
                total_kwh: 9800.0,
            },
            battery: BatteryData {
                voltage: 52.8,
                current: -12.5,
                temperature: 24.0,
                soc: 87.0,
            },
            inverter: InverterData {
                voltage: 230.1,
                current: 4.2,
                frequency: 50.0,
            },
            grid: GridData {
                voltage: 229.8,
                current: 0.4,
                frequency: 49.98,
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_record_field_paths_round_trip() {
        for field in RecordField::ALL {
            assert_eq!(field.path().parse::<RecordField>().unwrap(), field);
        }
    }

    #[test]
    fn test_record_field_parse_is_case_insensitive() {
        assert_eq!(
            "PV.POWERW".parse::<RecordField>().unwrap(),
            RecordField::PvPowerW
        );
        assert_eq!(
            " battery.soc ".parse::<RecordField>().unwrap(),
            RecordField::BatterySoc
        );
    }

    #[test]
    fn test_unknown_record_field() {
        let err = "pv.efficiency".parse::<RecordField>().unwrap_err();
        assert!(matches!(err, Error::UnknownField { ref path } if path == "pv.efficiency"));
    }

    #[test]
    fn test_value_of_reads_nested_fields() {
        let record = create_test_record();
        assert_eq!(record.value(RecordField::SupplyTotalKwh), 1520.5);
        assert_eq!(record.value(RecordField::PvPowerW), 1112.0);
        assert_eq!(record.value(RecordField::BatteryCurrent), -12.5);
        assert_eq!(record.value(RecordField::GridFrequency), 49.98);
    }

    #[test]
    fn test_record_serializes_logger_field_names() {
        let json = serde_json::to_value(create_test_record()).unwrap();
        assert_eq!(json["supply"]["totalKWh"], 1520.5);
        assert_eq!(json["pv"]["powerW"], 1112.0);
        assert_eq!(json["pv"]["monthlyWd"], 120.0);
        assert!(json["user"]["blackout"].is_null());
        assert!(json["user"]["timestamp"].get("datetime").is_none());
    }

    #[test]
    fn test_record_field_serde_uses_path() {
        let json = serde_json::to_string(&RecordField::BatterySoc).unwrap();
        assert_eq!(json, "\"battery.soc\"");
        let field: RecordField = serde_json::from_str("\"grid.voltage\"").unwrap();
        assert_eq!(field, RecordField::GridVoltage);
        assert!(serde_json::from_str::<RecordField>("\"grid.power\"").is_err());
    }
}
