//! Header alias resolution for logger CSV exports
//!
//! The loggers reuse identical header texts ("Voltage", "Current", "Total kWh", ...)
//! for different subsystems and distinguish them only by position. This module
//! builds, once per parse, a table from column index to [`CanonicalField`]:
//!
//! - canonical names (`PV_Voltage`, `Battery SOC`, ...) map directly, case-insensitively
//! - legacy duplicate names map by occurrence order onto the fields of their
//!   subsystem sequence that no canonical column already claims
//! - anything else is recorded as ignored

use crate::constants::legacy_headers;
use csv::StringRecord;
use std::collections::HashMap;

/// Disambiguated identity of every column the parser understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CanonicalField {
    Id,
    Name,
    Date,
    Time,
    Blackout,
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
    StatusHex,
}

impl CanonicalField {
    /// All fields in row-assembly order
    pub const ALL: [CanonicalField; 24] = [
        CanonicalField::Id,
        CanonicalField::Name,
        CanonicalField::Date,
        CanonicalField::Time,
        CanonicalField::Blackout,
        CanonicalField::SupplyTotalKwh,
        CanonicalField::PvVoltage,
        CanonicalField::PvCurrent,
        CanonicalField::PvPowerW,
        CanonicalField::PvDailyWh,
        CanonicalField::PvMonthlyWd,
        CanonicalField::PvYearlyWm,
        CanonicalField::PvTotalKwh,
        CanonicalField::BatteryVoltage,
        CanonicalField::BatteryCurrent,
        CanonicalField::BatteryTemperature,
        CanonicalField::BatterySoc,
        CanonicalField::InverterVoltage,
        CanonicalField::InverterCurrent,
        CanonicalField::InverterFrequency,
        CanonicalField::GridVoltage,
        CanonicalField::GridCurrent,
        CanonicalField::GridFrequency,
        CanonicalField::StatusHex,
    ];

    /// Canonical header name, also used as the field name in parse errors
    pub fn name(self) -> &'static str {
        match self {
            CanonicalField::Id => "ID",
            CanonicalField::Name => "Name",
            CanonicalField::Date => "Date",
            CanonicalField::Time => "Time",
            CanonicalField::Blackout => "Blackout",
            CanonicalField::SupplyTotalKwh => "Supply_TotalKWh",
            CanonicalField::PvVoltage => "PV_Voltage",
            CanonicalField::PvCurrent => "PV_Current",
            CanonicalField::PvPowerW => "PV_PowerW",
            CanonicalField::PvDailyWh => "PV_DailyWh",
            CanonicalField::PvMonthlyWd => "PV_MonthlyWd",
            CanonicalField::PvYearlyWm => "PV_YearlyWm",
            CanonicalField::PvTotalKwh => "PV_TotalKWh",
            CanonicalField::BatteryVoltage => "Battery_Voltage",
            CanonicalField::BatteryCurrent => "Battery_Current",
            CanonicalField::BatteryTemperature => "Battery_Temperature",
            CanonicalField::BatterySoc => "Battery_SOC",
            CanonicalField::InverterVoltage => "Inverter_Voltage",
            CanonicalField::InverterCurrent => "Inverter_Current",
            CanonicalField::InverterFrequency => "Inverter_Frequency",
            CanonicalField::GridVoltage => "Grid_Voltage",
            CanonicalField::GridCurrent => "Grid_Current",
            CanonicalField::GridFrequency => "Grid_Frequency",
            CanonicalField::StatusHex => "Status_Hex",
        }
    }

    /// Look up a field by its canonical name (already normalized)
    fn from_normalized(normalized: &str) -> Option<Self> {
        CanonicalField::ALL
            .into_iter()
            .find(|field| normalize_header(field.name()) == normalized)
    }
}

impl std::fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Normalize a header for comparison: trimmed, lowercase, `_` as separator
pub fn normalize_header(header: &str) -> String {
    header
        .trim()
        .chars()
        .map(|c| match c {
            ' ' | '-' => '_',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}

/// Fields a legacy header text stands for, in order of appearance
fn legacy_targets(normalized: &str) -> Option<&'static [CanonicalField]> {
    use CanonicalField::*;

    const TOTAL_KWH: &[CanonicalField] = &[SupplyTotalKwh, PvTotalKwh];
    const VOLTAGE: &[CanonicalField] = &[PvVoltage, BatteryVoltage, InverterVoltage, GridVoltage];
    const CURRENT: &[CanonicalField] = &[PvCurrent, BatteryCurrent, InverterCurrent, GridCurrent];
    const FREQUENCY: &[CanonicalField] = &[InverterFrequency, GridFrequency];

    let table: [(&str, &'static [CanonicalField]); 12] = [
        (legacy_headers::TOTAL_KWH, TOTAL_KWH),
        (legacy_headers::VOLTAGE, VOLTAGE),
        (legacy_headers::CURRENT, CURRENT),
        (legacy_headers::POWER_W, &[PvPowerW]),
        (legacy_headers::DAILY_WH, &[PvDailyWh]),
        (legacy_headers::MONTHLY_WD, &[PvMonthlyWd]),
        (legacy_headers::YEARLY_WM, &[PvYearlyWm]),
        (legacy_headers::FREQUENCY, FREQUENCY),
        (legacy_headers::TEMPERATURE, &[BatteryTemperature]),
        (legacy_headers::SOC, &[BatterySoc]),
        (legacy_headers::HEX, &[StatusHex]),
        (legacy_headers::STATUS, &[StatusHex]),
    ];

    table
        .into_iter()
        .find(|(legacy, _)| normalize_header(legacy) == normalized)
        .map(|(_, targets)| targets)
}

/// Column mapping resolved from a header row
#[derive(Debug, Clone, Default)]
pub struct ColumnMapping {
    /// Canonical field to column index
    pub field_to_index: HashMap<CanonicalField, usize>,

    /// Headers that did not resolve to any field (trimmed, in column order)
    pub ignored_columns: Vec<String>,

    /// Number of columns in the header row
    pub column_count: usize,

    /// Number of resolved fields that came from a legacy alias
    pub aliased_fields: usize,
}

impl ColumnMapping {
    /// Resolve a CSV header record
    pub fn analyze(headers: &StringRecord) -> Self {
        Self::from_headers(headers.iter())
    }

    /// Resolve header names given in column order
    ///
    /// Canonical columns are claimed first. Each legacy occurrence then takes
    /// the next target of its sequence that no canonical column holds.
    pub fn from_headers<'a>(headers: impl IntoIterator<Item = &'a str>) -> Self {
        let normalized: Vec<(&str, String)> = headers
            .into_iter()
            .map(|header| (header, normalize_header(header)))
            .collect();

        let mut canonical: HashMap<CanonicalField, usize> = HashMap::new();
        let mut canonical_columns = vec![false; normalized.len()];
        for (index, (_, name)) in normalized.iter().enumerate() {
            if let Some(field) = CanonicalField::from_normalized(name) {
                canonical.entry(field).or_insert(index);
                canonical_columns[index] = true;
            }
        }

        let mut legacy: HashMap<CanonicalField, usize> = HashMap::new();
        let mut occurrences: HashMap<&str, usize> = HashMap::new();
        let mut ignored_columns = Vec::new();

        for (index, (header, name)) in normalized.iter().enumerate() {
            if canonical_columns[index] {
                continue;
            }

            if let Some(targets) = legacy_targets(name) {
                let seen = occurrences.entry(name.as_str()).or_insert(0);
                let target = targets
                    .iter()
                    .filter(|field| !canonical.contains_key(*field))
                    .nth(*seen)
                    .copied();
                *seen += 1;

                if let Some(field) = target {
                    legacy.entry(field).or_insert(index);
                    continue;
                }
            }

            ignored_columns.push(header.trim().to_string());
        }

        let aliased_fields = legacy.len();
        let column_count = normalized.len();

        let mut field_to_index = legacy;
        field_to_index.extend(canonical);

        ColumnMapping {
            field_to_index,
            ignored_columns,
            column_count,
            aliased_fields,
        }
    }

    /// Get the column index for a field
    pub fn get_index(&self, field: CanonicalField) -> Option<usize> {
        self.field_to_index.get(&field).copied()
    }

    /// Check if a field is present in the header
    pub fn has_field(&self, field: CanonicalField) -> bool {
        self.field_to_index.contains_key(&field)
    }

    /// Get statistics about the mapping: (columns, resolved, aliased, ignored)
    pub fn stats(&self) -> (usize, usize, usize, usize) {
        (
            self.column_count,
            self.field_to_index.len(),
            self.aliased_fields,
            self.ignored_columns.len(),
        )
    }
}

/// One data row keyed by canonical field
#[derive(Debug, Clone, Default)]
pub struct RawRow<'a> {
    values: HashMap<CanonicalField, &'a str>,
}

impl<'a> RawRow<'a> {
    /// Pick the mapped columns out of a CSV record
    ///
    /// Columns missing from a short record are simply absent.
    pub fn from_record(record: &'a StringRecord, mapping: &ColumnMapping) -> Self {
        let values = mapping
            .field_to_index
            .iter()
            .filter_map(|(&field, &index)| record.get(index).map(|value| (field, value)))
            .collect();
        Self { values }
    }

    /// Build a row from header-name/value pairs, resolving names like a header row
    pub fn from_pairs(pairs: &[(&'a str, &'a str)]) -> Self {
        let mapping = ColumnMapping::from_headers(pairs.iter().map(|(name, _)| *name));
        let values = mapping
            .field_to_index
            .iter()
            .map(|(&field, &index)| (field, pairs[index].1))
            .collect();
        Self { values }
    }

    /// Raw value for a field, if the column exists
    pub fn get(&self, field: CanonicalField) -> Option<&'a str> {
        self.values.get(&field).copied()
    }

    /// Number of fields present in the row
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
