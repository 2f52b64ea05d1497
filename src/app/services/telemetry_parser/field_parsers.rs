//! Field validators for logger telemetry
//!
//! Every validator is a pure function returning the coerced value together with
//! an optional [`ParseError`]. Validators never fail the caller: a rejected field
//! yields its fallback value (`0`, an empty string, unknown, or `0x00`) plus the
//! error describing why.
//!
//! Out-of-range numbers are the exception to the fallback rule: the parsed value
//! is returned as-is and flagged, never clamped, so recorded telemetry is not
//! silently altered.

use crate::app::models::ParseError;
use crate::config::{ValidationLimits, ValueRange};
use crate::constants::{
    BLACKOUT_FALSE_VALUES, BLACKOUT_TRUE_VALUES, DEFAULT_STATUS_HEX, NO_READING_MARKER, limits,
};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use std::sync::LazyLock;

static DATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("valid date pattern"));

static TIME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{1,2}):([0-9]{2})$").expect("valid time pattern"));

static HEX_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^0x[0-9A-Fa-f]+$").expect("valid hex pattern"));

/// Coerced value plus the error that explains any coercion
pub type Validated<T> = (T, Option<ParseError>);

/// Physical quantity a numeric column measures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantity {
    Voltage,
    Current,
    Power,
    Energy,
    Temperature,
    Soc,
    Frequency,
}

impl Quantity {
    /// Range configured for this quantity
    pub fn range(self, limits: &ValidationLimits) -> ValueRange {
        match self {
            Quantity::Voltage => limits.voltage,
            Quantity::Current => limits.current,
            Quantity::Power => limits.power,
            Quantity::Energy => limits.energy,
            Quantity::Temperature => limits.temperature,
            Quantity::Soc => limits.soc,
            Quantity::Frequency => limits.frequency,
        }
    }
}

/// Check whether a raw value means "no reading" (absent, empty, or `-`)
pub fn is_blank(raw: Option<&str>) -> bool {
    match raw.map(str::trim) {
        None => true,
        Some(value) => value.is_empty() || value == NO_READING_MARKER,
    }
}

/// Validate a numeric field against an inclusive range
///
/// - blank input gives `0` with no error
/// - non-numeric input gives `0` and a `conversion` error
/// - out-of-range input keeps the parsed value and adds a `validation` error
pub fn validate_number(
    raw: Option<&str>,
    field_name: &str,
    min: f64,
    max: f64,
    row: usize,
) -> Validated<f64> {
    if is_blank(raw) {
        return (0.0, None);
    }
    let value_str = raw.unwrap_or_default().trim();

    let value = match value_str.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => {
            return (
                0.0,
                Some(ParseError::conversion(
                    row,
                    field_name,
                    value_str,
                    format!("Invalid number format for {}: '{}'", field_name, value_str),
                )),
            );
        }
    };

    if value < min || value > max {
        return (
            value,
            Some(ParseError::validation(
                row,
                field_name,
                value_str,
                format!(
                    "{} value {} is outside the valid range [{}, {}]",
                    field_name, value, min, max
                ),
            )),
        );
    }

    (value, None)
}

/// Validate a numeric field using the configured range for its quantity
pub fn validate_quantity(
    raw: Option<&str>,
    field_name: &str,
    quantity: Quantity,
    limits: &ValidationLimits,
    row: usize,
) -> Validated<f64> {
    let range = quantity.range(limits);
    validate_number(raw, field_name, range.min, range.max, row)
}

/// Voltage in volts, [0, 300]
pub fn validate_voltage(raw: Option<&str>, field_name: &str, row: usize) -> Validated<f64> {
    validate_number(raw, field_name, limits::VOLTAGE.0, limits::VOLTAGE.1, row)
}

/// Current in amperes, [-100, 100]
pub fn validate_current(raw: Option<&str>, field_name: &str, row: usize) -> Validated<f64> {
    validate_number(raw, field_name, limits::CURRENT.0, limits::CURRENT.1, row)
}

/// Power in watts, [0, 10000]
pub fn validate_power(raw: Option<&str>, field_name: &str, row: usize) -> Validated<f64> {
    validate_number(raw, field_name, limits::POWER.0, limits::POWER.1, row)
}

/// Energy counters, [0, 100000]
pub fn validate_energy(raw: Option<&str>, field_name: &str, row: usize) -> Validated<f64> {
    validate_number(raw, field_name, limits::ENERGY.0, limits::ENERGY.1, row)
}

/// Temperature in degrees Celsius, [-40, 80]
pub fn validate_temperature(raw: Option<&str>, field_name: &str, row: usize) -> Validated<f64> {
    validate_number(
        raw,
        field_name,
        limits::TEMPERATURE.0,
        limits::TEMPERATURE.1,
        row,
    )
}

/// State of charge in percent, [0, 100]
pub fn validate_soc(raw: Option<&str>, field_name: &str, row: usize) -> Validated<f64> {
    validate_number(raw, field_name, limits::SOC.0, limits::SOC.1, row)
}

/// Frequency in hertz, [45, 65]
pub fn validate_frequency(raw: Option<&str>, field_name: &str, row: usize) -> Validated<f64> {
    validate_number(raw, field_name, limits::FREQUENCY.0, limits::FREQUENCY.1, row)
}

/// Validate a required `YYYY-MM-DD` date
///
/// Returns the trimmed date on success and an empty string otherwise.
pub fn validate_date(raw: Option<&str>, field_name: &str, row: usize) -> Validated<String> {
    let value_str = raw.map(str::trim).unwrap_or_default();

    if value_str.is_empty() {
        return (
            String::new(),
            Some(ParseError::missing(
                row,
                field_name,
                format!("{} is required", field_name),
            )),
        );
    }

    if !DATE_PATTERN.is_match(value_str) {
        return (
            String::new(),
            Some(ParseError::format(
                row,
                field_name,
                value_str,
                format!(
                    "Invalid date format for {}: '{}' (expected YYYY-MM-DD)",
                    field_name, value_str
                ),
            )),
        );
    }

    if NaiveDate::parse_from_str(value_str, "%Y-%m-%d").is_err() {
        return (
            String::new(),
            Some(ParseError::validation(
                row,
                field_name,
                value_str,
                format!("'{}' is not a valid calendar date", value_str),
            )),
        );
    }

    (value_str.to_string(), None)
}

/// Validate a required `H:MM`/`HH:MM` time of day
///
/// Returns the trimmed time on success and an empty string otherwise.
pub fn validate_time(raw: Option<&str>, field_name: &str, row: usize) -> Validated<String> {
    let value_str = raw.map(str::trim).unwrap_or_default();

    if value_str.is_empty() {
        return (
            String::new(),
            Some(ParseError::missing(
                row,
                field_name,
                format!("{} is required", field_name),
            )),
        );
    }

    if parse_time(value_str).is_none() {
        return (
            String::new(),
            Some(ParseError::format(
                row,
                field_name,
                value_str,
                format!(
                    "Invalid time format for {}: '{}' (expected HH:MM, 00:00-23:59)",
                    field_name, value_str
                ),
            )),
        );
    }

    (value_str.to_string(), None)
}

/// Validate the tri-state blackout flag
///
/// Blank input is unknown without error; unrecognized text is unknown with a
/// `validation` error.
pub fn validate_blackout(raw: Option<&str>, field_name: &str, row: usize) -> Validated<Option<bool>> {
    if is_blank(raw) {
        return (None, None);
    }
    let value_str = raw.unwrap_or_default().trim();
    let lowered = value_str.to_ascii_lowercase();

    if BLACKOUT_TRUE_VALUES.contains(&lowered.as_str()) {
        (Some(true), None)
    } else if BLACKOUT_FALSE_VALUES.contains(&lowered.as_str()) {
        (Some(false), None)
    } else {
        (
            None,
            Some(ParseError::validation(
                row,
                field_name,
                value_str,
                format!(
                    "Invalid boolean for {}: '{}' (expected true/false, yes/no or 1/0)",
                    field_name, value_str
                ),
            )),
        )
    }
}

/// Validate a `0x`-prefixed hexadecimal status code
///
/// Empty input and rejected input both fall back to `0x00`.
pub fn validate_hex(raw: Option<&str>, field_name: &str, row: usize) -> Validated<String> {
    let value_str = raw.map(str::trim).unwrap_or_default();

    if value_str.is_empty() {
        return (DEFAULT_STATUS_HEX.to_string(), None);
    }

    if !HEX_PATTERN.is_match(value_str) {
        return (
            DEFAULT_STATUS_HEX.to_string(),
            Some(ParseError::format(
                row,
                field_name,
                value_str,
                format!(
                    "Invalid hex code for {}: '{}' (expected 0x followed by hex digits)",
                    field_name, value_str
                ),
            )),
        );
    }

    (value_str.to_string(), None)
}

/// Combine a validated date and time into one instant
pub fn combine_date_time(date: &str, time: &str) -> Option<NaiveDateTime> {
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
    let time = parse_time(time)?;
    Some(date.and_time(time))
}

fn parse_time(value_str: &str) -> Option<NaiveTime> {
    let captures = TIME_PATTERN.captures(value_str)?;
    let hour: u32 = captures[1].parse().ok()?;
    let minute: u32 = captures[2].parse().ok()?;
    if hour > 23 || minute > 59 {
        return None;
    }
    NaiveTime::from_hms_opt(hour, minute, 0)
}
