//! Application constants for inverter telemetry ingestion
//!
//! This module contains the physical validation ranges, header names, placeholder
//! values and aggregation defaults used throughout the library.

// =============================================================================
// Physical Validation Ranges
// =============================================================================

/// Accepted ranges per physical quantity, as `(min, max)` inclusive
pub mod limits {
    /// DC/AC voltage in volts
    pub const VOLTAGE: (f64, f64) = (0.0, 300.0);

    /// Current in amperes (signed: battery charge is positive, discharge negative)
    pub const CURRENT: (f64, f64) = (-100.0, 100.0);

    /// Instantaneous power in watts
    pub const POWER: (f64, f64) = (0.0, 10_000.0);

    /// Energy counters
    pub const ENERGY: (f64, f64) = (0.0, 100_000.0);

    /// Battery temperature in degrees Celsius
    pub const TEMPERATURE: (f64, f64) = (-40.0, 80.0);

    /// Battery state of charge in percent
    pub const SOC: (f64, f64) = (0.0, 100.0);

    /// AC frequency in hertz
    pub const FREQUENCY: (f64, f64) = (45.0, 65.0);
}

// =============================================================================
// Field Placeholders
// =============================================================================

/// Marker the loggers write for "no reading"
pub const NO_READING_MARKER: &str = "-";

/// Status code used when the logger leaves the hex column empty
pub const DEFAULT_STATUS_HEX: &str = "0x00";

/// Accepted spellings for a positive blackout flag (compared case-insensitively)
pub const BLACKOUT_TRUE_VALUES: &[&str] = &["true", "1", "yes"];

/// Accepted spellings for a negative blackout flag (compared case-insensitively)
pub const BLACKOUT_FALSE_VALUES: &[&str] = &["false", "0", "no"];

/// Field name attached to tokenizer-level errors
pub const PARSING_FIELD: &str = "parsing";

/// Field name attached to the single error reported when the input is unusable
pub const FILE_FIELD: &str = "file";

// =============================================================================
// Header Names
// =============================================================================

/// Legacy header texts that the loggers repeat across subsystems
///
/// Each duplicate is disambiguated by its occurrence order; see
/// [`crate::app::services::telemetry_parser::column_mapping`].
pub mod legacy_headers {
    pub const TOTAL_KWH: &str = "Total kWh";
    pub const VOLTAGE: &str = "Voltage";
    pub const CURRENT: &str = "Current";
    pub const POWER_W: &str = "Power W";
    pub const DAILY_WH: &str = "Daily Wh";
    pub const MONTHLY_WD: &str = "Monthly Wd";
    pub const YEARLY_WM: &str = "Yearly Wm";
    pub const FREQUENCY: &str = "Frequency";
    pub const TEMPERATURE: &str = "Temperature";
    pub const SOC: &str = "SOC";
    pub const HEX: &str = "Hex";
    pub const STATUS: &str = "Status";
}

// =============================================================================
// Error Reporting
// =============================================================================

/// Maximum number of example lines listed per error kind
pub const DEFAULT_MAX_ERROR_EXAMPLES: usize = 5;

/// Text returned when there is nothing to report
pub const NO_ERRORS_TEXT: &str = "No errors";

/// Success rate (percent) above which a parse is considered healthy
pub const SUCCESS_RATE_THRESHOLD: f64 = 90.0;

// =============================================================================
// Record History
// =============================================================================

/// Default number of records retained by a live record history
pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

// =============================================================================
// CLI Defaults
// =============================================================================

/// File extension picked up when walking input directories
pub const TELEMETRY_FILE_EXTENSION: &str = "csv";
