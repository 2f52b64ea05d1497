//! Configuration management and validation.
//!
//! Provides the parser configuration: the accepted range for every physical
//! quantity, the CSV delimiter, and how much detail the error report lists.
//! Defaults reproduce the ranges documented for the data loggers; a JSON file
//! may override any subset of them.

use crate::constants::{DEFAULT_MAX_ERROR_EXAMPLES, limits};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Inclusive numeric range accepted for a physical quantity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Check whether a value lies inside the range (bounds included)
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

impl From<(f64, f64)> for ValueRange {
    fn from((min, max): (f64, f64)) -> Self {
        Self::new(min, max)
    }
}

/// Accepted ranges for every validated quantity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationLimits {
    pub voltage: ValueRange,
    pub current: ValueRange,
    pub power: ValueRange,
    pub energy: ValueRange,
    pub temperature: ValueRange,
    pub soc: ValueRange,
    pub frequency: ValueRange,
}

impl Default for ValidationLimits {
    fn default() -> Self {
        Self {
            voltage: limits::VOLTAGE.into(),
            current: limits::CURRENT.into(),
            power: limits::POWER.into(),
            energy: limits::ENERGY.into(),
            temperature: limits::TEMPERATURE.into(),
            soc: limits::SOC.into(),
            frequency: limits::FREQUENCY.into(),
        }
    }
}

impl ValidationLimits {
    fn named_ranges(&self) -> [(&'static str, ValueRange); 7] {
        [
            ("voltage", self.voltage),
            ("current", self.current),
            ("power", self.power),
            ("energy", self.energy),
            ("temperature", self.temperature),
            ("soc", self.soc),
            ("frequency", self.frequency),
        ]
    }
}

/// Parser configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Physical range checks applied by the field validators
    pub limits: ValidationLimits,

    /// Field delimiter of the CSV export
    pub delimiter: char,

    /// Example lines listed per error kind in the error report
    pub max_error_examples: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            limits: ValidationLimits::default(),
            delimiter: ',',
            max_error_examples: DEFAULT_MAX_ERROR_EXAMPLES,
        }
    }
}

impl ParserConfig {
    /// Replace the validation limits
    pub fn with_limits(mut self, limits: ValidationLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Use a different field delimiter (e.g. `;` for European locale exports)
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set how many example lines the error report lists per kind
    pub fn with_max_error_examples(mut self, max_error_examples: usize) -> Self {
        self.max_error_examples = max_error_examples;
        self
    }

    /// Delimiter as the byte expected by the CSV tokenizer
    pub fn delimiter_byte(&self) -> u8 {
        // ASCII once validate() has passed, which TelemetryParser::new enforces
        self.delimiter as u8
    }

    /// Check the configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        for (name, range) in self.limits.named_ranges() {
            if !range.min.is_finite() || !range.max.is_finite() {
                return Err(Error::configuration(format!(
                    "Range for {} must have finite bounds",
                    name
                )));
            }
            if range.min > range.max {
                return Err(Error::configuration(format!(
                    "Range for {} is inverted: min {} exceeds max {}",
                    name, range.min, range.max
                )));
            }
        }

        if !self.delimiter.is_ascii() || matches!(self.delimiter, '"' | '\n' | '\r') {
            return Err(Error::configuration(format!(
                "Unsupported delimiter {:?}: must be a single ASCII separator",
                self.delimiter
            )));
        }

        if self.max_error_examples == 0 {
            return Err(Error::configuration(
                "max_error_examples must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Load and validate a configuration from a JSON file
    ///
    /// Keys that are absent keep their default values.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::file_not_found(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::io(format!("Failed to read config {}", path.display()), e))?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| Error::json(format!("Invalid config {}", path.display()), e))?;

        config.validate()?;
        debug!("Loaded parser configuration from {}", path.display());
        Ok(config)
    }
}
