//! Time-bucketed aggregation over parsed telemetry records
//!
//! Records are grouped by a period key derived from their combined date and
//! time, then each requested field is reduced per bucket.
//!
//! - [`aggregator`] - Bucketing and reduction
//!
//! # Example Usage
//!
//! ```rust
//! use inverter_telemetry::app::services::aggregation::{
//!     aggregate, AggregationMethod, AggregationOptions, Interval,
//! };
//! use inverter_telemetry::{RecordField, TelemetryParser};
//!
//! let csv = "ID,Date,Time,Power W\n\
//!            INV-1,2025-09-28,10:05,1000\n\
//!            INV-1,2025-09-28,10:35,3000\n\
//!            INV-1,2025-09-28,11:10,500\n";
//! let records = TelemetryParser::default().parse(csv).data;
//!
//! let options = AggregationOptions::new(Interval::Hour, AggregationMethod::Average)
//!     .with_fields(vec![RecordField::PvPowerW]);
//! let buckets = aggregate(&records, &options);
//!
//! assert_eq!(buckets[0].period, "2025-09-28 10:00");
//! assert_eq!(buckets[0].values["pv.powerW"], 2000.0);
//! assert_eq!(buckets[1].count, 1);
//! ```

pub mod aggregator;

#[cfg(test)]
pub mod tests;

pub use aggregator::{aggregate, reduce};

use crate::app::models::RecordField;
use crate::{Error, Result};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Bucket width
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Interval {
    Minute,
    #[default]
    Hour,
    Day,
    Month,
}

impl Interval {
    /// Period key for an instant, truncated to this interval
    ///
    /// Keys sort lexicographically in chronological order.
    pub fn key(self, datetime: &NaiveDateTime) -> String {
        let pattern = match self {
            Interval::Minute => "%Y-%m-%d %H:%M",
            Interval::Hour => "%Y-%m-%d %H:00",
            Interval::Day => "%Y-%m-%d",
            Interval::Month => "%Y-%m",
        };
        datetime.format(pattern).to_string()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Interval::Minute => "minute",
            Interval::Hour => "hour",
            Interval::Day => "day",
            Interval::Month => "month",
        }
    }
}

impl FromStr for Interval {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "minute" => Ok(Interval::Minute),
            "hour" => Ok(Interval::Hour),
            "day" => Ok(Interval::Day),
            "month" => Ok(Interval::Month),
            other => Err(Error::configuration(format!(
                "Unknown aggregation interval '{}'",
                other
            ))),
        }
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reduction applied to the values of one field within a bucket
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum AggregationMethod {
    #[default]
    Average,
    Sum,
    Min,
    Max,
}

impl AggregationMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            AggregationMethod::Average => "average",
            AggregationMethod::Sum => "sum",
            AggregationMethod::Min => "min",
            AggregationMethod::Max => "max",
        }
    }
}

impl FromStr for AggregationMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "average" | "avg" | "mean" => Ok(AggregationMethod::Average),
            "sum" => Ok(AggregationMethod::Sum),
            "min" => Ok(AggregationMethod::Min),
            "max" => Ok(AggregationMethod::Max),
            other => Err(Error::configuration(format!(
                "Unknown aggregation method '{}'",
                other
            ))),
        }
    }
}

impl std::fmt::Display for AggregationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What to bucket by, which fields to reduce, and how
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationOptions {
    pub interval: Interval,

    /// Fields to reduce; `None` selects [`RecordField::AGGREGATION_DEFAULTS`]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<RecordField>>,

    pub method: AggregationMethod,
}

impl AggregationOptions {
    pub fn new(interval: Interval, method: AggregationMethod) -> Self {
        Self {
            interval,
            fields: None,
            method,
        }
    }

    pub fn with_fields(mut self, fields: Vec<RecordField>) -> Self {
        self.fields = Some(fields);
        self
    }

    /// The fields that will actually be reduced
    pub fn selected_fields(&self) -> &[RecordField] {
        match &self.fields {
            Some(fields) => fields,
            None => &RecordField::AGGREGATION_DEFAULTS,
        }
    }
}

/// Reduced values for one period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedData {
    /// Bucket key, e.g. `2025-09-28 10:00` for hourly buckets
    pub period: String,

    /// Reduced value per dotted field path
    pub values: BTreeMap<String, f64>,

    /// Records that fell into this bucket
    pub count: usize,
}
