//! Tests for the aggregation engine


// Test helper functions and fixtures
use crate::app::models::{BatteryData, InverterRecord, PvData, Timestamp, UserRecord};
use crate::app::services::telemetry_parser::field_parsers::combine_date_time;

/// Create a test record stamped at the given date and time
pub fn create_test_record(date: &str, time: &str, power_w: f64, soc: f64) -> InverterRecord {
    InverterRecord {
        user: UserRecord {
            id: "INV-TEST".to_string(),
            timestamp: Timestamp {
                date: date.to_string(),
                time: time.to_string(),
                datetime: combine_date_time(date, time),
            },
            ..UserRecord::default()
        },
        pv: PvData {
            power_w,
            ..PvData::default()
        },
        battery: BatteryData {
            soc,
            ..BatteryData::default()
        },
        ..InverterRecord::default()
    }
}
