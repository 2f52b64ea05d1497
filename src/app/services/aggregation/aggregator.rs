//! Bucketing and reduction of telemetry records

use std::collections::BTreeMap;

use tracing::debug;

use super::{AggregatedData, AggregationMethod, AggregationOptions};
use crate::app::models::InverterRecord;

/// Group records into time buckets and reduce the selected fields
///
/// Records without a combined instant are skipped. Buckets come back ordered
/// by period; each bucket's values are keyed by dotted field path.
pub fn aggregate(records: &[InverterRecord], options: &AggregationOptions) -> Vec<AggregatedData> {
    let mut buckets: BTreeMap<String, Vec<&InverterRecord>> = BTreeMap::new();
    let mut skipped = 0;

    for record in records {
        match record.datetime() {
            Some(datetime) => buckets
                .entry(options.interval.key(&datetime))
                .or_default()
                .push(record),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        debug!("Skipped {} records without a usable timestamp", skipped);
    }

    let fields = options.selected_fields();
    let aggregated: Vec<AggregatedData> = buckets
        .into_iter()
        .map(|(period, members)| {
            let values = fields
                .iter()
                .map(|field| {
                    let samples: Vec<f64> = members.iter().map(|r| field.value_of(r)).collect();
                    (field.path().to_string(), reduce(&samples, options.method))
                })
                .collect();

            AggregatedData {
                period,
                values,
                count: members.len(),
            }
        })
        .collect();

    debug!(
        "Aggregated {} records into {} {} buckets ({})",
        records.len() - skipped,
        aggregated.len(),
        options.interval,
        options.method
    );

    aggregated
}

/// Reduce a list of values; an empty list reduces to 0
pub fn reduce(values: &[f64], method: AggregationMethod) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    match method {
        AggregationMethod::Sum => values.iter().sum(),
        AggregationMethod::Average => values.iter().sum::<f64>() / values.len() as f64,
        AggregationMethod::Min => values.iter().copied().fold(f64::INFINITY, f64::min),
        AggregationMethod::Max => values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
    }
}
