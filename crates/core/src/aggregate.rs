use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::record::{CostRecord, format_timestamp, parse_timestamp};

/// Series grouping key. `Exact` groups by the record timestamp with no rounding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    #[default]
    Exact,
    Hour,
    Day,
}

impl Bucket {
    fn key(&self, timestamp: &str) -> String {
        if matches!(self, Self::Exact) {
            return timestamp.to_string();
        }
        match parse_timestamp(timestamp).and_then(|value| bucket_start(value, *self)) {
            Some(start) => format_timestamp(start),
            None => timestamp.to_string(),
        }
    }
}

pub(crate) fn bucket_start(value: DateTime<Utc>, bucket: Bucket) -> Option<DateTime<Utc>> {
    let value = value.with_nanosecond(0)?.with_second(0)?;
    match bucket {
        Bucket::Exact => Some(value),
        Bucket::Hour => value.with_minute(0),
        Bucket::Day => value.with_minute(0)?.with_hour(0),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub timestamp: String,
    pub total: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregationResult {
    pub total_cost: f64,
    pub per_service: BTreeMap<String, f64>,
    pub series: Vec<SeriesPoint>,
    pub highest_service: Option<String>,
}

pub fn aggregate(records: &[CostRecord], bucket: Bucket) -> AggregationResult {
    // Stable sort: equal timestamps keep insertion order, so every sum below is
    // accumulated in the same order on every run.
    let mut ordered: Vec<&CostRecord> = records.iter().collect();
    ordered.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));

    let mut total_cost = 0.0;
    let mut per_service: BTreeMap<String, f64> = BTreeMap::new();
    let mut buckets: BTreeMap<String, f64> = BTreeMap::new();
    for record in ordered {
        total_cost += record.cost;
        *per_service.entry(record.service.clone()).or_insert(0.0) += record.cost;
        *buckets.entry(bucket.key(&record.timestamp)).or_insert(0.0) += record.cost;
    }

    let series = buckets
        .into_iter()
        .map(|(timestamp, total)| SeriesPoint { timestamp, total })
        .collect();
    let highest_service = highest_service(records, &per_service);

    AggregationResult {
        total_cost,
        per_service,
        series,
        highest_service,
    }
}

/// Service with the largest total. Ties go to the service that appears first in
/// `records`.
pub fn highest_service(
    records: &[CostRecord],
    per_service: &BTreeMap<String, f64>,
) -> Option<String> {
    let mut seen = HashSet::new();
    let mut best: Option<(&str, f64)> = None;
    for record in records {
        if !seen.insert(record.service.as_str()) {
            continue;
        }
        let total = per_service.get(&record.service).copied().unwrap_or(0.0);
        match best {
            Some((_, current)) if total <= current => {}
            _ => best = Some((record.service.as_str(), total)),
        }
    }
    best.map(|(service, _)| service.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::normalize_timestamp;

    fn record(ts: &str, service: &str, cost: f64) -> CostRecord {
        CostRecord {
            timestamp: normalize_timestamp(ts).expect("timestamp"),
            service: service.to_string(),
            cost,
        }
    }

    #[test]
    fn empty_input_yields_empty_result() {
        let result = aggregate(&[], Bucket::Exact);
        assert_eq!(result.total_cost, 0.0);
        assert!(result.per_service.is_empty());
        assert!(result.series.is_empty());
        assert_eq!(result.highest_service, None);
    }

    #[test]
    fn aggregates_worked_example() {
        let records = vec![
            record("2024-01-01", "ec2", 10.5),
            record("2024-01-02", "ec2", 5.0),
        ];
        let result = aggregate(&records, Bucket::Exact);
        assert!((result.total_cost - 15.5).abs() < 1e-9);
        assert_eq!(result.per_service.len(), 1);
        assert!((result.per_service["ec2"] - 15.5).abs() < 1e-9);
        assert_eq!(
            result.series,
            vec![
                SeriesPoint {
                    timestamp: "2024-01-01T00:00:00.000Z".to_string(),
                    total: 10.5,
                },
                SeriesPoint {
                    timestamp: "2024-01-02T00:00:00.000Z".to_string(),
                    total: 5.0,
                },
            ]
        );
        assert_eq!(result.highest_service.as_deref(), Some("ec2"));
    }

    #[test]
    fn series_groups_exact_timestamps_and_sorts_ascending() {
        let records = vec![
            record("2024-01-03T10:00:00Z", "s3", 1.0),
            record("2024-01-01T10:00:00Z", "ec2", 2.0),
            record("2024-01-03T10:00:00Z", "ec2", 3.0),
            record("2024-01-03T10:00:01Z", "ec2", 4.0),
        ];
        let result = aggregate(&records, Bucket::Exact);
        let points: Vec<(&str, f64)> = result
            .series
            .iter()
            .map(|point| (point.timestamp.as_str(), point.total))
            .collect();
        assert_eq!(
            points,
            vec![
                ("2024-01-01T10:00:00.000Z", 2.0),
                ("2024-01-03T10:00:00.000Z", 4.0),
                ("2024-01-03T10:00:01.000Z", 4.0),
            ]
        );
    }

    #[test]
    fn hour_and_day_buckets_truncate() {
        let records = vec![
            record("2024-01-01T10:15:00Z", "ec2", 1.0),
            record("2024-01-01T10:45:30Z", "ec2", 2.0),
            record("2024-01-01T23:59:59Z", "ec2", 4.0),
        ];
        let hourly = aggregate(&records, Bucket::Hour);
        assert_eq!(hourly.series.len(), 2);
        assert_eq!(hourly.series[0].timestamp, "2024-01-01T10:00:00.000Z");
        assert_eq!(hourly.series[0].total, 3.0);

        let daily = aggregate(&records, Bucket::Day);
        assert_eq!(daily.series.len(), 1);
        assert_eq!(daily.series[0].timestamp, "2024-01-01T00:00:00.000Z");
        assert_eq!(daily.series[0].total, 7.0);
    }

    #[test]
    fn total_matches_sum_of_services() {
        let records: Vec<CostRecord> = (0..200)
            .map(|idx| {
                let service = ["ec2", "s3", "rds", "lambda"][idx % 4];
                let ts = format!("2024-02-{:02}T{:02}:00:00Z", idx % 28 + 1, idx % 24);
                record(&ts, service, (idx as f64) * 0.37 + 0.01)
            })
            .collect();
        let result = aggregate(&records, Bucket::Exact);
        let service_sum: f64 = result.per_service.values().sum();
        assert!((result.total_cost - service_sum).abs() < 1e-6);
        let series_sum: f64 = result.series.iter().map(|point| point.total).sum();
        assert!((result.total_cost - series_sum).abs() < 1e-6);
    }

    #[test]
    fn zero_cost_services_still_get_an_entry() {
        let records = vec![record("2024-01-01", "free-tier", 0.0)];
        let result = aggregate(&records, Bucket::Exact);
        assert_eq!(result.per_service.get("free-tier"), Some(&0.0));
        assert_eq!(result.highest_service.as_deref(), Some("free-tier"));
    }

    #[test]
    fn highest_service_tie_goes_to_first_seen() {
        let records = vec![
            record("2024-01-02", "s3", 5.0),
            record("2024-01-01", "ec2", 5.0),
            record("2024-01-03", "rds", 1.0),
        ];
        let result = aggregate(&records, Bucket::Exact);
        assert_eq!(result.highest_service.as_deref(), Some("s3"));

        let records = vec![
            record("2024-01-01", "ec2", 2.0),
            record("2024-01-01", "s3", 9.0),
        ];
        let result = aggregate(&records, Bucket::Exact);
        assert_eq!(result.highest_service.as_deref(), Some("s3"));
    }

    #[test]
    fn serializes_services_as_object() {
        let records = vec![record("2024-01-01", "ec2", 1.5)];
        let value = serde_json::to_value(aggregate(&records, Bucket::Exact)).expect("json");
        assert_eq!(value["per_service"]["ec2"], 1.5);
        assert_eq!(value["series"][0]["timestamp"], "2024-01-01T00:00:00.000Z");
        assert_eq!(value["highest_service"], "ec2");
        let bucket: Bucket = serde_json::from_str("\"hour\"").expect("bucket");
        assert_eq!(bucket, Bucket::Hour);
    }
}
