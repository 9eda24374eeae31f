use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::aggregate::{Bucket, bucket_start};
use crate::record::{CostRecord, format_timestamp, parse_timestamp};

#[derive(Debug, Clone, Copy)]
pub struct AnomalyParams {
    pub lookback: Duration,
    pub min_buckets: usize,
    pub recent_buckets: usize,
    pub sigma: f64,
}

impl Default for AnomalyParams {
    fn default() -> Self {
        Self {
            lookback: Duration::days(7),
            min_buckets: 10,
            recent_buckets: 24,
            sigma: 3.0,
        }
    }
}

/// An hourly service total above `mean + sigma * stdev` of that service's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anomaly {
    pub service: String,
    pub bucket_start: String,
    pub cost: f64,
    pub threshold: f64,
}

fn mean_and_sample_stdev(values: &[f64]) -> (f64, f64) {
    let count = values.len() as f64;
    let mean = values.iter().sum::<f64>() / count;
    if values.len() < 2 {
        return (mean, 0.0);
    }
    let variance = values
        .iter()
        .map(|value| (value - mean).powi(2))
        .sum::<f64>()
        / (count - 1.0);
    (mean, variance.sqrt())
}

pub fn detect_anomalies(
    records: &[CostRecord],
    now: DateTime<Utc>,
    params: &AnomalyParams,
) -> Vec<Anomaly> {
    let since = now - params.lookback;
    let mut hourly: BTreeMap<&str, BTreeMap<DateTime<Utc>, f64>> = BTreeMap::new();
    for record in records {
        let Some(ts) = parse_timestamp(&record.timestamp) else {
            continue;
        };
        if ts <= since {
            continue;
        }
        let Some(hour) = bucket_start(ts, Bucket::Hour) else {
            continue;
        };
        *hourly
            .entry(record.service.as_str())
            .or_default()
            .entry(hour)
            .or_insert(0.0) += record.cost;
    }

    let mut anomalies = Vec::new();
    for (service, buckets) in hourly {
        if buckets.is_empty() || buckets.len() < params.min_buckets {
            continue;
        }
        let costs: Vec<f64> = buckets.values().copied().collect();
        let (mean, stdev) = mean_and_sample_stdev(&costs);
        let threshold = mean + params.sigma * stdev;
        let skip = buckets.len().saturating_sub(params.recent_buckets);
        for (hour, cost) in buckets.iter().skip(skip) {
            if *cost > threshold {
                anomalies.push(Anomaly {
                    service: service.to_string(),
                    bucket_start: format_timestamp(*hour),
                    cost: *cost,
                    threshold,
                });
            }
        }
    }
    anomalies
}
