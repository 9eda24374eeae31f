use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::services::{SharedConfig, open_db};
use costwatch_core::{Anomaly, AnomalyParams, CostFilter, detect_anomalies, format_timestamp};
use costwatch_db::Db;

#[derive(Clone)]
pub struct AnomaliesService {
    config: SharedConfig,
    params: AnomalyParams,
}

impl AnomaliesService {
    pub(super) fn new(config: SharedConfig) -> Self {
        Self {
            config,
            params: AnomalyParams::default(),
        }
    }

    fn db(&self) -> Result<Db> {
        open_db(&self.config)
    }

    /// Hourly spikes inside the lookback window ending at `now`.
    pub fn detect(&self, now: DateTime<Utc>) -> Result<Vec<Anomaly>> {
        let filter = CostFilter {
            start: Some(format_timestamp(now - self.params.lookback)),
            end: None,
            service: None,
        };
        let records = self.db()?.query_range(&filter)?;
        let anomalies = detect_anomalies(&records, now, &self.params);
        if !anomalies.is_empty() {
            tracing::warn!(count = anomalies.len(), "cost anomalies detected");
        }
        Ok(anomalies)
    }
}
