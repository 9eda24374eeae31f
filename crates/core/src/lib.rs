mod aggregate;
mod anomaly;
mod record;

use serde::{Deserialize, Serialize};

pub use aggregate::{AggregationResult, Bucket, SeriesPoint, aggregate, highest_service};
pub use anomaly::{Anomaly, AnomalyParams, detect_anomalies};
pub use record::{
    CostProblem, CostRecord, RawCostRecord, ValidationError, format_timestamp, normalize_timestamp,
    parse_date_only, parse_timestamp, validate,
};

/// Store query filter. Bounds are canonical timestamps and inclusive on both ends.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostFilter {
    pub start: Option<String>,
    pub end: Option<String>,
    pub service: Option<String>,
}

impl CostFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn matches(&self, record: &CostRecord) -> bool {
        if let Some(start) = self.start.as_deref()
            && record.timestamp.as_str() < start
        {
            return false;
        }
        if let Some(end) = self.end.as_deref()
            && record.timestamp.as_str() > end
        {
            return false;
        }
        match self.service.as_deref() {
            Some(service) => record.service == service,
            None => true,
        }
    }
}
