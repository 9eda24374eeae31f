use serde::Serialize;

use crate::error::Result;
use crate::services::{SharedConfig, open_db};
use costwatch_core::{AggregationResult, Bucket, CostFilter, CostRecord, aggregate};
use costwatch_db::Db;

/// Records matching a query together with their aggregation.
#[derive(Debug, Clone, Serialize)]
pub struct CostQueryResult {
    pub records: Vec<CostRecord>,
    pub aggregation: AggregationResult,
}

#[derive(Clone)]
pub struct CostsService {
    config: SharedConfig,
}

impl CostsService {
    pub(super) fn new(config: SharedConfig) -> Self {
        Self { config }
    }

    fn db(&self) -> Result<Db> {
        open_db(&self.config)
    }

    /// Matching records in insertion order.
    pub fn list(&self, filter: &CostFilter) -> Result<Vec<CostRecord>> {
        Ok(self.db()?.query_range(filter)?)
    }

    /// Reads the matching records once and aggregates that same snapshot.
    pub fn query(&self, filter: &CostFilter, bucket: Bucket) -> Result<CostQueryResult> {
        let records = self.list(filter)?;
        let aggregation = aggregate(&records, bucket);
        Ok(CostQueryResult {
            records,
            aggregation,
        })
    }

    pub fn services(&self) -> Result<Vec<String>> {
        Ok(self.db()?.list_services()?)
    }

    pub fn count(&self) -> Result<u64> {
        Ok(self.db()?.count_records()?)
    }
}
