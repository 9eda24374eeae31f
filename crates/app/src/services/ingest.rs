use std::time::Instant;

use crate::error::Result;
use crate::services::{SharedConfig, open_db};
use costwatch_db::Db;
use ingest::IngestOutcome;

/// Parse outcome of an upload plus how many records reached the store.
#[derive(Debug, Clone)]
pub struct UploadReport {
    pub outcome: IngestOutcome,
    pub inserted: usize,
}

#[derive(Clone)]
pub struct IngestService {
    config: SharedConfig,
}

impl IngestService {
    pub(super) fn new(config: SharedConfig) -> Self {
        Self { config }
    }

    fn db(&self) -> Result<Db> {
        open_db(&self.config)
    }

    /// Parses `bytes` as a cost CSV and appends the accepted rows as one batch.
    pub fn upload(&self, bytes: &[u8]) -> Result<UploadReport> {
        let started = Instant::now();
        let outcome = ingest::ingest_csv(bytes)?;
        let inserted = if outcome.accepted.is_empty() {
            0
        } else {
            self.db()?.append_records(&outcome.accepted)?
        };
        tracing::info!(
            bytes = bytes.len(),
            accepted = outcome.accepted.len(),
            rejected = outcome.rejected.len(),
            inserted,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "csv upload ingested"
        );
        Ok(UploadReport { outcome, inserted })
    }
}
