use crate::error::Result;
use crate::seed::mock_records;
use crate::services::{SharedConfig, open_db};
use costwatch_db::Db;

#[derive(Clone)]
pub struct ResetService {
    config: SharedConfig,
}

impl ResetService {
    pub(super) fn new(config: SharedConfig) -> Self {
        Self { config }
    }

    fn db(&self) -> Result<Db> {
        open_db(&self.config)
    }

    /// Drops every stored record and restores the demo dataset.
    pub fn reset(&self) -> Result<usize> {
        let inserted = self.db()?.reset_all(&mock_records())?;
        tracing::info!(records = inserted, "store reset to demo data");
        Ok(inserted)
    }

    /// Seeds the demo dataset only when the store holds nothing.
    pub fn seed_if_empty(&self) -> Result<usize> {
        let mut db = self.db()?;
        if db.count_records()? > 0 {
            return Ok(0);
        }
        Ok(db.append_records(&mock_records())?)
    }
}
