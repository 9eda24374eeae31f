mod anomalies;
mod costs;
mod ingest;
mod reset;

use std::sync::Arc;

use crate::app::AppConfig;
use crate::error::Result;
use costwatch_db::Db;

pub use anomalies::AnomaliesService;
pub use costs::{CostQueryResult, CostsService};
pub use ingest::{IngestService, UploadReport};
pub use reset::ResetService;

type SharedConfig = Arc<AppConfig>;

/// Service registry for app-level operations.
#[derive(Clone)]
pub struct AppServices {
    pub costs: CostsService,
    pub ingest: IngestService,
    pub reset: ResetService,
    pub anomalies: AnomaliesService,
}

impl AppServices {
    pub fn new(config: &AppConfig) -> Self {
        let shared = Arc::new(config.clone());
        Self {
            costs: CostsService::new(shared.clone()),
            ingest: IngestService::new(shared.clone()),
            reset: ResetService::new(shared.clone()),
            anomalies: AnomaliesService::new(shared),
        }
    }
}

fn open_db(config: &SharedConfig) -> Result<Db> {
    Ok(Db::open(&config.db_path)?)
}
