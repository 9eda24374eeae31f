use std::path::PathBuf;

use crate::error::Result;
use crate::services::AppServices;
use costwatch_db::Db;

/// Paths and files needed to run the cost service.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub db_path: PathBuf,
}

/// Application state shared by frontends (HTTP server, CLI).
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub services: AppServices,
}

impl AppState {
    pub fn new(db_path: PathBuf) -> Self {
        let config = AppConfig { db_path };
        let services = AppServices::new(&config);
        Self { config, services }
    }

    pub fn is_fresh_db(&self) -> bool {
        !self.config.db_path.exists()
    }

    pub fn setup_db(&self) -> Result<()> {
        setup_db(&self.config.db_path)
    }

    /// Migrates the store and, when asked, seeds the demo dataset into an empty one.
    pub fn initialize(&self, seed_on_startup: bool) -> Result<()> {
        let is_fresh_db = self.is_fresh_db();
        self.setup_db()?;
        if seed_on_startup {
            let seeded = self.services.reset.seed_if_empty()?;
            if seeded > 0 {
                tracing::info!(records = seeded, fresh = is_fresh_db, "seeded demo data");
            }
        }
        Ok(())
    }
}

pub fn setup_db(path: &std::path::Path) -> Result<()> {
    let mut db = Db::open(path)?;
    db.migrate()?;
    Ok(())
}
