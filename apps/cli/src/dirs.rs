use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

pub const APP_DIR_NAME: &str = "costwatch";

#[derive(Debug, Clone)]
pub struct DataDirResolution {
    pub dir: PathBuf,
    pub matched_existing: bool,
}

fn resolution(dir: PathBuf) -> DataDirResolution {
    let matched_existing = costwatch_app::AppPaths::new(dir.clone()).db_path.exists();
    DataDirResolution {
        dir,
        matched_existing,
    }
}

/// Picks the store directory: an explicit override first, then the platform data dir.
pub fn resolve_data_dir(override_dir: Option<&Path>) -> Result<DataDirResolution> {
    if let Some(dir) = override_dir {
        return Ok(resolution(dir.to_path_buf()));
    }
    let base = ::dirs::data_dir().context("resolve platform data directory")?;
    Ok(resolution(base.join(APP_DIR_NAME)))
}

pub fn default_config_dir() -> Result<PathBuf> {
    let base = ::dirs::config_dir().context("resolve platform config directory")?;
    Ok(base.join(APP_DIR_NAME))
}
