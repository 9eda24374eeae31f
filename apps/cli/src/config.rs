use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::dirs::default_config_dir;

const CONFIG_FILE_NAME: &str = "config.toml";
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub host: String,
    pub port: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    pub max_upload_bytes: usize,
    pub seed_on_startup: bool,
    pub log_level: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            data_dir: None,
            max_upload_bytes: http_api::DEFAULT_MAX_UPLOAD_BYTES,
            seed_on_startup: true,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: CliConfig,
    pub file: PathBuf,
    pub created: bool,
}

/// Loads the config file, writing one with defaults when it does not exist yet.
pub fn load_or_create(explicit: Option<&Path>) -> Result<ConfigLoad> {
    let file = match explicit {
        Some(path) => path.to_path_buf(),
        None => default_config_dir()?.join(CONFIG_FILE_NAME),
    };
    load_or_create_at(file)
}

fn load_or_create_at(file: PathBuf) -> Result<ConfigLoad> {
    if file.exists() {
        let contents = fs::read_to_string(&file)
            .with_context(|| format!("read config {}", file.display()))?;
        let config: CliConfig = toml::from_str(&contents)
            .with_context(|| format!("parse config {}", file.display()))?;
        return Ok(ConfigLoad {
            config,
            file,
            created: false,
        });
    }

    if let Some(dir) = file.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("create config dir {}", dir.display()))?;
    }
    let config = CliConfig::default();
    let contents = toml::to_string_pretty(&config).context("serialize config")?;
    fs::write(&file, contents).with_context(|| format!("write config {}", file.display()))?;

    Ok(ConfigLoad {
        config,
        file,
        created: true,
    })
}
