use std::path::PathBuf;

use clap::Parser;

/// Cloud cost ingestion and aggregation service.
#[derive(Debug, Parser)]
#[command(name = "costwatch", version)]
pub struct CliArgs {
    /// Override the configured port for this run only
    #[arg(long)]
    pub port: Option<u16>,
    /// Override the configured bind address for this run only
    #[arg(long)]
    pub host: Option<String>,
    /// Directory holding the cost store
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,
    /// Config file to use instead of the default location
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Do not seed demo data into an empty store
    #[arg(long)]
    pub no_seed: bool,
}
