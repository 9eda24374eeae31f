mod args;
mod config;
mod dirs;

use std::io;
use std::net::{IpAddr, SocketAddr};

use anyhow::{Context, Result};
use app_api::AppContext;
use clap::Parser;
use costwatch_app::{AppPaths, AppState, ensure_app_data_dir};
use http_api::HttpState;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = args::CliArgs::parse();

    let loaded = config::load_or_create(args.config.as_deref())?;
    let config = loaded.config;
    init_logging(&config.log_level);
    if loaded.created {
        tracing::info!(
            path = %loaded.file.display(),
            port = config.port,
            "created default config"
        );
    }

    let data_dir_override = args.data_dir.as_deref().or(config.data_dir.as_deref());
    let data_dir = dirs::resolve_data_dir(data_dir_override)?;
    tracing::info!(
        dir = %data_dir.dir.display(),
        existing = data_dir.matched_existing,
        "using data dir"
    );

    let paths = AppPaths::new(data_dir.dir);
    ensure_app_data_dir(&paths).context("create data dir")?;

    let app_state = AppState::new(paths.db_path);
    let seed_on_startup = config.seed_on_startup && !args.no_seed;
    let init_state = app_state.clone();
    tokio::task::spawn_blocking(move || init_state.initialize(seed_on_startup))
        .await
        .context("initialize store")?
        .context("initialize store")?;

    let context = AppContext { app_state };
    let state = HttpState::new(context, config.max_upload_bytes);
    let router = http_api::router(state);

    let host: IpAddr = args
        .host
        .as_deref()
        .unwrap_or(&config.host)
        .parse()
        .context("parse bind host")?;
    let port = args.port.unwrap_or(config.port);
    let (listener, actual_port, used_fallback) = bind_port(host, port).await?;
    if used_fallback {
        tracing::warn!(
            configured = port,
            actual = actual_port,
            "configured port was unavailable; using a free port for this run"
        );
    }

    let url = format!("http://{}", SocketAddr::new(host, actual_port));
    tracing::info!(url = %url, "costwatch is running");
    tracing::info!("press Ctrl+C to stop");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn bind_port(
    host: IpAddr,
    port: u16,
) -> Result<(tokio::net::TcpListener, u16, bool), io::Error> {
    if port == 0 {
        let listener = tokio::net::TcpListener::bind(SocketAddr::new(host, 0)).await?;
        let actual_port = listener.local_addr()?.port();
        return Ok((listener, actual_port, false));
    }

    match tokio::net::TcpListener::bind(SocketAddr::new(host, port)).await {
        Ok(listener) => Ok((listener, port, false)),
        Err(_) => {
            let listener = tokio::net::TcpListener::bind(SocketAddr::new(host, 0)).await?;
            let actual_port = listener.local_addr()?.port();
            Ok((listener, actual_port, true))
        }
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
}
