//! Task server binary entry point.
//!
//! Loads TOML configuration, sizes the tokio runtime from it, and runs
//! the axum server with graceful shutdown on ctrl-c.

use anyhow::Result;
use fanout_server::{ServerConfig, serve};
use std::path::Path;
use tokio::signal;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Initialize tracing from RUST_LOG (default: info).
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration.
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "server.toml".to_string());
    let config = ServerConfig::load_or_default(Path::new(&config_path))?;

    // Build the runtime by hand so the config can size the worker
    // pool.
    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all().thread_name("fanout-worker");
    if let Some(threads) = config.runtime.worker_threads {
        tracing::info!("runtime sized to {threads} worker thread(s)");
        builder.worker_threads(threads);
    }
    let runtime = builder.build()?;

    runtime.block_on(run(config))
}

async fn run(config: ServerConfig) -> Result<()> {
    let handle = serve(&config).await?;

    signal::ctrl_c().await?;
    tracing::info!("ctrl-c received, shutting down");
    handle.shutdown().await?;

    tracing::info!("task server shut down");
    Ok(())
}
