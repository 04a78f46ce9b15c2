//! Server bootstrap used by both the binary and the integration tests.

use crate::{config::ServerConfig, routes, state::AppState};
use anyhow::{Context, Result};
use tokio::sync::oneshot;

/// A running server: the bound port plus the means to stop it.
pub struct ServeHandle {
    /// The port the server is listening on. When the config asked for
    /// port 0 this is the port the OS picked.
    pub port: u16,
    shutdown: Option<oneshot::Sender<()>>,
    join: Option<tokio::task::JoinHandle<Result<(), std::io::Error>>>,
}

impl ServeHandle {
    /// Stop accepting connections and wait for in-flight requests to
    /// drain.
    pub async fn shutdown(mut self) -> Result<()> {
        if let Some(trigger) = self.shutdown.take() {
            let _ = trigger.send(());
        }
        match self.join.take() {
            Some(join) => Ok(join.await??),
            None => Ok(()),
        }
    }
}

/// Build fresh app state, bind the configured address, and serve in a
/// spawned task until the returned handle triggers shutdown.
pub async fn serve(config: &ServerConfig) -> Result<ServeHandle> {
    let app = routes::router(AppState::new());

    let bind = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .with_context(|| format!("failed to bind {bind}"))?;
    let port = listener.local_addr()?.port();
    tracing::info!("task server listening on {bind} (port {port})");

    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let join = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
                tracing::info!("received shutdown signal");
            })
            .await
    });

    Ok(ServeHandle {
        port,
        shutdown: Some(shutdown_tx),
        join: Some(join),
    })
}
