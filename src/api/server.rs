//! Server lifecycle: bind → spawn background task → return handle with
//! shutdown channel. `serve` runs the form until Ctrl-C.

use std::net::SocketAddr;

use axum::Router;
use thiserror::Error;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::api::router::summary_router;
use crate::api::types::ApiContext;
use crate::config::{AppConfig, ConfigError};
use crate::pipeline::tokenizer::TokenizerError;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Tokenizer(#[from] TokenizerError),

    #[error("Completion client setup failed: {0}")]
    Client(String),

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// Handle to a running server.
pub struct SummaryServer {
    pub addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: JoinHandle<Result<(), std::io::Error>>,
}

impl SummaryServer {
    /// Signal graceful shutdown and wait for in-flight requests to finish.
    pub async fn shutdown(mut self) -> Result<(), ServerError> {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
            tracing::info!("Server shutdown signal sent");
        }
        match self.task.await {
            Ok(result) => result.map_err(ServerError::from),
            Err(e) => Err(ServerError::Serve(std::io::Error::other(e))),
        }
    }
}

/// Bind `addr` and serve `app` in a background task.
pub async fn start_server(addr: SocketAddr, app: Router) -> Result<SummaryServer, ServerError> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;
    let addr = listener.local_addr()?;

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let task = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.await;
            })
            .await
    });

    tracing::info!(%addr, "Summary form listening on http://{addr}/");

    Ok(SummaryServer {
        addr,
        shutdown_tx: Some(shutdown_tx),
        task,
    })
}

/// Serve the summary form on the configured address until Ctrl-C.
pub async fn serve(config: &AppConfig, ctx: ApiContext) -> Result<(), ServerError> {
    let app = summary_router(ctx, config.max_upload_bytes);
    let server = start_server(config.bind_addr, app).await?;

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Cannot listen for Ctrl-C, shutting down");
    }
    tracing::info!("Interrupt received");
    server.shutdown().await
}
