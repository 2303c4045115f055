use std::net::SocketAddr;

use anyhow::{Context, Result};
use tracing::info;

use super::router::{AppState, build_router};

/// HTTP server for the OpenAI-compatible API.
pub struct ApiServer {
    addr: SocketAddr,
    state: AppState,
}

impl ApiServer {
    #[must_use]
    pub fn new(host: &str, port: u16, state: AppState) -> Self {
        let addr: SocketAddr = format!("{host}:{port}").parse().unwrap_or_else(|e| {
            tracing::warn!("invalid bind '{host}': {e}, falling back to 127.0.0.1:{port}");
            SocketAddr::from(([127, 0, 0, 1], port))
        });
        Self { addr, state }
    }

    /// Bind and serve until interrupted (blocks the caller).
    pub async fn serve(self) -> Result<()> {
        let router = build_router(self.state);

        let listener = tokio::net::TcpListener::bind(self.addr)
            .await
            .with_context(|| format!("failed to bind {}", self.addr))?;
        info!("API server listening on {}", self.addr);

        axum::serve(listener, router)
            .with_graceful_shutdown(async {
                let _ = tokio::signal::ctrl_c().await;
                info!("API server shutting down");
            })
            .await
            .context("API server error")?;

        Ok(())
    }
}
