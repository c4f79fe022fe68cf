use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use crate::api::WikiClient;
use crate::config::settings::ServerConfig;
use crate::server::routes;
use crate::token::TokenManager;

/// Shared state handed to every route handler. One token manager and one
/// wiki client serve the whole process.
#[derive(Clone)]
pub struct AppState {
    pub manager: Arc<TokenManager>,
    pub wiki: WikiClient,
}

impl AppState {
    pub fn new(manager: Arc<TokenManager>, wiki: WikiClient) -> Self {
        Self { manager, wiki }
    }
}

/// Start the Axum server exposing the tool routes.
pub async fn start(server_config: &ServerConfig, state: AppState) -> Result<()> {
    let app = routes::router().with_state(state);

    let bind_addr = format!("{}:{}", server_config.host, server_config.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutdown signal received");
}
