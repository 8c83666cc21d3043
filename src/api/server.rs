use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tokio::net::TcpListener;
use tracing::{info, instrument};

use super::handler::{AppState, router};
use crate::ai::OpenAiClient;
use crate::core::config::AppConfig;

/// Binds `addr` and serves the gateway until the process exits.
///
/// # Errors
///
/// Returns an error if the listener cannot be bound or the server fails.
#[instrument(skip(config))]
pub async fn start_server(addr: SocketAddr, config: AppConfig) -> Result<()> {
    let provider = Arc::new(OpenAiClient::from_config(&config));
    let state = AppState::new(config, provider);

    let listener = TcpListener::bind(addr).await?;

    info!(
        model = %state.gateway.model(),
        "Server is running on http://localhost:{}",
        addr.port()
    );
    axum::serve(listener, router(state)).await?;

    Ok(())
}
