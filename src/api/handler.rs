//! Gateway endpoint handler.
//!
//! One real route, `/api/gpt`, accepting any method. Everything else falls
//! through to a 404. A request is a single linear pass:
//! - form parsing (query string, urlencoded body, multipart body)
//! - access key check
//! - command presence check
//! - completion call, mapped into the JSON envelope

use std::sync::Arc;

use axum::Router;
use axum::body::Bytes;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::{HeaderMap, Uri};
use axum::routing::any;
use tracing::{error, info, warn};
use uuid::Uuid;

use super::{access_key, parsing};
use crate::ai::{CompletionGateway, CompletionProvider};
use crate::core::config::AppConfig;
use crate::core::models::GatewayReply;
use crate::errors::RequestError;

pub const GPT_PATH: &str = "/api/gpt";

/// Largest request body accepted, matching fasthttp's default.
pub const MAX_REQUEST_BODY_BYTES: usize = 4 * 1024 * 1024;

/// Immutable state injected into every request handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub gateway: Arc<CompletionGateway>,
}

impl AppState {
    #[must_use]
    pub fn new(config: AppConfig, provider: Arc<dyn CompletionProvider>) -> Self {
        let gateway = CompletionGateway::from_config(&config, provider);
        Self {
            config: Arc::new(config),
            gateway: Arc::new(gateway),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(GPT_PATH, any(handle_gpt_request))
        .fallback(unsupported_path)
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY_BYTES))
        .with_state(state)
}

/// Handles `/api/gpt`.
///
/// # Errors
///
/// Returns 400 for a wrong key or an empty command. Upstream failures are
/// not errors here: they come back as 200 with a JSON `error` field.
#[tracing::instrument(level = "info", skip_all, fields(request_id = %Uuid::new_v4()))]
pub async fn handle_gpt_request(
    State(state): State<AppState>,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Result<GatewayReply, RequestError> {
    let request = parsing::parse_ask_request(uri.query(), &headers, body).await;

    if !access_key::verify_access_key(&request.key, &state.config) {
        warn!("Rejected request with incorrect key");
        return Err(RequestError::IncorrectKey);
    }

    if request.command.is_empty() {
        warn!("Rejected request without command");
        return Err(RequestError::MissingCommand);
    }

    info!(
        command_len = request.command.len(),
        "Forwarding command to completion gateway"
    );

    match state.gateway.ask(&request.command).await {
        Ok(answer) => {
            info!(answer_len = answer.len(), "Completion succeeded");
            Ok(GatewayReply::Answer(answer))
        }
        Err(e) => {
            error!("Completion failed: {}", e);
            Ok(GatewayReply::Error(e.to_string()))
        }
    }
}

async fn unsupported_path(uri: Uri) -> RequestError {
    warn!(path = %uri.path(), "Unsupported path");
    RequestError::UnsupportedPath
}
