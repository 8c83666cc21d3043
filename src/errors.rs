use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Snapshot rendered when the provider produced no response body at all.
pub const EMPTY_RESPONSE_SNAPSHOT: &str = "{}";

/// Failures that end a request before the completion gateway is reached.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestError {
    #[error("incorrect key")]
    IncorrectKey,

    #[error("Command is required")]
    MissingCommand,

    #[error("Unsupported path")]
    UnsupportedPath,
}

impl RequestError {
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            RequestError::IncorrectKey | RequestError::MissingCommand => StatusCode::BAD_REQUEST,
            RequestError::UnsupportedPath => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for RequestError {
    fn into_response(self) -> Response {
        (self.status_code(), self.to_string()).into_response()
    }
}

/// Failures of a completion call. These never become HTTP errors; the
/// endpoint reports them inside the JSON `error` field.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("ERR: {cause} RESP: {}", response_snapshot(.response))]
    Upstream {
        cause: String,
        response: Option<String>,
    },

    #[error("no response from GPT")]
    NoChoices,
}

impl GatewayError {
    pub fn upstream(cause: impl Into<String>, response: Option<String>) -> Self {
        GatewayError::Upstream {
            cause: cause.into(),
            response,
        }
    }
}

fn response_snapshot(response: &Option<String>) -> &str {
    response.as_deref().unwrap_or(EMPTY_RESPONSE_SNAPSHOT)
}

impl From<reqwest::Error> for GatewayError {
    fn from(error: reqwest::Error) -> Self {
        GatewayError::upstream(error.to_string(), None)
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("required environment variable {0} is not set")]
    Missing(&'static str),

    #[error("invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}
