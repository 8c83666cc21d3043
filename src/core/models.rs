use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde_json::Value;

/// Form fields submitted to the gateway endpoint.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AskRequest {
    pub key: String,
    pub command: String,
}

/// Outcome of a completed gateway call. Both variants are sent with 200 OK;
/// callers tell them apart by the JSON field name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayReply {
    Answer(String),
    Error(String),
}

impl GatewayReply {
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            GatewayReply::Answer(_) => "answer",
            GatewayReply::Error(_) => "error",
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            GatewayReply::Answer(text) | GatewayReply::Error(text) => text,
        }
    }

    /// Renders the single-field JSON object, e.g. `{"answer": "hello"}`.
    #[must_use]
    pub fn to_body(&self) -> String {
        let quoted = Value::from(self.text());
        format!("{{\"{}\": {quoted}}}", self.field())
    }
}

impl IntoResponse for GatewayReply {
    fn into_response(self) -> Response {
        (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            self.to_body(),
        )
            .into_response()
    }
}
