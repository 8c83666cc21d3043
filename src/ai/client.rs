//! `OpenAI` chat-completions client
//!
//! Sends requests built with `openai-api-rs` types over a shared reqwest
//! client and keeps the raw body of failed calls for diagnostics.

use async_trait::async_trait;
use openai_api_rs::v1::chat_completion::ChatCompletionRequest;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::core::config::AppConfig;
use crate::errors::GatewayError;

/// Subset of the chat-completions response the gateway reads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CompletionResponse {
    #[serde(default)]
    pub choices: Vec<CompletionChoice>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CompletionChoice {
    pub message: CompletionMessage,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CompletionMessage {
    #[serde(default)]
    pub content: Option<String>,
}

/// Anything that can answer a chat-completion request.
///
/// Implementations must be shareable across concurrently running request
/// handlers.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// # Errors
    ///
    /// Returns [`GatewayError::Upstream`] when the call fails at the
    /// transport level or the provider reports an error.
    async fn chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<CompletionResponse, GatewayError>;
}

/// HTTP client for an `OpenAI`-compatible `/chat/completions` endpoint.
pub struct OpenAiClient {
    http: Client,
    api_key: String,
    org_id: Option<String>,
    base_url: String,
}

impl OpenAiClient {
    #[must_use]
    pub fn new(api_key: String, org_id: Option<String>, base_url: &str) -> Self {
        // No request timeout: a slow provider call blocks only its own request.
        Self::with_http_client(Client::new(), api_key, org_id, base_url)
    }

    /// Uses a caller-built reqwest client, e.g. one with custom proxy or TLS
    /// settings.
    #[must_use]
    pub fn with_http_client(
        http: Client,
        api_key: String,
        org_id: Option<String>,
        base_url: &str,
    ) -> Self {
        Self {
            http,
            api_key,
            org_id,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.openai_api_key.clone(),
            config.openai_org_id.clone(),
            config.base_url(),
        )
    }

    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl CompletionProvider for OpenAiClient {
    async fn chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<CompletionResponse, GatewayError> {
        #[cfg(feature = "debug-logs")]
        debug!("Using chat completion request:\n{:?}", request);

        let mut builder = self
            .http
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&request);

        if let Some(org) = &self.org_id {
            builder = builder.header("OpenAI-Organization", org);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        debug!(status = %status, body_len = body.len(), "OpenAI API responded");

        if !status.is_success() {
            let cause = match api_error_message(&body) {
                Some(message) => format!("OpenAI API error (status {status}): {message}"),
                None => format!("OpenAI API error (status {status})"),
            };
            warn!("{}", cause);
            return Err(GatewayError::upstream(cause, Some(body)));
        }

        serde_json::from_str(&body).map_err(|e| {
            GatewayError::upstream(
                format!("Failed to parse OpenAI response: {e}"),
                Some(body),
            )
        })
    }
}

/// Extracts `error.message` from an `OpenAI` error payload.
fn api_error_message(body: &str) -> Option<String> {
    let json: Value = serde_json::from_str(body).ok()?;
    json.get("error")
        .and_then(|e| e.get("message"))
        .and_then(|m| m.as_str())
        .map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_message_reads_nested_message() {
        let body = r#"{"error":{"message":"Incorrect API key provided","type":"invalid_request_error"}}"#;
        assert_eq!(
            api_error_message(body).as_deref(),
            Some("Incorrect API key provided")
        );
    }

    #[test]
    fn api_error_message_ignores_other_shapes() {
        assert_eq!(api_error_message("upstream connect error"), None);
        assert_eq!(api_error_message(r#"{"error":"flat"}"#), None);
    }

    #[test]
    fn endpoint_trims_trailing_slash() {
        let client = OpenAiClient::new("sk".into(), None, "http://localhost:9000/v1/");
        assert_eq!(client.endpoint(), "http://localhost:9000/v1/chat/completions");
    }

    #[test]
    fn response_without_choices_field_decodes_empty() {
        let parsed: CompletionResponse = serde_json::from_str(r#"{"id":"x"}"#).unwrap();
        assert!(parsed.choices.is_empty());
    }

    #[test]
    fn response_with_null_content_decodes() {
        let parsed: CompletionResponse =
            serde_json::from_str(r#"{"choices":[{"index":0,"message":{"role":"assistant","content":null}}]}"#)
                .unwrap();
        assert_eq!(parsed.choices[0].message.content, None);
    }
}
