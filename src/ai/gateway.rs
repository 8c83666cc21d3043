use std::sync::Arc;

use openai_api_rs::v1::chat_completion::{
    ChatCompletionMessage, ChatCompletionRequest, Content, MessageRole,
};
use tracing::info;

use super::client::CompletionProvider;
use crate::core::config::AppConfig;
use crate::errors::GatewayError;

/// Turns a prompt into a single-message chat completion and extracts the
/// first choice's text.
#[derive(Clone)]
pub struct CompletionGateway {
    provider: Arc<dyn CompletionProvider>,
    model: String,
    temperature: f64,
}

impl CompletionGateway {
    #[must_use]
    pub fn new(provider: Arc<dyn CompletionProvider>, model: String, temperature: f64) -> Self {
        Self {
            provider,
            model,
            temperature,
        }
    }

    #[must_use]
    pub fn from_config(config: &AppConfig, provider: Arc<dyn CompletionProvider>) -> Self {
        Self::new(
            provider,
            config.model().to_string(),
            config.model_temperature,
        )
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    #[must_use]
    pub fn build_request(&self, prompt: &str) -> ChatCompletionRequest {
        ChatCompletionRequest::new(
            self.model.clone(),
            vec![ChatCompletionMessage {
                role: MessageRole::user,
                content: Content::Text(prompt.to_string()),
                name: None,
                tool_calls: None,
                tool_call_id: None,
            }],
        )
        .temperature(self.temperature)
    }

    /// Sends `prompt` to the provider and returns the first choice's text.
    /// Any further choices are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Upstream`] if the provider call fails and
    /// [`GatewayError::NoChoices`] if it succeeds without any choice.
    pub async fn ask(&self, prompt: &str) -> Result<String, GatewayError> {
        let response = self
            .provider
            .chat_completion(self.build_request(prompt))
            .await?;

        info!(
            model = %self.model,
            choices = response.choices.len(),
            "Chat completion returned"
        );

        let first = response
            .choices
            .into_iter()
            .next()
            .ok_or(GatewayError::NoChoices)?;

        Ok(first.message.content.unwrap_or_default())
    }
}
