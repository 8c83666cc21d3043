//! GPT gateway - relays prompts from authorized HTTP callers to an `OpenAI`
//! chat model and returns the answer as JSON.
//!
//! # Architecture
//!
//! The crate has two parts:
//! 1. An HTTP endpoint (`api`) that parses `key`/`command` form fields,
//!    checks the shared access key and renders the JSON envelope
//! 2. A completion gateway (`ai`) that sends the command as a single user
//!    message and extracts the first choice
//!
//! The system uses:
//! - axum on Tokio for the HTTP server
//! - reqwest for the provider call
//! - openai-api-rs for the chat-completion request types
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use gpt_gateway::ai::{CompletionGateway, OpenAiClient};
//! use gpt_gateway::core::config::AppConfig;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     gpt_gateway::setup_logging();
//!
//!     let config = AppConfig {
//!         access_key: "dummy_access_key".to_string(),
//!         openai_api_key: "dummy_openai_key".to_string(),
//!         model_temperature: 1.0,
//!         openai_model: None,
//!         openai_org_id: None,
//!         openai_base_url: None,
//!     };
//!
//!     let provider = Arc::new(OpenAiClient::from_config(&config));
//!     let gateway = CompletionGateway::from_config(&config, provider);
//!
//!     match gateway.ask("Say hello").await {
//!         Ok(answer) => println!("Answer: {answer}"),
//!         Err(e) => println!("Error: {e}"),
//!     }
//!
//!     Ok(())
//! }
//! ```
// Module declarations
pub mod ai;
pub mod api;
pub mod core;
pub mod errors;

/// Configure structured logging with JSON output.
///
/// The filter comes from `RUST_LOG` and defaults to `info`. Calling this more
/// than once keeps the first subscriber.
///
/// # Example
///
/// ```
/// gpt_gateway::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
