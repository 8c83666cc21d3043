//! Chat-completion provider access and answer extraction

pub mod client;
pub mod gateway;

// Re-export main types for convenience
pub use client::{
    CompletionChoice, CompletionMessage, CompletionProvider, CompletionResponse, OpenAiClient,
};
pub use gateway::CompletionGateway;
