//! HTTP endpoint: routing, form parsing and authorization

pub mod access_key;
pub mod handler;
pub mod parsing;
pub mod server;

// Re-export the router pieces for convenience
pub use handler::{AppState, GPT_PATH, MAX_REQUEST_BODY_BYTES, router};
pub use server::start_server;
