//! Configuration and request/response models

pub mod config;
pub mod models;

pub use config::AppConfig;
pub use models::{AskRequest, GatewayReply};
