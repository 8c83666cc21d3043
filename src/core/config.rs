use std::env;
use std::fmt;

use openai_api_rs::v1::common::GPT4;

use crate::errors::ConfigError;

pub const DEFAULT_MODEL_TEMPERATURE: f64 = 1.0;
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Process-wide settings, loaded once before the listener is bound and
/// shared read-only with every request handler.
#[derive(Clone)]
pub struct AppConfig {
    /// Secret that the `key` form field must match exactly.
    pub access_key: String,
    pub openai_api_key: String,
    pub model_temperature: f64,
    pub openai_model: Option<String>,
    pub openai_org_id: Option<String>,
    pub openai_base_url: Option<String>,
}

impl AppConfig {
    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or empty, or if
    /// `MODEL_TEMPERATURE` is not a finite number.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup. Empty
    /// values are treated as unset.
    ///
    /// # Errors
    ///
    /// Same as [`AppConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.is_empty());

        let model_temperature = match get("MODEL_TEMPERATURE") {
            Some(raw) => parse_temperature(&raw)?,
            None => DEFAULT_MODEL_TEMPERATURE,
        };

        Ok(Self {
            access_key: get("GPT_KEY").ok_or(ConfigError::Missing("GPT_KEY"))?,
            openai_api_key: get("OPENAI_API_KEY").ok_or(ConfigError::Missing("OPENAI_API_KEY"))?,
            model_temperature,
            openai_model: get("OPENAI_MODEL"),
            openai_org_id: get("OPENAI_ORG_ID"),
            openai_base_url: get("OPENAI_BASE_URL"),
        })
    }

    #[must_use]
    pub fn model(&self) -> &str {
        self.openai_model.as_deref().unwrap_or(GPT4)
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        self.openai_base_url
            .as_deref()
            .unwrap_or(DEFAULT_OPENAI_BASE_URL)
    }
}

fn parse_temperature(raw: &str) -> Result<f64, ConfigError> {
    let value: f64 = raw.trim().parse().map_err(|e| ConfigError::Invalid {
        name: "MODEL_TEMPERATURE",
        reason: format!("{e}"),
    })?;

    if !value.is_finite() {
        return Err(ConfigError::Invalid {
            name: "MODEL_TEMPERATURE",
            reason: "must be a finite number".to_string(),
        });
    }

    Ok(value)
}

// Secrets stay out of logs even when the whole config is printed.
impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("access_key", &"<redacted>")
            .field("openai_api_key", &"<redacted>")
            .field("model_temperature", &self.model_temperature)
            .field("openai_model", &self.model())
            .field("openai_org_id", &self.openai_org_id)
            .field("openai_base_url", &self.base_url())
            .finish()
    }
}
