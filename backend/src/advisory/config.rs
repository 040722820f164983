//! Advisory gateway configuration
//!
//! Built once at process start and shared by reference (`Arc`) with every
//! component that talks to the advisory service. There is no global client.

use crate::advisory::gateway::AdvisoryError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TIMEOUT_MS: u64 = 15_000;
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_TOP_K: u32 = 40;

/// Connection and sampling settings for the advisory service
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisoryConfig {
    /// API key sent with every request
    pub api_key: String,

    /// Model name, e.g. `gemini-3-flash-preview`
    pub model: String,

    /// REST base URL, without trailing slash
    pub base_url: String,

    /// Per-call timeout in milliseconds
    pub timeout_ms: u64,

    /// Sampling temperature for guidance notes
    pub temperature: f32,

    /// Top-k sampling for guidance notes
    pub top_k: u32,
}

impl Default for AdvisoryConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            temperature: DEFAULT_TEMPERATURE,
            top_k: DEFAULT_TOP_K,
        }
    }
}

// Keep the key out of logs
impl std::fmt::Debug for AdvisoryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdvisoryConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout_ms", &self.timeout_ms)
            .field("temperature", &self.temperature)
            .field("top_k", &self.top_k)
            .finish()
    }
}

impl AdvisoryConfig {
    /// Read settings from the process environment
    ///
    /// - `API_KEY` (falls back to `GEMINI_API_KEY`)
    /// - `ADVISORY_MODEL`
    /// - `ADVISORY_BASE_URL`
    /// - `ADVISORY_TIMEOUT_MS`
    pub fn from_env() -> Result<Self, AdvisoryError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`AdvisoryConfig::from_env`] with an explicit variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AdvisoryError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        config.api_key = lookup("API_KEY")
            .or_else(|| lookup("GEMINI_API_KEY"))
            .unwrap_or_default();

        if let Some(model) = lookup("ADVISORY_MODEL") {
            config.model = model;
        }
        if let Some(base_url) = lookup("ADVISORY_BASE_URL") {
            config.base_url = base_url.trim_end_matches('/').to_string();
        }
        if let Some(raw) = lookup("ADVISORY_TIMEOUT_MS") {
            config.timeout_ms = raw.trim().parse().map_err(|_| {
                AdvisoryError::InvalidConfig(format!("ADVISORY_TIMEOUT_MS is not a number: {}", raw))
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Check the settings are usable
    pub fn validate(&self) -> Result<(), AdvisoryError> {
        if self.api_key.trim().is_empty() {
            return Err(AdvisoryError::MissingApiKey);
        }
        if self.model.trim().is_empty() {
            return Err(AdvisoryError::InvalidConfig("model must not be empty".to_string()));
        }
        if self.timeout_ms == 0 {
            return Err(AdvisoryError::InvalidConfig(
                "timeout_ms must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Full `generateContent` endpoint for the configured model
    pub fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}
