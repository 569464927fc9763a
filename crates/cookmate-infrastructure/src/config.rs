//! Application configuration.
//!
//! Read from `config.toml` in the configuration directory. Every key is
//! optional; environment variables override the file.

use cookmate_core::chat::DEFAULT_GREETING;
use cookmate_core::{CookmateError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Overrides `api.base_url`.
pub const API_URL_ENV: &str = "COOKMATE_API_URL";
/// Overrides `auth.token`.
pub const API_TOKEN_ENV: &str = "COOKMATE_API_TOKEN";

/// Root of `config.toml`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CookmateConfig {
    pub api: ApiConfig,
    pub assistant: AssistantConfig,
    pub auth: AuthConfig,
}

/// `[api]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    /// Timeout for every call except chat.
    pub request_timeout_secs: u64,
    /// Chat waits on model inference and gets a much longer budget.
    pub chat_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api".to_string(),
            request_timeout_secs: 10,
            chat_timeout_secs: 120,
        }
    }
}

/// `[assistant]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    /// Pause between an assistant reply and its recipe recommendation.
    pub recommendation_delay_ms: u64,
    pub greeting: String,
    pub quick_replies: Vec<String>,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            recommendation_delay_ms: 800,
            greeting: DEFAULT_GREETING.to_string(),
            quick_replies: vec![
                "What can I use instead of this ingredient?".to_string(),
                "How do I know when it's done?".to_string(),
                "Suggest a side dish".to_string(),
                "How should I store leftovers?".to_string(),
            ],
        }
    }
}

/// `[auth]` section.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl CookmateConfig {
    /// Parses TOML text and validates it.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Applies environment overrides using `lookup` to read variables.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(API_URL_ENV).filter(|v| !v.trim().is_empty()) {
            self.api.base_url = url;
        }
        if let Some(token) = lookup(API_TOKEN_ENV).filter(|v| !v.trim().is_empty()) {
            self.auth.token = Some(token);
        }
    }

    /// Rejects values that would make the client unusable.
    pub fn validate(&self) -> Result<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(CookmateError::config("api.base_url must not be empty"));
        }
        if self.api.request_timeout_secs == 0 || self.api.chat_timeout_secs == 0 {
            return Err(CookmateError::config("api timeouts must be greater than zero"));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.api.request_timeout_secs)
    }

    pub fn chat_timeout(&self) -> Duration {
        Duration::from_secs(self.api.chat_timeout_secs)
    }

    pub fn recommendation_delay(&self) -> Duration {
        Duration::from_millis(self.assistant.recommendation_delay_ms)
    }
}
