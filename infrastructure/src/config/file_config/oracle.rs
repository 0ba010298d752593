//! Oracle configuration from TOML (`[oracle]` section)

use crate::config::ConfigError;
use crate::oracle::OpenAiSettings;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw OpenAI-compatible endpoint configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOracleConfig {
    pub model: String,
    /// Base URL for the API, without the `/chat/completions` suffix
    pub base_url: String,
    /// Environment variable holding the API key
    pub api_key_env: String,
    /// Direct API key (prefer `api_key_env`)
    pub api_key: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
    /// Per-request timeout
    pub timeout_seconds: Option<u64>,
}

impl Default for FileOracleConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            api_key: None,
            max_tokens: None,
            temperature: None,
            timeout_seconds: Some(120),
        }
    }
}

impl FileOracleConfig {
    /// Build adapter settings, reading the key from the process environment
    pub fn to_settings(&self) -> Result<OpenAiSettings, ConfigError> {
        self.to_settings_with(|name| std::env::var(name).ok())
    }

    /// Build adapter settings with a custom environment lookup
    pub fn to_settings_with(
        &self,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<OpenAiSettings, ConfigError> {
        let api_key = self
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| env(&self.api_key_env).filter(|key| !key.trim().is_empty()))
            .ok_or_else(|| ConfigError::MissingApiKey {
                env: self.api_key_env.clone(),
            })?;

        Ok(OpenAiSettings {
            base_url: self.base_url.clone(),
            api_key,
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            timeout: self.timeout_seconds.map(Duration::from_secs),
        })
    }
}
