//! LLM settings

use crate::llm::error::{LlmError, LlmResult};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// LLM provider kind
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    /// OpenAI (GPT-4, GPT-4o, ...)
    OpenAI,
    /// OpenAI-compatible endpoint
    Custom,
}

/// LLM settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Provider
    pub provider: LlmProvider,
    /// API key. Supplied per run, never read from or written to config files
    #[serde(skip)]
    pub api_key: Option<SecretString>,
    /// API base URL override (required for custom providers)
    pub endpoint: Option<String>,
    /// Default model
    pub default_model: String,
    /// Request timeout (seconds)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Default temperature
    #[serde(default = "default_temperature")]
    pub default_temperature: f32,
    /// Default completion token limit
    #[serde(default = "default_max_tokens")]
    pub default_max_tokens: usize,
}

fn default_timeout() -> u64 {
    60
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> usize {
    3000
}

impl LlmConfig {
    /// OpenAI settings
    pub fn openai(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            provider: LlmProvider::OpenAI,
            api_key: Some(SecretString::new(api_key.into().into_boxed_str())),
            endpoint: None,
            default_model: model.into(),
            timeout_secs: default_timeout(),
            default_temperature: default_temperature(),
            default_max_tokens: default_max_tokens(),
        }
    }

    /// OpenAI-compatible endpoint settings
    pub fn custom(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            provider: LlmProvider::Custom,
            endpoint: Some(endpoint.into()),
            ..Self::openai(api_key, model)
        }
    }

    /// Returns a copy carrying the given API key
    pub fn with_api_key(mut self, api_key: SecretString) -> Self {
        self.api_key = Some(api_key);
        self
    }

    /// Request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// API key (exposed)
    pub fn get_api_key(&self) -> Option<&str> {
        self.api_key.as_ref().map(|k| k.expose_secret())
    }

    /// Validates the settings
    pub fn validate(&self) -> LlmResult<()> {
        if self.api_key.is_none() {
            return Err(LlmError::ConfigError(
                "API key is required for OpenAI providers".to_string(),
            ));
        }

        if self.provider == LlmProvider::Custom && self.endpoint.is_none() {
            return Err(LlmError::ConfigError(
                "Endpoint is required for custom providers".to_string(),
            ));
        }

        if !(0.0..=2.0).contains(&self.default_temperature) {
            return Err(LlmError::ConfigError(
                "Temperature must be between 0.0 and 2.0".to_string(),
            ));
        }

        if self.default_max_tokens == 0 || self.default_max_tokens > 100_000 {
            return Err(LlmError::ConfigError(
                "max_tokens must be between 1 and 100000".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: LlmProvider::OpenAI,
            api_key: None,
            endpoint: None,
            default_model: "gpt-4".to_string(),
            timeout_secs: default_timeout(),
            default_temperature: default_temperature(),
            default_max_tokens: default_max_tokens(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openai_config() {
        let config = LlmConfig::openai("test-key", "gpt-4");
        assert_eq!(config.provider, LlmProvider::OpenAI);
        assert_eq!(config.default_model, "gpt-4");
        assert_eq!(config.get_api_key(), Some("test-key"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_requires_key() {
        let config = LlmConfig::default();
        assert!(config.validate().is_err());

        let config = config.with_api_key(SecretString::from("k".to_string()));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_invalid_temperature() {
        let mut config = LlmConfig::openai("test-key", "gpt-4");
        config.default_temperature = 3.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_invalid_max_tokens() {
        let mut config = LlmConfig::openai("test-key", "gpt-4");
        config.default_max_tokens = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_custom_requires_endpoint() {
        let mut config = LlmConfig::custom("k", "http://localhost:8080/v1", "llama-3");
        assert!(config.validate().is_ok());
        config.endpoint = None;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_api_key_not_serialized() {
        let config = LlmConfig::openai("super-secret", "gpt-4");
        let toml = toml::to_string(&config).unwrap();
        assert!(!toml.contains("super-secret"));
    }
}
