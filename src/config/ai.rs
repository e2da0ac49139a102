//! AI provider configuration

use secrecy::SecretString;
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// AI provider configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// Which completion backend to use
    #[serde(default)]
    pub provider: AiProvider,

    /// Base URL of the Ollama-compatible server
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model used for slot extraction and feature matching
    #[serde(default = "default_model")]
    pub extraction_model: String,

    /// Model used for guidance redirects
    #[serde(default = "default_model")]
    pub guidance_model: String,

    /// Bearer token for hosted gateways
    pub api_key: Option<SecretString>,

    /// Per-call timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Sampling temperature for extraction calls
    #[serde(default)]
    pub temperature: f32,

    /// Retries on retryable transport errors
    #[serde(default)]
    pub max_retries: u32,
}

/// AI provider type
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AiProvider {
    #[default]
    Ollama,
    /// Every call fails; the deterministic paths carry the dialog.
    Disabled,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn is_enabled(&self) -> bool {
        self.provider != AiProvider::Disabled
    }

    /// Validate AI configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(1..=9).contains(&self.timeout_secs) {
            return Err(ValidationError::InvalidTimeout);
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ValidationError::InvalidTemperature);
        }
        if self.provider == AiProvider::Ollama {
            if self.base_url.trim().is_empty() {
                return Err(ValidationError::MissingRequired("AI__BASE_URL"));
            }
            if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
                return Err(ValidationError::InvalidBaseUrl);
            }
            if self.extraction_model.trim().is_empty() {
                return Err(ValidationError::MissingRequired("AI__EXTRACTION_MODEL"));
            }
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            provider: AiProvider::default(),
            base_url: default_base_url(),
            extraction_model: default_model(),
            guidance_model: default_model(),
            api_key: None,
            timeout_secs: default_timeout(),
            temperature: 0.0,
            max_retries: 0,
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_model() -> String {
    "gemma3:4b".to_string()
}

fn default_timeout() -> u64 {
    8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ai_config_defaults() {
        let config = AiConfig::default();
        assert_eq!(config.provider, AiProvider::Ollama);
        assert_eq!(config.timeout_secs, 8);
        assert_eq!(config.extraction_model, "gemma3:4b");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_timeout_duration() {
        let config = AiConfig {
            timeout_secs: 5,
            ..Default::default()
        };
        assert_eq!(config.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_timeout_must_be_single_digit() {
        for secs in [0, 10, 120] {
            let config = AiConfig {
                timeout_secs: secs,
                ..Default::default()
            };
            assert_eq!(config.validate(), Err(ValidationError::InvalidTimeout));
        }
    }

    #[test]
    fn test_base_url_scheme() {
        let config = AiConfig {
            base_url: "localhost:11434".to_string(),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidBaseUrl));
    }

    #[test]
    fn test_disabled_provider_skips_endpoint_checks() {
        let config = AiConfig {
            provider: AiProvider::Disabled,
            base_url: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
        assert!(!config.is_enabled());
    }

    #[test]
    fn test_temperature_range() {
        let config = AiConfig {
            temperature: 3.5,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidTemperature));
    }
}
