//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `RENTAL_PERSONA` prefix and nested values use double underscores as separators.
//! Every setting has a default, so an empty environment yields a working
//! configuration against a local Ollama server.
//!
//! # Example
//!
//! ```no_run
//! use rental_persona::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Completions from {}", config.ai.base_url);
//! ```

mod ai;
mod error;
mod logging;
mod matching;
mod storage;

pub use ai::{AiConfig, AiProvider};
pub use error::{ConfigError, ValidationError};
pub use logging::LoggingConfig;
pub use matching::MatchingConfig;
pub use storage::StorageConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Completion backend (Ollama or disabled)
    #[serde(default)]
    pub ai: AiConfig,

    /// Persona catalog and feature matching
    #[serde(default)]
    pub matching: MatchingConfig,

    /// Session persistence
    #[serde(default)]
    pub storage: StorageConfig,

    /// Log filter and format
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `RENTAL_PERSONA` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `RENTAL_PERSONA__AI__TIMEOUT_SECS=5` -> `ai.timeout_secs = 5`
    /// - `RENTAL_PERSONA__STORAGE__SESSION_DIR=./data` -> `storage.session_dir = ./data`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("RENTAL_PERSONA")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.ai.validate()?;
        self.storage.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::env;
    use std::path::PathBuf;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const KEYS: &[&str] = &[
        "RENTAL_PERSONA__AI__PROVIDER",
        "RENTAL_PERSONA__AI__TIMEOUT_SECS",
        "RENTAL_PERSONA__AI__API_KEY",
        "RENTAL_PERSONA__MATCHING__SEMANTIC_FEATURES",
        "RENTAL_PERSONA__STORAGE__SESSION_DIR",
        "RENTAL_PERSONA__STORAGE__AUDIT_CAPACITY",
        "RENTAL_PERSONA__LOGGING__JSON",
    ];

    /// Helper to clear environment variables after testing
    fn clear_env() {
        for key in KEYS {
            env::remove_var(key);
        }
    }

    #[test]
    fn test_empty_environment_uses_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let config = AppConfig::load().unwrap();

        assert_eq!(config.ai.provider, AiProvider::Ollama);
        assert_eq!(config.ai.timeout_secs, 8);
        assert!(config.matching.semantic_features);
        assert!(config.storage.session_dir.is_none());
        assert_eq!(config.storage.audit_capacity, 1_000);
        assert_eq!(config.logging.filter, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("RENTAL_PERSONA__AI__PROVIDER", "disabled");
        env::set_var("RENTAL_PERSONA__AI__TIMEOUT_SECS", "5");
        env::set_var("RENTAL_PERSONA__AI__API_KEY", "gateway-token");
        env::set_var("RENTAL_PERSONA__MATCHING__SEMANTIC_FEATURES", "false");
        env::set_var("RENTAL_PERSONA__STORAGE__SESSION_DIR", "/var/lib/rental");
        env::set_var("RENTAL_PERSONA__STORAGE__AUDIT_CAPACITY", "250");
        env::set_var("RENTAL_PERSONA__LOGGING__JSON", "true");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.ai.provider, AiProvider::Disabled);
        assert_eq!(config.ai.timeout_secs, 5);
        assert_eq!(
            config.ai.api_key.as_ref().map(|k| k.expose_secret().as_str()),
            Some("gateway-token")
        );
        assert!(!config.matching.semantic_features);
        assert_eq!(config.storage.session_dir, Some(PathBuf::from("/var/lib/rental")));
        assert_eq!(config.storage.audit_capacity, 250);
        assert!(config.logging.json);
    }

    #[test]
    fn test_validate_rejects_long_timeout() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("RENTAL_PERSONA__AI__TIMEOUT_SECS", "30");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.validate(), Err(ValidationError::InvalidTimeout));
    }

    #[test]
    fn test_validate_rejects_zero_audit_capacity() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("RENTAL_PERSONA__STORAGE__AUDIT_CAPACITY", "0");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.validate(), Err(ValidationError::InvalidAuditCapacity));
    }
}
