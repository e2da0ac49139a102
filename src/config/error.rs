//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("AI timeout must be between 1 and 9 seconds")]
    InvalidTimeout,

    #[error("AI temperature must be between 0 and 2")]
    InvalidTemperature,

    #[error("AI base URL must start with http:// or https://")]
    InvalidBaseUrl,

    #[error("Audit log capacity must be at least 1")]
    InvalidAuditCapacity,

    #[error("Invalid log filter directive: {0}")]
    InvalidLogFilter(String),
}
