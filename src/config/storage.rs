//! Session storage and audit retention configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Where sessions live and how much audit history is kept
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory for one YAML file per user; in memory when absent
    pub session_dir: Option<PathBuf>,

    /// Extraction audit entries retained in memory; the oldest are evicted
    #[serde(default = "default_audit_capacity")]
    pub audit_capacity: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            session_dir: None,
            audit_capacity: default_audit_capacity(),
        }
    }
}

fn default_audit_capacity() -> usize {
    1_000
}

impl StorageConfig {
    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.audit_capacity == 0 {
            return Err(ValidationError::InvalidAuditCapacity);
        }
        Ok(())
    }
}
