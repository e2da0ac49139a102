//! Matching configuration

use serde::Deserialize;
use std::path::PathBuf;

/// Persona catalog and feature matching settings
#[derive(Debug, Clone, Deserialize)]
pub struct MatchingConfig {
    /// YAML catalog file; the bundled seed catalog is used when absent
    pub catalog_path: Option<PathBuf>,

    /// Rate features with one completion per scoring pass instead of
    /// substring matching alone
    #[serde(default = "default_semantic_features")]
    pub semantic_features: bool,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            catalog_path: None,
            semantic_features: default_semantic_features(),
        }
    }
}

fn default_semantic_features() -> bool {
    true
}
