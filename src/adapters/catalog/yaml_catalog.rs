//! YAML-backed persona catalog.
//!
//! Records are validated into archetypes when the file is loaded; a single
//! bad record rejects the whole catalog. Inactive records are dropped.

use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::matching::{Archetype, ArchetypeConfig};
use crate::ports::PersonaCatalog;

const SEED_CATALOG: &str = include_str!("seed_archetypes.yaml");

/// Either a bare list of records or `archetypes: [...]`.
#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogDocument {
    Wrapped { archetypes: Vec<ArchetypeConfig> },
    Bare(Vec<ArchetypeConfig>),
}

impl CatalogDocument {
    fn into_records(self) -> Vec<ArchetypeConfig> {
        match self {
            CatalogDocument::Wrapped { archetypes } => archetypes,
            CatalogDocument::Bare(records) => records,
        }
    }
}

#[derive(Debug, Clone)]
pub struct YamlPersonaCatalog {
    archetypes: Vec<Archetype>,
}

impl YamlPersonaCatalog {
    /// The five archetypes bundled with the crate.
    pub fn seed() -> Result<Self, DomainError> {
        Self::from_yaml(SEED_CATALOG)
    }

    /// Loads and validates a catalog file.
    pub async fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, DomainError> {
        let path = path.as_ref();
        let yaml = tokio::fs::read_to_string(path).await.map_err(|e| {
            DomainError::new(ErrorCode::CatalogError, format!("read {}: {}", path.display(), e))
        })?;
        let catalog = Self::from_yaml(&yaml)?;
        tracing::info!(
            path = %path.display(),
            archetypes = catalog.archetypes.len(),
            "persona catalog loaded"
        );
        Ok(catalog)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, DomainError> {
        let document: CatalogDocument = serde_yaml::from_str(yaml).map_err(|e| {
            DomainError::new(ErrorCode::CatalogError, format!("invalid catalog document: {}", e))
        })?;

        let mut seen = HashSet::new();
        let mut archetypes = Vec::new();
        for record in document.into_records() {
            if !seen.insert(record.id.clone()) {
                return Err(DomainError::new(ErrorCode::CatalogError, "duplicate archetype id")
                    .with_detail("id", record.id));
            }
            if !record.active {
                tracing::debug!(id = %record.id, "skipping inactive archetype");
                continue;
            }
            let id = record.id.clone();
            let archetype = Archetype::try_from(record).map_err(|e| {
                DomainError::new(ErrorCode::CatalogError, e.to_string()).with_detail("id", id)
            })?;
            archetypes.push(archetype);
        }

        Ok(Self { archetypes })
    }

    pub fn archetypes(&self) -> &[Archetype] {
        &self.archetypes
    }
}

#[async_trait]
impl PersonaCatalog for YamlPersonaCatalog {
    async fn list_active(&self) -> Result<Vec<Archetype>, DomainError> {
        Ok(self.archetypes.clone())
    }
}
