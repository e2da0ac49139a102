//! In-memory persona catalog for tests and embedding.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::matching::Archetype;
use crate::ports::PersonaCatalog;

#[derive(Debug, Clone, Default)]
pub struct InMemoryPersonaCatalog {
    archetypes: Arc<RwLock<Vec<Archetype>>>,
    fail_with: Arc<RwLock<Option<String>>>,
}

impl InMemoryPersonaCatalog {
    pub fn new(archetypes: Vec<Archetype>) -> Self {
        Self {
            archetypes: Arc::new(RwLock::new(archetypes)),
            fail_with: Arc::default(),
        }
    }

    pub async fn replace(&self, archetypes: Vec<Archetype>) {
        *self.archetypes.write().await = archetypes;
    }

    /// Makes subsequent reads fail with a catalog error.
    pub async fn fail_with(&self, message: impl Into<String>) {
        *self.fail_with.write().await = Some(message.into());
    }
}

#[async_trait]
impl PersonaCatalog for InMemoryPersonaCatalog {
    async fn list_active(&self) -> Result<Vec<Archetype>, DomainError> {
        if let Some(message) = self.fail_with.read().await.clone() {
            return Err(DomainError::new(ErrorCode::CatalogError, message));
        }
        Ok(self.archetypes.read().await.clone())
    }
}
