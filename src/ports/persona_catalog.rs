//! Persona catalog port (read side).

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::matching::Archetype;

/// Read-only access to the archetypes profiles are scored against.
#[async_trait]
pub trait PersonaCatalog: Send + Sync {
    /// Active archetypes in catalog order.
    ///
    /// Order matters: ties in score keep it.
    async fn list_active(&self) -> Result<Vec<Archetype>, DomainError>;
}
