//! Extraction audit log port.
//!
//! Every completion-backed extraction attempt and every guidance call is
//! recorded, successful or not, so extraction quality can be measured
//! after the fact.

use async_trait::async_trait;

use crate::domain::extraction::ExtractionLogEntry;
use crate::domain::foundation::DomainError;

#[async_trait]
pub trait ExtractionAuditLog: Send + Sync {
    /// Appends one entry.
    async fn record(&self, entry: ExtractionLogEntry) -> Result<(), DomainError>;
}
