//! Session store port.
//!
//! Sessions are keyed by user id and accessed with get/set semantics only.
//! The caller serializes turns per user; implementations need not lock
//! across a load/save pair.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::session::ConversationSession;

/// Persistence port for `ConversationSession`.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Loads the session for a user.
    ///
    /// Returns `None` for a user never seen before.
    async fn load(&self, user_id: &UserId) -> Result<Option<ConversationSession>, DomainError>;

    /// Stores a session, replacing any previous one for the same user.
    ///
    /// # Errors
    ///
    /// - `StorageError` on persistence failure
    async fn save(&self, session: &ConversationSession) -> Result<(), DomainError>;

    /// Drops every stored session (external bulk reset).
    async fn clear_all(&self) -> Result<(), DomainError>;
}
