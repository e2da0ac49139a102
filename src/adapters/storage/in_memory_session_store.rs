//! In-Memory Session Store Adapter
//!
//! Keeps sessions in a map. Used in tests and when no session directory is
//! configured.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::session::ConversationSession;
use crate::ports::SessionStore;

#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<UserId, ConversationSession>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored sessions.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self, user_id: &UserId) -> Result<Option<ConversationSession>, DomainError> {
        Ok(self.sessions.read().await.get(user_id).cloned())
    }

    async fn save(&self, session: &ConversationSession) -> Result<(), DomainError> {
        self.sessions
            .write()
            .await
            .insert(session.user_id().clone(), session.clone());
        Ok(())
    }

    async fn clear_all(&self) -> Result<(), DomainError> {
        self.sessions.write().await.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    #[tokio::test]
    async fn unknown_user_loads_none() {
        let store = InMemorySessionStore::new();
        assert!(store.load(&user("U1")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn save_replaces_previous_session() {
        let store = InMemorySessionStore::new();
        let mut session = ConversationSession::new(user("U1"));
        store.save(&session).await.unwrap();

        session.begin().unwrap();
        store.save(&session).await.unwrap();

        let loaded = store.load(&user("U1")).await.unwrap().unwrap();
        assert!(loaded.has_unfinished());
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn clear_all_drops_everything() {
        let store = InMemorySessionStore::new();
        store.save(&ConversationSession::new(user("U1"))).await.unwrap();
        store.save(&ConversationSession::new(user("U2"))).await.unwrap();

        store.clear_all().await.unwrap();
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn clones_share_state() {
        let store = InMemorySessionStore::new();
        let clone = store.clone();
        store.save(&ConversationSession::new(user("U1"))).await.unwrap();
        assert!(clone.load(&user("U1")).await.unwrap().is_some());
    }
}
