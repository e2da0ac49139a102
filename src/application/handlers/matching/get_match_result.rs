//! GetMatchResultHandler - Read the latest scoring outcome.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::session::MatchStatus;
use crate::ports::SessionStore;

#[derive(Debug, Clone)]
pub struct GetMatchResultQuery {
    pub user_id: UserId,
}

pub struct GetMatchResultHandler {
    store: Arc<dyn SessionStore>,
}

impl GetMatchResultHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// A stored record from an older request reads as `Pending`.
    pub async fn handle(&self, query: GetMatchResultQuery) -> Result<MatchStatus, DomainError> {
        Ok(self
            .store
            .load(&query.user_id)
            .await?
            .map(|session| session.match_status())
            .unwrap_or(MatchStatus::NotRequested))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemorySessionStore;
    use crate::domain::elicitation::OptionChoice;
    use crate::domain::foundation::MatchRequestId;
    use crate::domain::profile::{Budget, LocationPref, ManagementPref, ProfileUpdate, RoomType};
    use crate::domain::session::{ConversationSession, MatchOutcome, MatchRecord};

    fn user() -> UserId {
        UserId::new("U1").unwrap()
    }

    fn query() -> GetMatchResultQuery {
        GetMatchResultQuery { user_id: user() }
    }

    #[tokio::test]
    async fn unknown_user_has_not_requested() {
        let handler = GetMatchResultHandler::new(Arc::new(InMemorySessionStore::new()));
        assert_eq!(handler.handle(query()).await.unwrap(), MatchStatus::NotRequested);
    }

    #[tokio::test]
    async fn stale_record_reads_as_pending() {
        let store = Arc::new(InMemorySessionStore::new());
        let mut session = ConversationSession::new(user());
        session.begin().unwrap();
        for index in 1..=6 {
            session.answer_weight_question(index, OptionChoice::B).unwrap();
        }
        let update = ProfileUpdate::new()
            .with_budget(Budget::new(5000))
            .with_location(LocationPref::School)
            .with_room_type(RoomType::Studio)
            .with_management(ManagementPref::Indifferent)
            .with_features_done();
        session.apply_extraction("五千 學校 套房", update).unwrap();

        let first = session.request_match().unwrap();
        assert!(session.record_match(MatchRecord::new(first, MatchOutcome::NoArchetypes)));
        let second = session.request_match().unwrap();
        assert!(!session.record_match(MatchRecord::new(MatchRequestId::new(), MatchOutcome::NoArchetypes)));
        store.save(&session).await.unwrap();

        let status = GetMatchResultHandler::new(store).handle(query()).await.unwrap();

        assert_eq!(status, MatchStatus::Pending { request_id: second });
    }
}
