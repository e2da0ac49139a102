//! PauseIntakeHandler - Leave slot filling, keep the profile.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, UserId};
use crate::ports::SessionStore;

#[derive(Debug, Clone)]
pub struct PauseIntakeCommand {
    pub user_id: UserId,
}

pub struct PauseIntakeHandler {
    store: Arc<dyn SessionStore>,
}

impl PauseIntakeHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, cmd: PauseIntakeCommand) -> Result<(), DomainError> {
        let mut session = self
            .store
            .load(&cmd.user_id)
            .await?
            .ok_or_else(|| DomainError::invalid_transition("pause", "no dialog to pause"))?;

        session.pause()?;
        self.store.save(&session).await?;

        tracing::info!(user_id = %cmd.user_id, "intake paused");
        Ok(())
    }
}
