//! BeginIntakeHandler - Start or resume a user's dialog.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::session::{ConversationSession, IntakeStep};
use crate::ports::SessionStore;

/// Command to start (or resume) the intake dialog.
#[derive(Debug, Clone)]
pub struct BeginIntakeCommand {
    pub user_id: UserId,
}

/// Result of beginning the dialog.
#[derive(Debug, Clone, PartialEq)]
pub struct BeginIntakeResult {
    pub step: IntakeStep,
    /// True when an unfinished dialog was picked up again.
    pub resumed: bool,
}

/// Handler for beginning the intake dialog.
pub struct BeginIntakeHandler {
    store: Arc<dyn SessionStore>,
}

impl BeginIntakeHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, cmd: BeginIntakeCommand) -> Result<BeginIntakeResult, DomainError> {
        // 1. Load or create
        let mut session = self
            .store
            .load(&cmd.user_id)
            .await?
            .unwrap_or_else(|| ConversationSession::new(cmd.user_id.clone()));

        // 2. Begin; a rejected transition leaves the stored session as is
        let resumed = session.has_unfinished();
        let step = session.begin()?;

        // 3. Persist
        self.store.save(&session).await?;

        tracing::info!(
            user_id = %cmd.user_id,
            resumed,
            phase = ?session.phase(),
            "intake started"
        );

        Ok(BeginIntakeResult { step, resumed })
    }
}
