//! ResetIntakeHandler - Clear one user's dialog, or every stored session.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::session::ResetScope;
use crate::ports::SessionStore;

/// Which sessions to reset.
#[derive(Debug, Clone)]
pub enum ResetIntakeCommand {
    /// One user's dialog; `scope` decides whether elicited weights survive.
    User { user_id: UserId, scope: ResetScope },
    /// Drop every stored session.
    AllUsers,
}

pub struct ResetIntakeHandler {
    store: Arc<dyn SessionStore>,
}

impl ResetIntakeHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, cmd: ResetIntakeCommand) -> Result<(), DomainError> {
        match cmd {
            ResetIntakeCommand::User { user_id, scope } => {
                // Nothing stored means nothing to reset.
                let Some(mut session) = self.store.load(&user_id).await? else {
                    return Ok(());
                };
                session.reset(scope);
                self.store.save(&session).await?;
                tracing::info!(user_id = %user_id, scope = ?scope, "intake reset");
            }
            ResetIntakeCommand::AllUsers => {
                self.store.clear_all().await?;
                tracing::warn!("all intake sessions cleared");
            }
        }
        Ok(())
    }
}
