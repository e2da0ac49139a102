//! AnswerWeightQuestionHandler - Record one forced-choice answer.

use std::sync::Arc;

use crate::domain::elicitation::OptionChoice;
use crate::domain::foundation::{DomainError, UserId};
use crate::domain::session::IntakeStep;
use crate::ports::SessionStore;

/// Command carrying the answer to quiz question `index` (1-based).
#[derive(Debug, Clone)]
pub struct AnswerWeightQuestionCommand {
    pub user_id: UserId,
    pub index: u8,
    pub choice: OptionChoice,
}

/// Handler for quiz answers.
pub struct AnswerWeightQuestionHandler {
    store: Arc<dyn SessionStore>,
}

impl AnswerWeightQuestionHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, cmd: AnswerWeightQuestionCommand) -> Result<IntakeStep, DomainError> {
        let mut session = self.store.load(&cmd.user_id).await?.ok_or_else(|| {
            DomainError::invalid_transition("answer_weight_question", "no quiz in progress")
        })?;

        let step = session.answer_weight_question(cmd.index, cmd.choice)?;
        self.store.save(&session).await?;

        if let IntakeStep::WeightsFinalized { summary, .. } = &step {
            tracing::info!(
                user_id = %cmd.user_id,
                top = ?summary.top,
                "preference weights finalized"
            );
        }

        Ok(step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemorySessionStore;
    use crate::application::handlers::intake::{BeginIntakeCommand, BeginIntakeHandler};
    use crate::domain::elicitation::Dimension;
    use crate::domain::profile::SlotName;
    use crate::domain::session::SessionPhase;

    fn user() -> UserId {
        UserId::new("U1").unwrap()
    }

    fn answer(index: u8, choice: OptionChoice) -> AnswerWeightQuestionCommand {
        AnswerWeightQuestionCommand {
            user_id: user(),
            index,
            choice,
        }
    }

    async fn started() -> (Arc<InMemorySessionStore>, AnswerWeightQuestionHandler) {
        let store = Arc::new(InMemorySessionStore::new());
        BeginIntakeHandler::new(store.clone())
            .handle(BeginIntakeCommand { user_id: user() })
            .await
            .unwrap();
        let handler = AnswerWeightQuestionHandler::new(store.clone());
        (store, handler)
    }

    #[tokio::test]
    async fn six_answers_finalize_weights() {
        let (store, handler) = started().await;

        for index in 1..=5 {
            let step = handler.handle(answer(index, OptionChoice::A)).await.unwrap();
            assert_eq!(step, IntakeStep::AskWeightQuestion { index: index + 1 });
        }
        let step = handler.handle(answer(6, OptionChoice::A)).await.unwrap();

        match step {
            IntakeStep::WeightsFinalized { weights, next_slot, .. } => {
                assert!(weights.get(Dimension::Budget) >= 10);
                assert_eq!(next_slot, Some(SlotName::Budget));
            }
            other => panic!("unexpected {:?}", other),
        }
        let stored = store.load(&user()).await.unwrap().unwrap();
        assert_eq!(stored.phase(), SessionPhase::SlotFilling);
        assert!(stored.weights().is_some());
    }

    #[tokio::test]
    async fn out_of_range_index_is_rejected_without_change() {
        let (store, handler) = started().await;

        let err = handler.handle(answer(7, OptionChoice::A)).await.unwrap_err();

        assert!(err.is_invalid_transition());
        assert_eq!(store.load(&user()).await.unwrap().unwrap().weight_stage(), 1);
    }

    #[tokio::test]
    async fn unknown_user_has_no_quiz() {
        let handler = AnswerWeightQuestionHandler::new(Arc::new(InMemorySessionStore::new()));
        let err = handler.handle(answer(1, OptionChoice::B)).await.unwrap_err();
        assert!(err.is_invalid_transition());
    }
}
