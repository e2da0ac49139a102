//! SubmitUtteranceHandler - One free-text turn of slot filling.

use std::sync::Arc;

use crate::domain::extraction::{ExtractionOutcome, ExtractionRequest, StrategyKind};
use crate::domain::foundation::{DomainError, UserId};
use crate::domain::profile::SlotName;
use crate::domain::session::{IntakeStep, SessionPhase};
use crate::ports::{SessionStore, SlotExtractor};

/// Command carrying one chat message.
#[derive(Debug, Clone)]
pub struct SubmitUtteranceCommand {
    /// Sender; without an active session the message is ignored.
    pub user_id: UserId,
    /// Raw message text; kept in the transcript when a slot is filled.
    pub text: String,
}

/// What the dialog should do after the turn.
#[derive(Debug, Clone, PartialEq)]
pub enum UtteranceReply {
    /// Slots were merged; `step` says what to ask next.
    Advanced {
        step: IntakeStep,
        strategy: StrategyKind,
    },
    /// Nothing usable was said. The session is unchanged.
    Redirected {
        slot: Option<SlotName>,
        message: String,
        guided: bool,
    },
    /// The user has no dialog in slot filling.
    NoActiveSession,
}

/// Handler for slot-filling turns.
pub struct SubmitUtteranceHandler {
    store: Arc<dyn SessionStore>,
    extractor: Arc<dyn SlotExtractor>,
}

impl SubmitUtteranceHandler {
    pub fn new(store: Arc<dyn SessionStore>, extractor: Arc<dyn SlotExtractor>) -> Self {
        Self { store, extractor }
    }

    pub async fn handle(&self, cmd: SubmitUtteranceCommand) -> Result<UtteranceReply, DomainError> {
        // 1. Load; no session or an idle one means nothing to fill
        let Some(mut session) = self.store.load(&cmd.user_id).await? else {
            return Ok(UtteranceReply::NoActiveSession);
        };
        match session.phase() {
            SessionPhase::Idle => return Ok(UtteranceReply::NoActiveSession),
            SessionPhase::WeightElicitation => {
                return Err(DomainError::invalid_transition(
                    "submit_utterance",
                    "quiz answers are expected, not free text",
                ))
            }
            SessionPhase::SlotFilling => {}
        }

        // 2. Extract against the slot being asked
        let hint = session.current_slot();
        let request = ExtractionRequest::new(cmd.user_id.clone(), cmd.text.clone(), hint);

        match self.extractor.extract(&request).await {
            ExtractionOutcome::Extracted { update, strategy } => {
                // 3. Merge, persist
                let step = session.apply_extraction(&cmd.text, update)?;
                self.store.save(&session).await?;

                if step == IntakeStep::ReadyToScore {
                    tracing::info!(user_id = %cmd.user_id, "profile complete");
                } else {
                    tracing::debug!(user_id = %cmd.user_id, step = ?step, "profile updated");
                }
                Ok(UtteranceReply::Advanced { step, strategy })
            }
            ExtractionOutcome::Redirect { message, guided } => Ok(UtteranceReply::Redirected {
                slot: hint,
                message,
                guided,
            }),
        }
    }
}
