//! Conversation session aggregate.
//!
//! One session per user. All phase changes go through this type; it never
//! performs I/O. Extraction happens outside and arrives here as a
//! `ProfileUpdate`.
//!
//! # Invariants
//!
//! - `weights` is populated only after all six quiz questions were answered
//!   at least once
//! - `weight_stage` only grows within one quiz pass and returns to 0 only on
//!   reset
//! - a rejected operation leaves the session untouched

use serde::{Deserialize, Serialize};

use super::match_record::{MatchRecord, MatchStatus};
use super::phase::SessionPhase;
use crate::domain::elicitation::{
    OptionChoice, PreferenceElicitor, PrioritySummary, WeightAnswers, WeightVector,
};
use crate::domain::foundation::{
    DomainError, ErrorCode, MatchRequestId, StateMachine, Timestamp, UserId,
};
use crate::domain::profile::{Profile, ProfileUpdate, RequiredSlots, SlotName};

/// What the dialog needs next.
#[derive(Debug, Clone, PartialEq)]
pub enum IntakeStep {
    /// Ask the forced-choice question with this 1-based index.
    AskWeightQuestion { index: u8 },
    /// The quiz just finished.
    WeightsFinalized {
        weights: WeightVector,
        summary: PrioritySummary,
        next_slot: Option<SlotName>,
    },
    /// Ask for this slot.
    AskSlot { slot: SlotName },
    /// Every required slot is present; the session is idle again.
    ReadyToScore,
    /// The user is not in a dialog.
    NoActiveSession,
}

/// How much `reset` clears.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResetScope {
    /// Profile and quiz progress; elicited weights survive.
    #[default]
    KeepWeights,
    /// Also forget elicited weights.
    Everything,
}

/// Per-user dialog state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationSession {
    user_id: UserId,
    phase: SessionPhase,
    profile: Profile,
    /// 0 = quiz not started; n = asking question n; 7 = quiz done.
    weight_stage: u8,
    weight_answers: WeightAnswers,
    weights: Option<WeightVector>,
    /// Set when a dialog starts, cleared on completion or reset. Decides
    /// between resume and fresh start in `begin`.
    has_unfinished: bool,
    /// Utterances consumed during slot filling, for keyword scoring.
    transcript: Vec<String>,
    latest_match_request: Option<MatchRequestId>,
    last_match: Option<MatchRecord>,
    #[serde(skip, default)]
    required: RequiredSlots,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl ConversationSession {
    /// Creates an idle session for a user seen for the first time.
    pub fn new(user_id: UserId) -> Self {
        let now = Timestamp::now();
        Self {
            user_id,
            phase: SessionPhase::Idle,
            profile: Profile::new(),
            weight_stage: 0,
            weight_answers: WeightAnswers::new(),
            weights: None,
            has_unfinished: false,
            transcript: Vec::new(),
            latest_match_request: None,
            last_match: None,
            required: RequiredSlots::standard(),
            created_at: now,
            updated_at: now,
        }
    }

    // ───────────────────────────────────────────────────────────────
    // Accessors
    // ───────────────────────────────────────────────────────────────

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn weight_stage(&self) -> u8 {
        self.weight_stage
    }

    pub fn weight_answers(&self) -> &WeightAnswers {
        &self.weight_answers
    }

    pub fn weights(&self) -> Option<&WeightVector> {
        self.weights.as_ref()
    }

    pub fn has_unfinished(&self) -> bool {
        self.has_unfinished
    }

    pub fn required_slots(&self) -> &RequiredSlots {
        &self.required
    }

    /// Utterances of the current dialog joined by newlines.
    pub fn raw_text(&self) -> String {
        self.transcript.join("\n")
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// The slot the next utterance is expected to answer.
    pub fn current_slot(&self) -> Option<SlotName> {
        if self.phase == SessionPhase::SlotFilling {
            self.profile.first_missing(&self.required)
        } else {
            None
        }
    }

    // ───────────────────────────────────────────────────────────────
    // Dialog operations
    // ───────────────────────────────────────────────────────────────

    /// Starts or resumes a dialog.
    ///
    /// An unfinished dialog resumes slot filling with its profile. Otherwise
    /// the profile starts empty and the quiz runs, unless weights from an
    /// earlier pass are still held.
    pub fn begin(&mut self) -> Result<IntakeStep, DomainError> {
        if self.has_unfinished {
            self.phase = self.phase.transition_for("begin", SessionPhase::SlotFilling)?;
            self.touch();
            return Ok(self.next_slot_step());
        }

        let target = if self.weights.is_some() {
            SessionPhase::SlotFilling
        } else {
            SessionPhase::WeightElicitation
        };
        self.phase = self.phase.transition_for("begin", target)?;

        self.profile = Profile::new();
        self.transcript.clear();
        self.has_unfinished = true;
        self.touch();

        if target == SessionPhase::WeightElicitation {
            self.weight_stage = 1;
            self.weight_answers.clear();
            Ok(IntakeStep::AskWeightQuestion { index: 1 })
        } else {
            Ok(self.next_slot_step())
        }
    }

    /// Records a quiz answer. The last answer finalizes the weights and
    /// moves on to slot filling.
    pub fn answer_weight_question(
        &mut self,
        index: u8,
        choice: OptionChoice,
    ) -> Result<IntakeStep, DomainError> {
        if self.phase != SessionPhase::WeightElicitation {
            return Err(DomainError::invalid_transition(
                "answer_weight_question",
                format!("no quiz in progress (phase {:?})", self.phase),
            ));
        }

        let elicitor = PreferenceElicitor::default();
        let count = elicitor.bank().scenario_count();
        if index == 0 || index > count {
            return Err(DomainError::invalid_transition(
                "answer_weight_question",
                format!("question {} is outside 1..={}", index, count),
            )
            .with_detail("index", index.to_string()));
        }
        if index != self.weight_stage {
            return Err(DomainError::invalid_transition(
                "answer_weight_question",
                format!("expected question {}, got {}", self.weight_stage, index),
            )
            .with_detail("index", index.to_string()));
        }

        self.weight_answers.insert(index, choice);
        self.weight_stage += 1;
        self.touch();

        if self.weight_stage <= count {
            return Ok(IntakeStep::AskWeightQuestion {
                index: self.weight_stage,
            });
        }

        let weights = elicitor.calculate_weights(&self.weight_answers);
        let summary = PreferenceElicitor::generate_summary(&weights);
        self.weights = Some(weights);
        self.phase = self
            .phase
            .transition_for("answer_weight_question", SessionPhase::SlotFilling)?;

        Ok(IntakeStep::WeightsFinalized {
            weights,
            summary,
            next_slot: self.profile.first_missing(&self.required),
        })
    }

    /// Merges one extraction result and re-checks completeness.
    ///
    /// Idle sessions ignore the utterance. Completing the profile moves the
    /// session to idle exactly once; later calls see no active session.
    pub fn apply_extraction(
        &mut self,
        utterance: &str,
        mut update: ProfileUpdate,
    ) -> Result<IntakeStep, DomainError> {
        match self.phase {
            SessionPhase::Idle => return Ok(IntakeStep::NoActiveSession),
            SessionPhase::WeightElicitation => {
                return Err(DomainError::invalid_transition(
                    "submit_utterance",
                    "quiz answers are expected, not free text",
                ))
            }
            SessionPhase::SlotFilling => {}
        }

        let hint = self.profile.first_missing(&self.required);
        update.settle_features_answer(hint);
        self.profile.apply(&update);
        if !utterance.trim().is_empty() {
            self.transcript.push(utterance.trim().to_string());
        }
        self.touch();

        if self.profile.is_complete(&self.required) {
            self.phase = self
                .phase
                .transition_for("submit_utterance", SessionPhase::Idle)?;
            self.has_unfinished = false;
            return Ok(IntakeStep::ReadyToScore);
        }

        Ok(self.next_slot_step())
    }

    /// Leaves slot filling without losing the profile.
    pub fn pause(&mut self) -> Result<(), DomainError> {
        if self.phase != SessionPhase::SlotFilling {
            return Err(DomainError::invalid_transition(
                "pause",
                format!("only slot filling can be paused (phase {:?})", self.phase),
            ));
        }
        self.phase = self.phase.transition_for("pause", SessionPhase::Idle)?;
        self.touch();
        Ok(())
    }

    /// Returns to idle and clears profile and quiz progress.
    pub fn reset(&mut self, scope: ResetScope) {
        self.phase = SessionPhase::Idle;
        self.profile = Profile::new();
        self.weight_stage = 0;
        self.weight_answers.clear();
        self.has_unfinished = false;
        self.transcript.clear();
        if scope == ResetScope::Everything {
            self.weights = None;
        }
        self.touch();
    }

    // ───────────────────────────────────────────────────────────────
    // Matching
    // ───────────────────────────────────────────────────────────────

    /// Issues a new scoring request for a completed, idle profile.
    pub fn request_match(&mut self) -> Result<MatchRequestId, DomainError> {
        if self.phase != SessionPhase::Idle {
            return Err(DomainError::invalid_transition(
                "request_match",
                "finish or pause the dialog before matching",
            ));
        }
        if !self.profile.is_complete(&self.required) {
            let missing = self
                .profile
                .first_missing(&self.required)
                .map(|s| s.to_string())
                .unwrap_or_default();
            return Err(DomainError::new(
                ErrorCode::ProfileIncomplete,
                "profile is missing required slots",
            )
            .with_detail("missing", missing));
        }

        let request_id = MatchRequestId::new();
        self.latest_match_request = Some(request_id);
        self.touch();
        Ok(request_id)
    }

    /// Stores a finished scoring result.
    ///
    /// Results for the latest request overwrite whatever is stored; results
    /// for superseded requests are dropped. Returns whether it was kept.
    pub fn record_match(&mut self, record: MatchRecord) -> bool {
        if self.latest_match_request != Some(record.request_id) {
            return false;
        }
        self.last_match = Some(record);
        self.touch();
        true
    }

    pub fn match_status(&self) -> MatchStatus {
        match (&self.latest_match_request, &self.last_match) {
            (None, None) => MatchStatus::NotRequested,
            (None, Some(record)) => MatchStatus::Ready(record.clone()),
            (Some(latest), Some(record)) if record.request_id == *latest => {
                MatchStatus::Ready(record.clone())
            }
            (Some(latest), _) => MatchStatus::Pending {
                request_id: *latest,
            },
        }
    }

    fn next_slot_step(&self) -> IntakeStep {
        match self.profile.first_missing(&self.required) {
            Some(slot) => IntakeStep::AskSlot { slot },
            None => IntakeStep::ReadyToScore,
        }
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }
}
