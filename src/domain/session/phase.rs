//! Session phase state machine.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// Where a user's dialog currently is.
///
/// - `Idle`: no active dialog
/// - `WeightElicitation`: mid forced-choice quiz
/// - `SlotFilling`: mid profile collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    #[default]
    Idle,
    WeightElicitation,
    SlotFilling,
}

impl SessionPhase {
    /// Returns true if free-text utterances are consumed in this phase.
    pub fn accepts_utterances(&self) -> bool {
        matches!(self, Self::SlotFilling)
    }

    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Idle)
    }
}

impl StateMachine for SessionPhase {
    fn can_transition_to(&self, target: &Self) -> bool {
        use SessionPhase::*;
        matches!(
            (self, target),
            // Fresh start or resume
            (Idle, WeightElicitation) |
            (Idle, SlotFilling) |
            // Quiz finished
            (WeightElicitation, SlotFilling) |
            // Reset during the quiz
            (WeightElicitation, Idle) |
            // Profile complete, pause or reset
            (SlotFilling, Idle)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use SessionPhase::*;
        match self {
            Idle => vec![WeightElicitation, SlotFilling],
            WeightElicitation => vec![SlotFilling, Idle],
            SlotFilling => vec![Idle],
        }
    }
}
