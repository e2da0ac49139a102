//! Results written back by the asynchronous scoring pass.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ArchetypeId, MatchRequestId, Timestamp};

/// What a finished scoring pass produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatchOutcome {
    Matched {
        archetype_id: ArchetypeId,
        archetype_name: String,
        score: f64,
    },
    /// The catalog had no active archetypes.
    NoArchetypes,
    Failed {
        reason: String,
    },
}

/// The stored result of one scoring pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub request_id: MatchRequestId,
    pub outcome: MatchOutcome,
    pub completed_at: Timestamp,
}

impl MatchRecord {
    pub fn new(request_id: MatchRequestId, outcome: MatchOutcome) -> Self {
        Self {
            request_id,
            outcome,
            completed_at: Timestamp::now(),
        }
    }

    pub fn archetype_id(&self) -> Option<&ArchetypeId> {
        match &self.outcome {
            MatchOutcome::Matched { archetype_id, .. } => Some(archetype_id),
            _ => None,
        }
    }
}

/// Read-side view of a user's matching state.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchStatus {
    NotRequested,
    Pending { request_id: MatchRequestId },
    Ready(MatchRecord),
}
