//! Inputs and results of one extraction turn.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::UserId;
use crate::domain::profile::{ProfileUpdate, SlotName};

/// One utterance to extract from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionRequest {
    pub user_id: UserId,
    pub utterance: String,
    /// The slot currently being asked about.
    pub hint: Option<SlotName>,
}

impl ExtractionRequest {
    pub fn new(user_id: UserId, utterance: impl Into<String>, hint: Option<SlotName>) -> Self {
        Self {
            user_id,
            utterance: utterance.into(),
            hint,
        }
    }

    /// Audit topic: the hinted slot name, or "general".
    pub fn topic(&self) -> &'static str {
        self.hint.map(|slot| slot.as_str()).unwrap_or("general")
    }
}

/// Which strategy produced an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// Completion-backed semantic extraction.
    Semantic,
    /// Regex and keyword scan.
    Keyword,
}

impl StrategyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Semantic => "semantic",
            Self::Keyword => "keyword",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of running the whole chain for one utterance.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractionOutcome {
    /// A strategy found at least one slot value.
    Extracted {
        update: ProfileUpdate,
        strategy: StrategyKind,
    },
    /// Nothing was found; show this message instead.
    Redirect {
        message: String,
        /// False when the canned slot prompt was used.
        guided: bool,
    },
}

impl ExtractionOutcome {
    /// The update to merge; empty for redirects.
    pub fn update(&self) -> ProfileUpdate {
        match self {
            Self::Extracted { update, .. } => update.clone(),
            Self::Redirect { .. } => ProfileUpdate::default(),
        }
    }

    pub fn is_redirect(&self) -> bool {
        matches!(self, Self::Redirect { .. })
    }
}
