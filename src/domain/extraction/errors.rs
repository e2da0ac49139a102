//! Extraction failures. None of these leave the extraction chain.

use thiserror::Error;

use crate::ports::AIError;

#[derive(Debug, Clone, Error)]
pub enum ExtractionError {
    /// The strategy ran but found no slot value.
    #[error("no slot value found in utterance")]
    Empty,

    /// The completion could not be read as a slot object.
    #[error("completion is not a slot object: {reason}")]
    MalformedCompletion { raw: String, reason: String },

    /// The completion service failed or timed out.
    #[error("completion service unavailable: {0}")]
    ServiceUnavailable(#[from] AIError),
}

impl ExtractionError {
    pub fn malformed(raw: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedCompletion {
            raw: raw.into(),
            reason: reason.into(),
        }
    }

    /// Raw completion text, when one was received.
    pub fn raw_output(&self) -> Option<&str> {
        match self {
            Self::MalformedCompletion { raw, .. } => Some(raw),
            _ => None,
        }
    }
}
