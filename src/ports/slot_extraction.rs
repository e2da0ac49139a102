//! Slot extraction ports.
//!
//! `SlotExtractor` is what the dialog calls once per utterance. The usual
//! implementation is a chain of `SlotExtractionStrategy`s tried in order;
//! the first one to return a non-empty update wins.

use async_trait::async_trait;

use crate::domain::extraction::{
    ExtractionError, ExtractionOutcome, ExtractionRequest, StrategyKind,
};
use crate::domain::profile::ProfileUpdate;

#[async_trait]
pub trait SlotExtractionStrategy: Send + Sync {
    fn kind(&self) -> StrategyKind;

    /// Attempts one extraction.
    ///
    /// # Errors
    ///
    /// - `Empty` when nothing was found
    /// - `MalformedCompletion` when a completion could not be read
    /// - `ServiceUnavailable` on transport failure or timeout
    async fn attempt(&self, request: &ExtractionRequest) -> Result<ProfileUpdate, ExtractionError>;
}

/// Turns one utterance into either a profile update or a redirect.
///
/// Infallible by contract: every failure downgrades to a redirect.
#[async_trait]
pub trait SlotExtractor: Send + Sync {
    async fn extract(&self, request: &ExtractionRequest) -> ExtractionOutcome;
}
