//! Audit records for completion-backed extraction.

use serde::{Deserialize, Serialize};

use super::request::{ExtractionRequest, StrategyKind};
use crate::domain::foundation::{AuditEntryId, Timestamp, UserId};
use crate::domain::profile::ProfileUpdate;

/// What a logged completion call was for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditKind {
    /// Slot extraction attempt.
    Extraction,
    /// Redirect written after every strategy came back empty.
    Guidance,
}

/// One completion call and what came of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionLogEntry {
    pub id: AuditEntryId,
    pub user_id: UserId,
    /// Slot being asked about, or "general".
    pub topic: String,
    pub kind: AuditKind,
    pub strategy: StrategyKind,
    pub user_input: String,
    pub raw_output: Option<String>,
    pub extracted: serde_json::Value,
    pub success: bool,
    pub created_at: Timestamp,
}

impl ExtractionLogEntry {
    /// An extraction attempt that produced `update`.
    pub fn extraction_succeeded(
        request: &ExtractionRequest,
        strategy: StrategyKind,
        raw_output: impl Into<String>,
        update: &ProfileUpdate,
    ) -> Self {
        let extracted = serde_json::to_value(update).unwrap_or(serde_json::Value::Null);
        Self::build(request, AuditKind::Extraction, strategy, Some(raw_output.into()), extracted, true)
    }

    /// An extraction attempt that yielded nothing usable.
    pub fn extraction_failed(
        request: &ExtractionRequest,
        strategy: StrategyKind,
        raw_output: Option<String>,
    ) -> Self {
        Self::build(
            request,
            AuditKind::Extraction,
            strategy,
            raw_output,
            serde_json::Value::Object(Default::default()),
            false,
        )
    }

    /// A guidance call; `message` is `None` when it failed.
    pub fn guidance(request: &ExtractionRequest, message: Option<&str>) -> Self {
        Self::build(
            request,
            AuditKind::Guidance,
            StrategyKind::Semantic,
            message.map(str::to_string),
            serde_json::Value::Object(Default::default()),
            message.is_some(),
        )
    }

    fn build(
        request: &ExtractionRequest,
        kind: AuditKind,
        strategy: StrategyKind,
        raw_output: Option<String>,
        extracted: serde_json::Value,
        success: bool,
    ) -> Self {
        Self {
            id: AuditEntryId::new(),
            user_id: request.user_id.clone(),
            topic: request.topic().to_string(),
            kind,
            strategy,
            user_input: request.utterance.clone(),
            raw_output,
            extracted,
            success,
            created_at: Timestamp::now(),
        }
    }
}
