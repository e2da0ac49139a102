//! Completion-backed slot extractor.
//!
//! One completion per attempt. Every attempt, successful or not, is written
//! to the extraction audit log.

use async_trait::async_trait;
use std::sync::Arc;

use super::prompts::extraction_prompt;
use crate::domain::extraction::{
    parse_profile_completion, ExtractionError, ExtractionLogEntry, ExtractionRequest,
    StrategyKind,
};
use crate::domain::profile::ProfileUpdate;
use crate::ports::{
    AIProvider, CompletionRequest, ExtractionAuditLog, MessageRole, RequestMetadata,
    SlotExtractionStrategy,
};

/// Semantic extraction through the completion port.
pub struct LlmSlotExtractor {
    provider: Arc<dyn AIProvider>,
    audit_log: Arc<dyn ExtractionAuditLog>,
    model: Option<String>,
    temperature: f32,
}

impl LlmSlotExtractor {
    pub fn new(provider: Arc<dyn AIProvider>, audit_log: Arc<dyn ExtractionAuditLog>) -> Self {
        Self {
            provider,
            audit_log,
            model: None,
            temperature: 0.0,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    fn build_request(&self, request: &ExtractionRequest) -> CompletionRequest {
        let mut completion = CompletionRequest::new(RequestMetadata::for_user(request.user_id.clone()))
            .with_system_prompt(extraction_prompt(request.hint))
            .with_message(MessageRole::User, request.utterance.clone())
            .with_temperature(self.temperature)
            .with_max_tokens(256);
        if let Some(model) = &self.model {
            completion = completion.with_model(model.clone());
        }
        completion
    }

    async fn record(&self, entry: ExtractionLogEntry) {
        if let Err(err) = self.audit_log.record(entry).await {
            tracing::warn!(error = %err, "failed to write extraction audit entry");
        }
    }
}

#[async_trait]
impl SlotExtractionStrategy for LlmSlotExtractor {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Semantic
    }

    async fn attempt(&self, request: &ExtractionRequest) -> Result<ProfileUpdate, ExtractionError> {
        let response = match self.provider.complete(self.build_request(request)).await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(
                    user_id = %request.user_id,
                    topic = request.topic(),
                    error = %err,
                    "semantic extraction unavailable"
                );
                self.record(ExtractionLogEntry::extraction_failed(
                    request,
                    StrategyKind::Semantic,
                    None,
                ))
                .await;
                return Err(ExtractionError::ServiceUnavailable(err));
            }
        };

        match parse_profile_completion(&response.content) {
            Ok(update) if !update.is_empty() => {
                tracing::debug!(
                    user_id = %request.user_id,
                    topic = request.topic(),
                    slots = ?update.slots(),
                    "semantic extraction succeeded"
                );
                self.record(ExtractionLogEntry::extraction_succeeded(
                    request,
                    StrategyKind::Semantic,
                    response.content,
                    &update,
                ))
                .await;
                Ok(update)
            }
            Ok(_) => {
                self.record(ExtractionLogEntry::extraction_failed(
                    request,
                    StrategyKind::Semantic,
                    Some(response.content),
                ))
                .await;
                Err(ExtractionError::Empty)
            }
            Err(err) => {
                tracing::warn!(
                    user_id = %request.user_id,
                    topic = request.topic(),
                    raw = %response.content,
                    "malformed extraction completion"
                );
                self.record(ExtractionLogEntry::extraction_failed(
                    request,
                    StrategyKind::Semantic,
                    Some(response.content),
                ))
                .await;
                Err(err)
            }
        }
    }
}
