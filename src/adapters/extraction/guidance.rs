//! Redirect writer for utterances no strategy could use.

use std::sync::Arc;

use super::prompts::{guidance_prompt, slot_topic};
use crate::domain::elicitation::QuestionBank;
use crate::domain::extraction::{ExtractionLogEntry, ExtractionRequest};
use crate::ports::{
    AIProvider, CompletionRequest, ExtractionAuditLog, MessageRole, RequestMetadata,
};

/// Longest redirect accepted from the model, in characters.
const MAX_REDIRECT_CHARS: usize = 120;

const GENERAL_PROMPT: &str = "可以再多說一點你的租屋需求嗎？";

/// Writes a one-sentence, context-aware redirect.
pub struct GuidanceWriter {
    provider: Arc<dyn AIProvider>,
    audit_log: Arc<dyn ExtractionAuditLog>,
    bank: &'static QuestionBank,
    model: Option<String>,
}

impl GuidanceWriter {
    pub fn new(provider: Arc<dyn AIProvider>, audit_log: Arc<dyn ExtractionAuditLog>) -> Self {
        Self {
            provider,
            audit_log,
            bank: QuestionBank::standard(),
            model: None,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Returns the redirect and whether it came from the model.
    ///
    /// Falls back to the canned slot prompt when the call fails or returns
    /// nothing usable.
    pub async fn redirect(&self, request: &ExtractionRequest) -> (String, bool) {
        let mut completion = CompletionRequest::new(RequestMetadata::for_user(request.user_id.clone()))
            .with_system_prompt(guidance_prompt(request.hint))
            .with_message(MessageRole::User, request.utterance.clone())
            .with_temperature(0.7)
            .with_max_tokens(80);
        if let Some(model) = &self.model {
            completion = completion.with_model(model.clone());
        }

        let written = match self.provider.complete(completion).await {
            Ok(response) => clean_sentence(&response.content),
            Err(err) => {
                tracing::warn!(
                    user_id = %request.user_id,
                    topic = slot_topic(request.hint),
                    error = %err,
                    "guidance completion failed"
                );
                None
            }
        };

        let entry = ExtractionLogEntry::guidance(request, written.as_deref());
        if let Err(err) = self.audit_log.record(entry).await {
            tracing::warn!(error = %err, "failed to write guidance audit entry");
        }

        match written {
            Some(message) => {
                tracing::info!(
                    user_id = %request.user_id,
                    topic = request.topic(),
                    outcome = "guidance",
                    "redirecting off-topic answer"
                );
                (message, true)
            }
            None => (self.canned(request), false),
        }
    }

    fn canned(&self, request: &ExtractionRequest) -> String {
        request
            .hint
            .map(|slot| self.bank.slot_prompt(slot))
            .unwrap_or(GENERAL_PROMPT)
            .to_string()
    }
}

fn clean_sentence(raw: &str) -> Option<String> {
    let line = raw
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())?
        .trim_matches(|c: char| c == '"' || c == '「' || c == '」');
    if line.is_empty() || line.chars().count() > MAX_REDIRECT_CHARS {
        return None;
    }
    Some(line.to_string())
}
