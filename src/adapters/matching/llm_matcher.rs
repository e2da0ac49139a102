//! Completion-backed feature matcher.
//!
//! One completion rates every archetype at once, so synonyms ("垃圾代收"
//! vs "garbage") still count. Archetypes the model leaves out are rated by
//! substring; a failed or unreadable completion falls back entirely.

use async_trait::async_trait;
use std::collections::BTreeSet;
use std::sync::Arc;

use crate::adapters::extraction::prompts::FEATURE_MATCH_INSTRUCTION;
use crate::domain::extraction::locate_json_object;
use crate::domain::foundation::UserId;
use crate::domain::matching::{substring_rate, Archetype, FeatureMatchSource, FeatureMatches};
use crate::ports::{AIProvider, CompletionRequest, FeatureMatcher, MessageRole, RequestMetadata};

pub struct LlmFeatureMatcher {
    provider: Arc<dyn AIProvider>,
    model: Option<String>,
}

impl LlmFeatureMatcher {
    pub fn new(provider: Arc<dyn AIProvider>) -> Self {
        Self {
            provider,
            model: None,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    fn build_request(
        &self,
        user_id: &UserId,
        requested: &BTreeSet<String>,
        archetypes: &[Archetype],
    ) -> CompletionRequest {
        let mut prompt = format!(
            "使用者需要：{}\n\n",
            requested.iter().cloned().collect::<Vec<_>>().join(", ")
        );
        for archetype in archetypes {
            let features: Vec<&str> = archetype.available_features().collect();
            prompt.push_str(&format!("{}: {}\n", archetype.id(), features.join(", ")));
        }

        let mut completion = CompletionRequest::new(RequestMetadata::for_user(user_id.clone()))
            .with_system_prompt(FEATURE_MATCH_INSTRUCTION)
            .with_message(MessageRole::User, prompt)
            .with_temperature(0.0)
            .with_max_tokens(200);
        if let Some(model) = &self.model {
            completion = completion.with_model(model.clone());
        }
        completion
    }
}

/// Reads `{ "<archetype id>": rate, ... }`. Returns `None` when the text has
/// no object or the object rates none of the given archetypes.
fn parse_rates(
    raw: &str,
    requested: &[&str],
    archetypes: &[Archetype],
) -> Option<FeatureMatches> {
    let object = locate_json_object(raw)?;
    let value: serde_json::Value = serde_json::from_str(object).ok()?;
    let map = value.as_object()?;

    let mut matches = FeatureMatches::new(FeatureMatchSource::Semantic);
    let mut rated = 0usize;
    for archetype in archetypes {
        let rate = map.get(archetype.id().as_str()).and_then(|v| match v {
            serde_json::Value::Number(n) => n.as_f64(),
            serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        });
        match rate {
            Some(rate) => {
                rated += 1;
                matches.insert(archetype.id().clone(), rate);
            }
            None => matches.insert(archetype.id().clone(), substring_rate(requested, archetype)),
        }
    }

    (rated > 0).then_some(matches)
}

#[async_trait]
impl FeatureMatcher for LlmFeatureMatcher {
    async fn match_features(
        &self,
        user_id: &UserId,
        requested: &BTreeSet<String>,
        archetypes: &[Archetype],
    ) -> FeatureMatches {
        let tokens: Vec<&str> = requested.iter().map(String::as_str).collect();
        if tokens.is_empty() || archetypes.is_empty() {
            return FeatureMatches::by_substring(&tokens, archetypes);
        }

        let request = self.build_request(user_id, requested, archetypes);
        match self.provider.complete(request).await {
            Ok(response) => match parse_rates(&response.content, &tokens, archetypes) {
                Some(matches) => matches,
                None => {
                    tracing::warn!(
                        user_id = %user_id,
                        raw = %response.content,
                        "unreadable feature match completion, using substring matching"
                    );
                    FeatureMatches::by_substring(&tokens, archetypes)
                }
            },
            Err(err) => {
                tracing::warn!(
                    user_id = %user_id,
                    error = %err,
                    "feature match completion failed, using substring matching"
                );
                FeatureMatches::by_substring(&tokens, archetypes)
            }
        }
    }
}
