//! Ordered extraction strategies with a guidance fallback.
//!
//! Strategies run in order and the first non-empty update wins. When every
//! strategy comes back empty the guidance writer produces a redirect. No
//! error leaves the chain: the dialog always gets either an update or a
//! message to show.

use async_trait::async_trait;
use std::sync::Arc;

use super::guidance::GuidanceWriter;
use crate::domain::extraction::{ExtractionError, ExtractionOutcome, ExtractionRequest};
use crate::ports::{SlotExtractionStrategy, SlotExtractor};

pub struct ExtractionChain {
    strategies: Vec<Arc<dyn SlotExtractionStrategy>>,
    guidance: GuidanceWriter,
}

impl ExtractionChain {
    pub fn new(strategies: Vec<Arc<dyn SlotExtractionStrategy>>, guidance: GuidanceWriter) -> Self {
        Self {
            strategies,
            guidance,
        }
    }

    pub fn strategy_count(&self) -> usize {
        self.strategies.len()
    }

    pub async fn run(&self, request: &ExtractionRequest) -> ExtractionOutcome {
        for strategy in &self.strategies {
            match strategy.attempt(request).await {
                Ok(update) if !update.is_empty() => {
                    tracing::info!(
                        user_id = %request.user_id,
                        topic = request.topic(),
                        strategy = %strategy.kind(),
                        slots = ?update.slots(),
                        "slots extracted"
                    );
                    return ExtractionOutcome::Extracted {
                        update,
                        strategy: strategy.kind(),
                    };
                }
                Ok(_) | Err(ExtractionError::Empty) => {
                    tracing::debug!(strategy = %strategy.kind(), "strategy found nothing");
                }
                Err(err) => {
                    tracing::debug!(strategy = %strategy.kind(), error = %err, "strategy failed, falling back");
                }
            }
        }

        let (message, guided) = self.guidance.redirect(request).await;
        ExtractionOutcome::Redirect { message, guided }
    }
}

#[async_trait]
impl SlotExtractor for ExtractionChain {
    async fn extract(&self, request: &ExtractionRequest) -> ExtractionOutcome {
        self.run(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockAIProvider;
    use crate::adapters::audit::InMemoryExtractionAuditLog;
    use crate::adapters::extraction::{KeywordSlotExtractor, LlmSlotExtractor};
    use crate::domain::extraction::{AuditKind, StrategyKind};
    use crate::domain::foundation::UserId;
    use crate::domain::profile::{Budget, ManagementPref, SlotName};
    use crate::ports::AIError;

    struct Fixture {
        chain: ExtractionChain,
        audit: Arc<InMemoryExtractionAuditLog>,
        mock: MockAIProvider,
    }

    fn fixture(mock: MockAIProvider) -> Fixture {
        let audit = Arc::new(InMemoryExtractionAuditLog::new());
        let provider = Arc::new(mock.clone());
        let chain = ExtractionChain::new(
            vec![
                Arc::new(LlmSlotExtractor::new(provider.clone(), audit.clone())),
                Arc::new(KeywordSlotExtractor::new()),
            ],
            GuidanceWriter::new(provider, audit.clone()),
        );
        Fixture { chain, audit, mock }
    }

    fn request(text: &str, hint: Option<SlotName>) -> ExtractionRequest {
        ExtractionRequest::new(UserId::new("U1").unwrap(), text, hint)
    }

    #[tokio::test]
    async fn semantic_result_wins() {
        let f = fixture(MockAIProvider::new().with_response(r#"{"budget": 7000}"#));

        let outcome = f.chain.run(&request("七千", Some(SlotName::Budget))).await;

        assert_eq!(
            outcome,
            ExtractionOutcome::Extracted {
                update: crate::domain::profile::ProfileUpdate::new().with_budget(Budget::new(7000)),
                strategy: StrategyKind::Semantic,
            }
        );
        assert_eq!(f.mock.call_count(), 1);
    }

    #[tokio::test]
    async fn generic_consent_resolves_through_keyword_fallback() {
        let f = fixture(MockAIProvider::new().with_response("{}"));

        let outcome = f.chain.run(&request("都可以", Some(SlotName::ManagementPref))).await;

        match outcome {
            ExtractionOutcome::Extracted { update, strategy } => {
                assert_eq!(strategy, StrategyKind::Keyword);
                assert_eq!(update.management_pref, Some(ManagementPref::Indifferent));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn unavailable_service_falls_back_deterministically() {
        let f = fixture(MockAIProvider::failing(AIError::unavailable("down")));

        let outcome = f.chain.run(&request("預算 4500", Some(SlotName::Budget))).await;

        assert_eq!(outcome.update().budget, Some(Budget::new(4500)));
    }

    #[tokio::test]
    async fn malformed_completion_is_audited_then_falls_back() {
        let f = fixture(MockAIProvider::new().with_response("sure! budget is 5000"));

        let outcome = f.chain.run(&request("5000", Some(SlotName::Budget))).await;

        assert_eq!(outcome.update().budget, Some(Budget::new(5000)));
        let entries = f.audit.entries().await;
        assert_eq!(entries.len(), 1);
        assert!(!entries[0].success);
        assert_eq!(entries[0].raw_output.as_deref(), Some("sure! budget is 5000"));
    }

    #[tokio::test]
    async fn all_empty_runs_guidance() {
        let f = fixture(
            MockAIProvider::new()
                .with_response("{}")
                .with_response("哈哈，先告訴我你的預算吧！"),
        );

        let outcome = f.chain.run(&request("我喜歡貓", Some(SlotName::Budget))).await;

        assert_eq!(
            outcome,
            ExtractionOutcome::Redirect {
                message: "哈哈，先告訴我你的預算吧！".into(),
                guided: true,
            }
        );
        let kinds: Vec<_> = f.audit.entries().await.iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![AuditKind::Extraction, AuditKind::Guidance]);
    }

    #[tokio::test]
    async fn everything_down_returns_canned_prompt() {
        let f = fixture(MockAIProvider::failing(AIError::timeout(8)));

        let outcome = f.chain.run(&request("我喜歡貓", Some(SlotName::TypePref))).await;

        match outcome {
            ExtractionOutcome::Redirect { message, guided } => {
                assert!(!guided);
                assert!(message.contains("套房"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
