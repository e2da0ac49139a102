//! Composition root.
//!
//! Builds every handler from configuration. Callers that own their own
//! storage, catalog or completion backend pass them in through
//! [`IntakeDependencies`]; [`IntakeApp::from_config`] builds the defaults.
//! Either way, every completion call goes through a [`TimeoutAIProvider`].

use std::sync::Arc;
use thiserror::Error;

use crate::adapters::ai::{DisabledAIProvider, OllamaConfig, OllamaProvider, TimeoutAIProvider};
use crate::adapters::audit::InMemoryExtractionAuditLog;
use crate::adapters::catalog::YamlPersonaCatalog;
use crate::adapters::extraction::{
    ExtractionChain, GuidanceWriter, KeywordSlotExtractor, LlmSlotExtractor,
};
use crate::adapters::matching::{LlmFeatureMatcher, SubstringFeatureMatcher};
use crate::adapters::storage::{FileSessionStore, InMemorySessionStore};
use crate::application::handlers::{
    AnswerWeightQuestionHandler, BeginIntakeHandler, GetMatchResultHandler, PauseIntakeHandler,
    ResetIntakeHandler, StartMatchingHandler, SubmitUtteranceHandler,
};
use crate::config::{AiConfig, AiProvider, AppConfig, ValidationError};
use crate::domain::foundation::DomainError;
use crate::ports::{
    AIError, AIProvider, ExtractionAuditLog, FeatureMatcher, PersonaCatalog, SessionStore,
    SlotExtractionStrategy,
};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ValidationError),

    #[error("Completion provider setup failed: {0}")]
    Provider(#[from] AIError),

    #[error("Persona catalog unavailable: {0}")]
    Catalog(#[from] DomainError),
}

/// Collaborators the application does not build itself.
pub struct IntakeDependencies {
    pub store: Arc<dyn SessionStore>,
    pub catalog: Arc<dyn PersonaCatalog>,
    pub audit_log: Arc<dyn ExtractionAuditLog>,
    /// Raw completion backend; the timeout wrapper is added on top.
    pub provider: Arc<dyn AIProvider>,
}

/// Every user-facing operation, wired.
pub struct IntakeApp {
    pub begin: BeginIntakeHandler,
    pub answer_weight_question: AnswerWeightQuestionHandler,
    pub submit_utterance: SubmitUtteranceHandler,
    pub pause: PauseIntakeHandler,
    pub reset: ResetIntakeHandler,
    pub start_matching: StartMatchingHandler,
    pub match_result: GetMatchResultHandler,
}

impl IntakeApp {
    /// Wires handlers around injected collaborators.
    pub fn build(config: &AppConfig, deps: IntakeDependencies) -> Result<Self, AppError> {
        config.validate()?;

        let provider: Arc<dyn AIProvider> =
            Arc::new(TimeoutAIProvider::new(deps.provider, config.ai.timeout()));

        let strategies: Vec<Arc<dyn SlotExtractionStrategy>> = vec![
            Arc::new(
                LlmSlotExtractor::new(provider.clone(), deps.audit_log.clone())
                    .with_model(config.ai.extraction_model.clone())
                    .with_temperature(config.ai.temperature),
            ),
            Arc::new(KeywordSlotExtractor::new()),
        ];
        let guidance = GuidanceWriter::new(provider.clone(), deps.audit_log.clone())
            .with_model(config.ai.guidance_model.clone());
        let extractor = Arc::new(ExtractionChain::new(strategies, guidance));

        let matcher: Arc<dyn FeatureMatcher> =
            if config.matching.semantic_features && config.ai.is_enabled() {
                Arc::new(
                    LlmFeatureMatcher::new(provider)
                        .with_model(config.ai.extraction_model.clone()),
                )
            } else {
                Arc::new(SubstringFeatureMatcher::new())
            };

        let store = deps.store;
        Ok(Self {
            begin: BeginIntakeHandler::new(store.clone()),
            answer_weight_question: AnswerWeightQuestionHandler::new(store.clone()),
            submit_utterance: SubmitUtteranceHandler::new(store.clone(), extractor),
            pause: PauseIntakeHandler::new(store.clone()),
            reset: ResetIntakeHandler::new(store.clone()),
            start_matching: StartMatchingHandler::new(store.clone(), deps.catalog, matcher),
            match_result: GetMatchResultHandler::new(store),
        })
    }

    /// Builds the default collaborators from configuration, then wires.
    ///
    /// Sessions go to `storage.session_dir` when set and stay in memory
    /// otherwise. The catalog comes from `matching.catalog_path` or the
    /// bundled seed. The audit log is kept in memory, bounded by
    /// `storage.audit_capacity`.
    pub async fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        config.validate()?;

        let store: Arc<dyn SessionStore> = match &config.storage.session_dir {
            Some(dir) => Arc::new(FileSessionStore::new(dir)),
            None => Arc::new(InMemorySessionStore::new()),
        };
        let catalog: Arc<dyn PersonaCatalog> = match &config.matching.catalog_path {
            Some(path) => Arc::new(YamlPersonaCatalog::from_path(path).await?),
            None => Arc::new(YamlPersonaCatalog::seed()?),
        };

        tracing::info!(
            provider = ?config.ai.provider,
            model = %config.ai.extraction_model,
            timeout_secs = config.ai.timeout_secs,
            persistent_sessions = config.storage.session_dir.is_some(),
            "intake app configured"
        );

        Self::build(
            config,
            IntakeDependencies {
                store,
                catalog,
                audit_log: Arc::new(InMemoryExtractionAuditLog::with_capacity(
                    config.storage.audit_capacity,
                )),
                provider: build_provider(&config.ai)?,
            },
        )
    }
}

/// The configured completion backend, without the timeout wrapper.
pub fn build_provider(config: &AiConfig) -> Result<Arc<dyn AIProvider>, AppError> {
    match config.provider {
        AiProvider::Disabled => Ok(Arc::new(DisabledAIProvider)),
        AiProvider::Ollama => {
            let mut ollama = OllamaConfig::new(config.base_url.clone())
                .with_model(config.extraction_model.clone())
                .with_timeout(config.timeout())
                .with_max_retries(config.max_retries);
            if let Some(key) = &config.api_key {
                ollama = ollama.with_api_key(key.clone());
            }
            Ok(Arc::new(OllamaProvider::new(ollama)?))
        }
    }
}
