//! StartMatchingHandler - Kick off an asynchronous scoring pass.
//!
//! The handler stamps a fresh request id on the session, persists it and
//! returns at once. A spawned worker loads the catalog, runs one batched
//! feature match, scores every archetype and writes the best match back.
//! Results for a superseded request are dropped at write-back.

use std::collections::BTreeSet;
use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::domain::elicitation::WeightVector;
use crate::domain::foundation::{DomainError, MatchRequestId, UserId};
use crate::domain::matching::ScoringEngine;
use crate::domain::profile::Profile;
use crate::domain::session::{ConversationSession, MatchOutcome, MatchRecord};
use crate::ports::{FeatureMatcher, PersonaCatalog, SessionStore};

/// Command to score a finished intake against the catalog.
#[derive(Debug, Clone)]
pub struct StartMatchingCommand {
    /// Owner of the profile; the session must be idle and complete.
    pub user_id: UserId,
}

/// Acknowledgement returned before scoring finishes.
#[derive(Debug)]
pub struct MatchTicket {
    pub request_id: MatchRequestId,
    /// Resolves to what the worker computed, whether or not it was kept.
    pub handle: JoinHandle<MatchOutcome>,
}

/// Spawns the matching worker and returns without waiting for it.
///
/// The worker writes its [`MatchRecord`] back only if the session still
/// carries the same request id, so a newer request supersedes it.
pub struct StartMatchingHandler {
    store: Arc<dyn SessionStore>,
    catalog: Arc<dyn PersonaCatalog>,
    matcher: Arc<dyn FeatureMatcher>,
}

impl StartMatchingHandler {
    pub fn new(
        store: Arc<dyn SessionStore>,
        catalog: Arc<dyn PersonaCatalog>,
        matcher: Arc<dyn FeatureMatcher>,
    ) -> Self {
        Self {
            store,
            catalog,
            matcher,
        }
    }

    pub async fn handle(&self, cmd: StartMatchingCommand) -> Result<MatchTicket, DomainError> {
        // 1. Load; a user with nothing stored has an empty profile
        let mut session = self
            .store
            .load(&cmd.user_id)
            .await?
            .unwrap_or_else(|| ConversationSession::new(cmd.user_id.clone()));

        // 2. Stamp the request and persist before replying
        let request_id = session.request_match()?;
        self.store.save(&session).await?;

        tracing::info!(user_id = %cmd.user_id, request_id = %request_id, "matching requested");

        // 3. Score off the dialog turn
        let pass = ScoringPass {
            store: self.store.clone(),
            catalog: self.catalog.clone(),
            matcher: self.matcher.clone(),
            user_id: cmd.user_id,
            request_id,
            profile: session.profile().clone(),
            weights: session.weights().copied(),
            raw_text: session.raw_text(),
        };
        let handle = tokio::spawn(pass.run());

        Ok(MatchTicket { request_id, handle })
    }
}

/// Everything the worker needs, captured when the request was made.
struct ScoringPass {
    store: Arc<dyn SessionStore>,
    catalog: Arc<dyn PersonaCatalog>,
    matcher: Arc<dyn FeatureMatcher>,
    user_id: UserId,
    request_id: MatchRequestId,
    profile: Profile,
    weights: Option<WeightVector>,
    raw_text: String,
}

impl ScoringPass {
    async fn run(self) -> MatchOutcome {
        let outcome = self.score().await;
        if let Err(err) = self.write_back(outcome.clone()).await {
            tracing::error!(
                user_id = %self.user_id,
                request_id = %self.request_id,
                error = %err,
                "failed to store match result"
            );
        }
        outcome
    }

    async fn score(&self) -> MatchOutcome {
        let archetypes = match self.catalog.list_active().await {
            Ok(archetypes) => archetypes,
            Err(err) => {
                tracing::warn!(user_id = %self.user_id, error = %err, "catalog unavailable");
                return MatchOutcome::Failed {
                    reason: err.message,
                };
            }
        };
        if archetypes.is_empty() {
            return MatchOutcome::NoArchetypes;
        }

        let requested: BTreeSet<String> =
            self.profile.required_features().map(str::to_string).collect();
        let features = self
            .matcher
            .match_features(&self.user_id, &requested, &archetypes)
            .await;

        let result = ScoringEngine::match_archetypes(
            &self.profile,
            &archetypes,
            self.weights.as_ref(),
            &self.raw_text,
            &features,
        );

        match result.best() {
            Some(best) => {
                tracing::info!(
                    user_id = %self.user_id,
                    request_id = %self.request_id,
                    archetype = %best.archetype.id(),
                    score = best.score,
                    feature_source = ?features.source(),
                    "scoring complete"
                );
                MatchOutcome::Matched {
                    archetype_id: best.archetype.id().clone(),
                    archetype_name: best.archetype.name().to_string(),
                    score: best.score,
                }
            }
            None => MatchOutcome::NoArchetypes,
        }
    }

    async fn write_back(&self, outcome: MatchOutcome) -> Result<(), DomainError> {
        let Some(mut session) = self.store.load(&self.user_id).await? else {
            tracing::warn!(user_id = %self.user_id, "session gone before match result arrived");
            return Ok(());
        };

        if session.record_match(MatchRecord::new(self.request_id, outcome)) {
            self.store.save(&session).await?;
        } else {
            tracing::debug!(
                user_id = %self.user_id,
                request_id = %self.request_id,
                "stale match result dropped"
            );
        }
        Ok(())
    }
}
