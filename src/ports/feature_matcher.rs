//! Feature matching port.
//!
//! One call per scoring pass covers every archetype. The result is passed
//! into the scoring engine explicitly.

use async_trait::async_trait;
use std::collections::BTreeSet;

use crate::domain::foundation::UserId;
use crate::domain::matching::{Archetype, FeatureMatches};

#[async_trait]
pub trait FeatureMatcher: Send + Sync {
    /// Match rate in 0..=1 between `requested` and each archetype's
    /// required plus bonus features.
    ///
    /// Never fails; implementations degrade to substring matching.
    async fn match_features(
        &self,
        user_id: &UserId,
        requested: &BTreeSet<String>,
        archetypes: &[Archetype],
    ) -> FeatureMatches;
}
