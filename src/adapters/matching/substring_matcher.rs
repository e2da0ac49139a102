//! Deterministic feature matcher.

use async_trait::async_trait;
use std::collections::BTreeSet;

use crate::domain::foundation::UserId;
use crate::domain::matching::{Archetype, FeatureMatches};
use crate::ports::FeatureMatcher;

/// Case-insensitive containment in either direction.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubstringFeatureMatcher;

impl SubstringFeatureMatcher {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FeatureMatcher for SubstringFeatureMatcher {
    async fn match_features(
        &self,
        _user_id: &UserId,
        requested: &BTreeSet<String>,
        archetypes: &[Archetype],
    ) -> FeatureMatches {
        let requested: Vec<&str> = requested.iter().map(String::as_str).collect();
        FeatureMatches::by_substring(&requested, archetypes)
    }
}
