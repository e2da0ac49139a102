//! Per-pass feature match context.
//!
//! One scoring pass computes the match rate of the user's requested features
//! against every archetype up front and hands the result to the engine, so
//! nothing is cached on the engine itself.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::archetype::Archetype;
use crate::domain::foundation::ArchetypeId;

/// How a set of feature rates was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureMatchSource {
    Semantic,
    Substring,
}

/// Match rate in `[0, 1]` per archetype.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureMatches {
    source: FeatureMatchSource,
    rates: HashMap<ArchetypeId, f64>,
}

impl FeatureMatches {
    pub fn new(source: FeatureMatchSource) -> Self {
        Self {
            source,
            rates: HashMap::new(),
        }
    }

    /// Records a rate, clamped into `[0, 1]`.
    pub fn insert(&mut self, id: ArchetypeId, rate: f64) {
        let rate = if rate.is_finite() { rate.clamp(0.0, 1.0) } else { 0.0 };
        self.rates.insert(id, rate);
    }

    pub fn rate_for(&self, id: &ArchetypeId) -> Option<f64> {
        self.rates.get(id).copied()
    }

    pub fn source(&self) -> FeatureMatchSource {
        self.source
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Deterministic matching over every archetype.
    pub fn by_substring<S: AsRef<str>>(requested: &[S], archetypes: &[Archetype]) -> Self {
        let mut matches = Self::new(FeatureMatchSource::Substring);
        for archetype in archetypes {
            matches.insert(archetype.id().clone(), substring_rate(requested, archetype));
        }
        matches
    }
}

/// Share of requested tokens contained in (or containing) one of the
/// archetype's feature tokens, case-insensitively.
pub fn substring_rate<S: AsRef<str>>(requested: &[S], archetype: &Archetype) -> f64 {
    if requested.is_empty() {
        return 0.0;
    }

    let available: Vec<String> = archetype
        .available_features()
        .map(str::to_lowercase)
        .collect();

    let hits = requested
        .iter()
        .map(|r| r.as_ref().trim().to_lowercase())
        .filter(|r| !r.is_empty())
        .filter(|r| {
            available
                .iter()
                .any(|a| a.contains(r.as_str()) || r.contains(a.as_str()))
        })
        .count();

    hits as f64 / requested.len() as f64
}
