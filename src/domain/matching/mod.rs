//! Matching module - persona archetypes and the scoring engine.

mod archetype;
mod engine;
mod feature_match;
mod weights;

pub use archetype::{Archetype, ArchetypeConfig};
pub use engine::{RankedMatch, ScoreBreakdown, ScoreResult, ScoringEngine};
pub use feature_match::{substring_rate, FeatureMatchSource, FeatureMatches};
pub use weights::ScoringWeights;
