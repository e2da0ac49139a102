//! Scoring Engine - ranks archetypes against a completed profile.
//!
//! Six sub-scores are computed independently and combined by weighted sum:
//!
//! | Dimension | Range      | No preference |
//! |-----------|------------|---------------|
//! | budget    | 0..=100    | 50            |
//! | location  | 0..=100    | 50            |
//! | features  | 0..=100    | 50            |
//! | landlord  | -100..=100 | 50            |
//! | type      | 0..=100    | 50            |
//! | keyword   | 0..=20     | 0             |
//!
//! Landlord is the only sub-score that can go negative: a user who refuses a
//! resident landlord scored against an archetype built around one.

use serde::{Deserialize, Serialize};

use super::archetype::Archetype;
use super::feature_match::{substring_rate, FeatureMatches};
use super::weights::ScoringWeights;
use crate::domain::elicitation::{Dimension, WeightVector};
use crate::domain::foundation::ArchetypeId;
use crate::domain::profile::{Budget, LocationPref, ManagementPref, Profile, RoomType};

const NEUTRAL: f64 = 50.0;
const FULL: f64 = 100.0;

/// Currency units short of the minimum that cost one budget point.
const SHORTFALL_UNITS_PER_POINT: f64 = 20.0;
/// Currency units over the maximum that cost one budget point.
const OVERSHOOT_UNITS_PER_POINT: f64 = 50.0;
const OVERSHOOT_FLOOR: f64 = 20.0;
/// Upper rent bound that earns a no-limit budget the full score.
const NO_LIMIT_FULL_SCORE_RENT: f64 = 10_000.0;

const KEYWORD_POINTS: f64 = 5.0;
const KEYWORD_CAP: f64 = 20.0;

/// Sub-scores for one archetype.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub budget: f64,
    pub location: f64,
    pub features: f64,
    pub landlord: f64,
    pub room_type: f64,
    pub keyword: f64,
}

impl ScoreBreakdown {
    pub fn get(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::Budget => self.budget,
            Dimension::Location => self.location,
            Dimension::Features => self.features,
            Dimension::Landlord => self.landlord,
            Dimension::Type => self.room_type,
            Dimension::Keyword => self.keyword,
        }
    }

    /// Weighted sum over all dimensions.
    pub fn weighted_total(&self, weights: &ScoringWeights) -> f64 {
        Dimension::ALL
            .iter()
            .map(|d| self.get(*d) * weights.get(*d))
            .sum()
    }
}

/// One ranked entry of a match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedMatch {
    /// 1-based position.
    pub rank: usize,
    pub archetype: Archetype,
    /// Total rounded to two decimals.
    pub score: f64,
    pub breakdown: ScoreBreakdown,
}

/// Archetypes ordered by descending score.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub matches: Vec<RankedMatch>,
}

impl ScoreResult {
    pub fn best(&self) -> Option<&RankedMatch> {
        self.matches.first()
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn ids(&self) -> Vec<&ArchetypeId> {
        self.matches.iter().map(|m| m.archetype.id()).collect()
    }
}

/// Stateless scorer. Per-pass data comes in through [`FeatureMatches`].
pub struct ScoringEngine;

impl ScoringEngine {
    pub fn budget_score(budget: Option<Budget>, archetype: &Archetype) -> f64 {
        let Some(budget) = budget else {
            return NEUTRAL;
        };
        let (min, max) = archetype.rent_range();
        let (min, max) = (min as f64, max as f64);

        if budget.is_no_limit() {
            return (max / NO_LIMIT_FULL_SCORE_RENT * FULL).min(FULL);
        }

        let amount = budget.amount() as f64;
        if amount < min {
            (FULL - (min - amount) / SHORTFALL_UNITS_PER_POINT).max(0.0)
        } else if amount > max {
            (FULL - (amount - max) / OVERSHOOT_UNITS_PER_POINT).max(OVERSHOOT_FLOOR)
        } else {
            FULL
        }
    }

    pub fn location_score(preference: Option<LocationPref>, archetype: &Archetype) -> f64 {
        let Some(preference) = preference else {
            return NEUTRAL;
        };
        let preferred = archetype.preferred_locations();
        if preferred.contains(&preference) {
            FULL
        } else if preferred.iter().any(|p| p.is_adjacent_to(&preference)) {
            NEUTRAL
        } else {
            0.0
        }
    }

    pub fn features_score(profile: &Profile, archetype: &Archetype, matches: &FeatureMatches) -> f64 {
        let requested: Vec<&str> = profile.required_features().collect();
        if requested.is_empty() {
            return NEUTRAL;
        }
        let rate = matches
            .rate_for(archetype.id())
            .unwrap_or_else(|| substring_rate(&requested, archetype));
        rate * FULL
    }

    pub fn landlord_score(preference: Option<ManagementPref>, archetype: &Archetype) -> f64 {
        match (preference, archetype.management_pref()) {
            (None, _) | (Some(ManagementPref::Indifferent), _) => NEUTRAL,
            (Some(ManagementPref::NoOwner), ManagementPref::Owner) => -FULL,
            (Some(user), wanted) if user == wanted => FULL,
            _ => 0.0,
        }
    }

    pub fn type_score(preference: Option<RoomType>, archetype: &Archetype) -> f64 {
        match preference {
            None => NEUTRAL,
            Some(room) if room == archetype.room_type() => FULL,
            Some(_) => 0.0,
        }
    }

    /// Five points per archetype keyword found in the text, capped at 20.
    pub fn keyword_score(raw_text: &str, archetype: &Archetype) -> f64 {
        let text = raw_text.to_lowercase();
        let hits = archetype
            .keywords()
            .iter()
            .filter(|k| text.contains(&k.to_lowercase()))
            .count();
        (hits as f64 * KEYWORD_POINTS).min(KEYWORD_CAP)
    }

    pub fn breakdown(
        profile: &Profile,
        archetype: &Archetype,
        raw_text: &str,
        matches: &FeatureMatches,
    ) -> ScoreBreakdown {
        ScoreBreakdown {
            budget: Self::budget_score(profile.budget(), archetype),
            location: Self::location_score(profile.location_pref(), archetype),
            features: Self::features_score(profile, archetype, matches),
            landlord: Self::landlord_score(profile.management_pref(), archetype),
            room_type: Self::type_score(profile.type_pref(), archetype),
            keyword: Self::keyword_score(raw_text, archetype),
        }
    }

    /// Weighted total for one archetype.
    pub fn score(
        profile: &Profile,
        archetype: &Archetype,
        weights: &ScoringWeights,
        raw_text: &str,
        matches: &FeatureMatches,
    ) -> f64 {
        Self::breakdown(profile, archetype, raw_text, matches).weighted_total(weights)
    }

    /// Scores every archetype and orders them by descending total.
    ///
    /// Equal totals keep the input order. Ranks are positions starting at 1.
    pub fn match_archetypes(
        profile: &Profile,
        archetypes: &[Archetype],
        elicited: Option<&WeightVector>,
        raw_text: &str,
        matches: &FeatureMatches,
    ) -> ScoreResult {
        let weights = ScoringWeights::resolve(elicited);

        let mut scored: Vec<(Archetype, f64, ScoreBreakdown)> = archetypes
            .iter()
            .map(|archetype| {
                let breakdown = Self::breakdown(profile, archetype, raw_text, matches);
                let total = round2(breakdown.weighted_total(&weights));
                (archetype.clone(), total, breakdown)
            })
            .collect();

        // `sort_by` is stable.
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));

        ScoreResult {
            matches: scored
                .into_iter()
                .enumerate()
                .map(|(i, (archetype, score, breakdown))| RankedMatch {
                    rank: i + 1,
                    archetype,
                    score,
                    breakdown,
                })
                .collect(),
        }
    }

    /// Head of [`ScoringEngine::match_archetypes`].
    pub fn best_match(
        profile: &Profile,
        archetypes: &[Archetype],
        elicited: Option<&WeightVector>,
        raw_text: &str,
        matches: &FeatureMatches,
    ) -> Option<RankedMatch> {
        Self::match_archetypes(profile, archetypes, elicited, raw_text, matches)
            .matches
            .into_iter()
            .next()
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
