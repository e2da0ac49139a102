//! Multipliers applied to sub-scores.

use serde::{Deserialize, Serialize};

use crate::domain::elicitation::{Dimension, WeightVector};

/// Per-dimension multiplier used by the weighted sum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights([f64; 6]);

impl ScoringWeights {
    /// Elicited weights are divided by this to land near the default range.
    pub const ELICITED_SCALE: f64 = 50.0;

    /// Converts an elicited vector into multipliers.
    pub fn from_elicited(weights: &WeightVector) -> Self {
        let mut values = [0.0; 6];
        for (i, dimension) in Dimension::ALL.iter().enumerate() {
            values[i] = weights.get(*dimension) as f64 / Self::ELICITED_SCALE;
        }
        Self(values)
    }

    /// Elicited multipliers when present, otherwise the defaults.
    pub fn resolve(elicited: Option<&WeightVector>) -> Self {
        elicited.map(Self::from_elicited).unwrap_or_default()
    }

    pub fn get(&self, dimension: Dimension) -> f64 {
        let index = Dimension::ALL
            .iter()
            .position(|d| *d == dimension)
            .unwrap_or_default();
        self.0[index]
    }

    pub fn with(mut self, dimension: Dimension, value: f64) -> Self {
        if let Some(index) = Dimension::ALL.iter().position(|d| *d == dimension) {
            self.0[index] = value;
        }
        self
    }
}

impl Default for ScoringWeights {
    /// Budget 1.5, location 1.2, features 1.0, landlord 1.0, type 0.8, keyword 0.5.
    fn default() -> Self {
        Self([1.5, 1.2, 1.0, 1.0, 0.8, 0.5])
    }
}
