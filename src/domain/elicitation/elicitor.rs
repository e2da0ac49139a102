//! Turns forced-choice answers into a weight vector.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::dimension::{Dimension, WeightVector};
use super::question_bank::{OptionChoice, QuestionBank};

/// Chosen option per 1-based question index.
pub type WeightAnswers = BTreeMap<u8, OptionChoice>;

/// The two dimensions a user weighted highest, with display text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrioritySummary {
    pub top: [Dimension; 2],
    pub text: String,
}

/// Pure weight calculator over a question bank.
#[derive(Debug, Clone, Copy)]
pub struct PreferenceElicitor {
    bank: &'static QuestionBank,
}

impl Default for PreferenceElicitor {
    fn default() -> Self {
        Self::new(QuestionBank::standard())
    }
}

impl PreferenceElicitor {
    pub fn new(bank: &'static QuestionBank) -> Self {
        Self { bank }
    }

    pub fn bank(&self) -> &'static QuestionBank {
        self.bank
    }

    /// Applies every answered option's deltas to the baseline vector, then
    /// floors each dimension.
    ///
    /// Answers for indices the bank does not know are ignored.
    pub fn calculate_weights(&self, answers: &WeightAnswers) -> WeightVector {
        let mut weights = WeightVector::default();

        for (index, choice) in answers {
            let Some(scenario) = self.bank.scenario(*index) else {
                continue;
            };
            for (dimension, delta) in scenario.option(*choice).deltas {
                weights.add(*dimension, *delta);
            }
        }

        weights.floor_at(WeightVector::FLOOR);
        weights
    }

    /// Picks the two highest-weighted dimensions. Ties keep declaration order.
    pub fn generate_summary(weights: &WeightVector) -> PrioritySummary {
        let mut ranked: Vec<(Dimension, i32)> = weights.iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));

        let top = [ranked[0].0, ranked[1].0];
        let text = format!(
            "分析完成！你最重視的是「{}」與「{}」，接下來的推薦會優先考慮這兩點。",
            top[0].label(),
            top[1].label()
        );

        PrioritySummary { top, text }
    }
}
