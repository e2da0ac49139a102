//! Elicitation module - the six-question forced-choice preference quiz.
//!
//! The question bank is static data. The elicitor is a pure function from
//! answers to a `WeightVector`; no state lives here.

mod dimension;
mod elicitor;
mod question_bank;

pub use dimension::{Dimension, WeightVector};
pub use elicitor::{PreferenceElicitor, PrioritySummary, WeightAnswers};
pub use question_bank::{OptionChoice, QuestionBank, ScenarioOption, WeightScenario};
