//! Intake Command Handlers
//!
//! ## Commands
//! - `BeginIntake` - Start the quiz or resume slot filling
//! - `AnswerWeightQuestion` - Record one forced-choice answer
//! - `SubmitUtterance` - Extract slots from one chat message
//! - `PauseIntake` - Leave slot filling without losing the profile
//! - `ResetIntake` - Clear one dialog, or every stored session

mod answer_weight_question;
mod begin_intake;
mod pause_intake;
mod reset_intake;
mod submit_utterance;

pub use answer_weight_question::{AnswerWeightQuestionCommand, AnswerWeightQuestionHandler};
pub use begin_intake::{BeginIntakeCommand, BeginIntakeHandler, BeginIntakeResult};
pub use pause_intake::{PauseIntakeCommand, PauseIntakeHandler};
pub use reset_intake::{ResetIntakeCommand, ResetIntakeHandler};
pub use submit_utterance::{SubmitUtteranceCommand, SubmitUtteranceHandler, UtteranceReply};
