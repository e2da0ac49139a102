//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod intake;
pub mod matching;

pub use intake::{
    AnswerWeightQuestionCommand, AnswerWeightQuestionHandler, BeginIntakeCommand,
    BeginIntakeHandler, BeginIntakeResult, PauseIntakeCommand, PauseIntakeHandler,
    ResetIntakeCommand, ResetIntakeHandler, SubmitUtteranceCommand, SubmitUtteranceHandler,
    UtteranceReply,
};
pub use matching::{
    GetMatchResultHandler, GetMatchResultQuery, MatchTicket, StartMatchingCommand,
    StartMatchingHandler,
};
