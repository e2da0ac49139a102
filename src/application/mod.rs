//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Following CQRS, it separates command handlers (write) from query handlers (read).

pub mod handlers;

pub use handlers::{
    // Intake handlers
    AnswerWeightQuestionCommand, AnswerWeightQuestionHandler, BeginIntakeCommand,
    BeginIntakeHandler, BeginIntakeResult, PauseIntakeCommand, PauseIntakeHandler,
    ResetIntakeCommand, ResetIntakeHandler, SubmitUtteranceCommand, SubmitUtteranceHandler,
    UtteranceReply,
    // Matching handlers
    GetMatchResultHandler, GetMatchResultQuery, MatchTicket, StartMatchingCommand,
    StartMatchingHandler,
};
