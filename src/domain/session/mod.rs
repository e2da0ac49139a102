//! Session module - the per-user dialog state machine.
//!
//! A `ConversationSession` moves between idle, the weight quiz and slot
//! filling. It also remembers the latest scoring request so results from
//! the background worker can be written back idempotently.

mod aggregate;
mod match_record;
mod phase;

pub use aggregate::{ConversationSession, IntakeStep, ResetScope};
pub use match_record::{MatchOutcome, MatchRecord, MatchStatus};
pub use phase::SessionPhase;
