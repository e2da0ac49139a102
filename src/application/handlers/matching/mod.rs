//! Matching Command and Query Handlers
//!
//! ## Commands
//! - `StartMatching` - Reply with a ticket, score on a background task
//!
//! ## Queries
//! - `GetMatchResult` - Not requested, pending, or the stored record

mod get_match_result;
mod start_matching;

pub use get_match_result::{GetMatchResultHandler, GetMatchResultQuery};
pub use start_matching::{MatchTicket, StartMatchingCommand, StartMatchingHandler};
