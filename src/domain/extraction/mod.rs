//! Extraction module - turning one utterance into a `ProfileUpdate`.
//!
//! Strategies themselves live behind the `SlotExtractionStrategy` port; this
//! module holds the request/outcome vocabulary, completion parsing and the
//! audit record shape shared by every strategy.

mod audit;
mod completion;
mod errors;
mod json;
mod request;

pub use audit::{AuditKind, ExtractionLogEntry};
pub use completion::parse_profile_completion;
pub use errors::ExtractionError;
pub use json::locate_json_object;
pub use request::{ExtractionOutcome, ExtractionRequest, StrategyKind};
