//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, state machine)
//! - `profile` - Slots, their typed values and profile merging
//! - `elicitation` - Forced-choice quiz and preference weights
//! - `extraction` - Extraction requests, outcomes, completion parsing and audit records
//! - `matching` - Persona archetypes and the scoring engine
//! - `session` - Per-user dialog state machine

pub mod elicitation;
pub mod extraction;
pub mod foundation;
pub mod matching;
pub mod profile;
pub mod session;
