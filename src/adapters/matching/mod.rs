//! Feature matcher adapters.
//!
//! - **LlmFeatureMatcher** - One completion per scoring pass, substring fallback
//! - **SubstringFeatureMatcher** - Deterministic containment matching

mod llm_matcher;
mod substring_matcher;

pub use llm_matcher::LlmFeatureMatcher;
pub use substring_matcher::SubstringFeatureMatcher;
