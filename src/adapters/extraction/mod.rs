//! Slot extraction adapters.
//!
//! - `LlmSlotExtractor` - Completion-backed semantic extraction
//! - `KeywordSlotExtractor` - Deterministic regex and keyword scan
//! - `GuidanceWriter` - Redirect for utterances neither could use
//! - `ExtractionChain` - Runs strategies in order, then guidance

mod chain;
mod guidance;
mod keyword_extractor;
mod llm_extractor;
pub(crate) mod prompts;

pub use chain::ExtractionChain;
pub use guidance::GuidanceWriter;
pub use keyword_extractor::KeywordSlotExtractor;
pub use llm_extractor::LlmSlotExtractor;
