//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Completion Ports
//!
//! - `AIProvider` - Text completion (Ollama in production, mocks in tests)
//! - `SlotExtractor` - Utterance to profile update or redirect
//! - `SlotExtractionStrategy` - One way of turning an utterance into slots
//! - `FeatureMatcher` - Batched feature match rates for a scoring pass
//! - `ExtractionAuditLog` - Record of every completion-backed extraction
//!
//! ## Storage Ports
//!
//! - `SessionStore` - Per-user session state
//! - `PersonaCatalog` - Archetypes to score against

mod ai_provider;
mod extraction_audit_log;
mod feature_matcher;
mod persona_catalog;
mod session_store;
mod slot_extraction;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, Message,
    MessageRole, ProviderInfo, RequestMetadata,
};
pub use extraction_audit_log::ExtractionAuditLog;
pub use feature_matcher::FeatureMatcher;
pub use persona_catalog::PersonaCatalog;
pub use session_store::SessionStore;
pub use slot_extraction::{SlotExtractionStrategy, SlotExtractor};
