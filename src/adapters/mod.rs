//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - Completion providers (Ollama, timeout decorator, mock)
//! - `audit` - Extraction audit log
//! - `catalog` - Persona catalogs (YAML file, in-memory)
//! - `extraction` - Slot extraction strategies and the extraction chain
//! - `matching` - Feature matchers used by the scoring pass
//! - `storage` - Session stores (file, in-memory)

pub mod ai;
pub mod audit;
pub mod catalog;
pub mod extraction;
pub mod matching;
pub mod storage;

pub use ai::{DisabledAIProvider, MockAIProvider, OllamaConfig, OllamaProvider, TimeoutAIProvider};
pub use audit::InMemoryExtractionAuditLog;
pub use catalog::{InMemoryPersonaCatalog, YamlPersonaCatalog};
pub use extraction::{ExtractionChain, GuidanceWriter, KeywordSlotExtractor, LlmSlotExtractor};
pub use matching::{LlmFeatureMatcher, SubstringFeatureMatcher};
pub use storage::{FileSessionStore, InMemorySessionStore};
