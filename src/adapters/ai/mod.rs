//! AI Provider Adapters.
//!
//! Implementations of the AIProvider port.
//!
//! ## Available Adapters
//!
//! - `OllamaProvider` - Local Ollama server (`/api/generate`)
//! - `TimeoutAIProvider` - Wrapper bounding every call with a deadline
//! - `DisabledAIProvider` - Always unavailable; keeps the deterministic paths only
//! - `MockAIProvider` - Configurable mock for testing

mod disabled_provider;
mod mock_provider;
mod ollama_provider;
mod timeout_provider;

pub use disabled_provider::DisabledAIProvider;
pub use mock_provider::{MockAIProvider, MockResponse};
pub use ollama_provider::{BackendHealth, OllamaConfig, OllamaProvider};
pub use timeout_provider::TimeoutAIProvider;
