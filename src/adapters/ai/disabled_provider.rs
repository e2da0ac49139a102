//! Provider used when completions are switched off in configuration.
//!
//! Every call fails immediately, so the deterministic paths handle every
//! turn without waiting on a timeout.

use async_trait::async_trait;

use crate::ports::{AIError, AIProvider, CompletionRequest, CompletionResponse, ProviderInfo};

#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledAIProvider;

#[async_trait]
impl AIProvider for DisabledAIProvider {
    async fn complete(&self, _request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        Err(AIError::unavailable("completions disabled by configuration"))
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("disabled", "none")
    }
}
