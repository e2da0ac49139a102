//! Timeout AI Provider - Bounds every completion call.
//!
//! A hung completion service must not stall a dialog turn. Every call the
//! core makes goes through this wrapper; an elapsed call becomes
//! `AIError::Timeout` and the caller takes its deterministic path.
//!
//! # Example
//!
//! ```ignore
//! let provider = TimeoutAIProvider::new(Arc::new(ollama), Duration::from_secs(8));
//! ```

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

use crate::ports::{AIError, AIProvider, CompletionRequest, CompletionResponse, ProviderInfo};

/// AI provider wrapper enforcing a per-call deadline.
pub struct TimeoutAIProvider {
    inner: Arc<dyn AIProvider>,
    limit: Duration,
}

impl TimeoutAIProvider {
    pub fn new(inner: Arc<dyn AIProvider>, limit: Duration) -> Self {
        Self { inner, limit }
    }

    pub fn limit(&self) -> Duration {
        self.limit
    }
}

#[async_trait]
impl AIProvider for TimeoutAIProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        let user_id = request.metadata.user_id.clone();
        let trace_id = request.metadata.trace_id.clone();

        match timeout(self.limit, self.inner.complete(request)).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(
                    user_id = %user_id,
                    trace_id = %trace_id,
                    limit_secs = self.limit.as_secs(),
                    provider = %self.inner.provider_info().name,
                    "completion timed out"
                );
                Err(AIError::timeout(self.limit.as_secs()))
            }
        }
    }

    fn provider_info(&self) -> ProviderInfo {
        self.inner.provider_info()
    }
}
