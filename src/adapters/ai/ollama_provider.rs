//! Ollama Provider - Implementation of AIProvider for a local Ollama server.
//!
//! Uses the non-streaming `/api/generate` endpoint: the system prompt goes
//! into `system`, user messages are joined into `prompt`, and the generated
//! text comes back in the `response` field.
//!
//! # Configuration
//!
//! ```ignore
//! let config = OllamaConfig::new("http://localhost:11434")
//!     .with_model("gemma3:4b")
//!     .with_timeout(Duration::from_secs(8));
//!
//! let provider = OllamaProvider::new(config)?;
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, ProviderInfo,
};

/// Configuration for the Ollama provider.
#[derive(Debug, Clone)]
pub struct OllamaConfig {
    /// Server root, e.g. `http://localhost:11434`.
    pub base_url: String,
    /// Model used when a request does not name one.
    pub model: String,
    /// Bearer token for servers behind an authenticating proxy.
    api_key: Option<Secret<String>>,
    /// HTTP client timeout.
    pub timeout: Duration,
    /// Retries on transient failures.
    pub max_retries: u32,
}

impl OllamaConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            model: "gemma3:4b".to_string(),
            api_key: None,
            timeout: Duration::from_secs(8),
            max_retries: 0,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_api_key(mut self, key: Secret<String>) -> Self {
        self.api_key = Some(key);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    fn api_key(&self) -> Option<&str> {
        self.api_key.as_ref().map(|k| k.expose_secret().as_str())
    }
}

/// Ollama API provider implementation.
pub struct OllamaProvider {
    config: OllamaConfig,
    client: Client,
}

impl OllamaProvider {
    /// Creates a new provider.
    ///
    /// # Errors
    ///
    /// - `InvalidRequest` if the HTTP client cannot be built
    pub fn new(config: OllamaConfig) -> Result<Self, AIError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AIError::InvalidRequest(format!("http client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn generate_url(&self) -> String {
        format!("{}/api/generate", self.config.base_url.trim_end_matches('/'))
    }

    fn tags_url(&self) -> String {
        format!("{}/api/tags", self.config.base_url.trim_end_matches('/'))
    }

    /// Lists installed models and checks for the configured one.
    ///
    /// Not retried; meant for a startup check.
    ///
    /// # Errors
    ///
    /// - `Unavailable` / `Timeout` / `Network` if the server cannot be reached
    /// - `Parse` if the model list cannot be read
    pub async fn health(&self) -> Result<BackendHealth, AIError> {
        let mut builder = self.client.get(self.tags_url());
        if let Some(key) = self.config.api_key() {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await.map_err(|e| self.transport_error(e))?;
        let response = self.handle_response_status(response).await?;
        let tags: TagsResponse = response
            .json()
            .await
            .map_err(|e| AIError::parse(format!("failed to parse model list: {}", e)))?;

        let health = BackendHealth::from_tags(tags, &self.config.model);
        if !health.model_available {
            tracing::warn!(
                model = %self.config.model,
                installed = ?health.models,
                "configured model is not installed"
            );
        }
        Ok(health)
    }

    fn transport_error(&self, e: reqwest::Error) -> AIError {
        if e.is_timeout() {
            AIError::timeout(self.config.timeout.as_secs())
        } else if e.is_connect() {
            AIError::unavailable(format!("connection failed: {}", e))
        } else {
            AIError::network(e.to_string())
        }
    }

    fn to_ollama_request(&self, request: &CompletionRequest) -> GenerateRequest {
        let options = if request.temperature.is_some() || request.max_tokens.is_some() {
            Some(GenerateOptions {
                temperature: request.temperature,
                num_predict: request.max_tokens,
            })
        } else {
            None
        };

        GenerateRequest {
            model: request
                .model
                .clone()
                .unwrap_or_else(|| self.config.model.clone()),
            prompt: request.user_prompt(),
            system: request.system_prompt.clone(),
            stream: false,
            options,
        }
    }

    async fn send_request(&self, request: &CompletionRequest) -> Result<Response, AIError> {
        let body = self.to_ollama_request(request);

        let mut builder = self.client.post(self.generate_url()).json(&body);
        if let Some(key) = self.config.api_key() {
            builder = builder.bearer_auth(key);
        }

        builder.send().await.map_err(|e| self.transport_error(e))
    }

    async fn handle_response_status(&self, response: Response) -> Result<Response, AIError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();

        match status.as_u16() {
            401 | 403 => Err(AIError::AuthenticationFailed),
            429 => Err(AIError::rate_limited(30)),
            // Unknown model
            404 => Err(AIError::InvalidRequest(error_body)),
            400 => Err(AIError::InvalidRequest(error_body)),
            500..=599 => Err(AIError::unavailable(format!(
                "server error {}: {}",
                status, error_body
            ))),
            _ => Err(AIError::network(format!(
                "unexpected status {}: {}",
                status, error_body
            ))),
        }
    }

    async fn parse_response(&self, response: Response) -> Result<CompletionResponse, AIError> {
        let response = self.handle_response_status(response).await?;

        let generated: GenerateResponse = response
            .json()
            .await
            .map_err(|e| AIError::parse(format!("failed to parse response: {}", e)))?;

        Ok(generated.into_completion())
    }
}

#[async_trait]
impl AIProvider for OllamaProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        let mut retry_count = 0;

        loop {
            let result = match self.send_request(&request).await {
                Ok(response) => self.parse_response(response).await,
                Err(err) => Err(err),
            };

            match result {
                Ok(completion) => return Ok(completion),
                Err(err) if !err.is_retryable() || retry_count >= self.config.max_retries => {
                    return Err(err)
                }
                Err(err) => {
                    tracing::debug!(error = %err, attempt = retry_count + 1, "retrying completion");
                }
            }

            // 250ms, 500ms, 1s, ...
            sleep(Duration::from_millis(250 << retry_count)).await;
            retry_count += 1;
        }
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("ollama", &self.config.model)
    }
}

/// Result of [`OllamaProvider::health`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendHealth {
    /// Installed model names as the server reports them.
    pub models: Vec<String>,
    /// Whether the configured model is among them.
    pub model_available: bool,
}

impl BackendHealth {
    fn from_tags(tags: TagsResponse, configured: &str) -> Self {
        let models: Vec<String> = tags.models.into_iter().map(|m| m.name).collect();
        // "gemma3" is served as "gemma3:latest".
        let model_available = models.iter().any(|name| {
            name == configured
                || (!configured.contains(':') && *name == format!("{}:latest", configured))
        });
        Self {
            models,
            model_available,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Ollama API types
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<TagEntry>,
}

#[derive(Debug, Deserialize)]
struct TagEntry {
    name: String,
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    model: String,
    prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<GenerateOptions>,
}

#[derive(Debug, Serialize)]
struct GenerateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_predict: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    model: String,
    #[serde(default)]
    response: String,
    #[serde(default)]
    done_reason: Option<String>,
}

impl GenerateResponse {
    fn into_completion(self) -> CompletionResponse {
        let finish_reason = match self.done_reason.as_deref() {
            Some("length") => FinishReason::Length,
            _ => FinishReason::Stop,
        };
        CompletionResponse {
            content: self.response,
            model: self.model,
            finish_reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;
    use crate::ports::{MessageRole, RequestMetadata};

    fn provider() -> OllamaProvider {
        OllamaProvider::new(OllamaConfig::new("http://localhost:11434/").with_model("gemma3:4b"))
            .unwrap()
    }

    fn request() -> CompletionRequest {
        CompletionRequest::new(RequestMetadata::new(UserId::new("U1").unwrap(), "t"))
            .with_system_prompt("extract")
            .with_message(MessageRole::User, "預算五千")
    }

    #[test]
    fn config_builder_works() {
        let config = OllamaConfig::new("http://ollama:11434")
            .with_model("gemma3:1b")
            .with_api_key(Secret::new("key".to_string()))
            .with_timeout(Duration::from_secs(5))
            .with_max_retries(2);

        assert_eq!(config.model, "gemma3:1b");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.max_retries, 2);
        assert_eq!(config.api_key(), Some("key"));
    }

    #[test]
    fn url_ignores_trailing_slash() {
        assert_eq!(provider().generate_url(), "http://localhost:11434/api/generate");
    }

    #[test]
    fn request_body_is_non_streaming() {
        let body = provider().to_ollama_request(&request().with_temperature(0.0));
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["model"], "gemma3:4b");
        assert_eq!(json["prompt"], "預算五千");
        assert_eq!(json["system"], "extract");
        assert_eq!(json["stream"], false);
        assert_eq!(json["options"]["temperature"], 0.0);
        assert!(json["options"].get("num_predict").is_none());
    }

    #[test]
    fn request_model_overrides_default() {
        let body = provider().to_ollama_request(&request().with_model("gemma3:1b"));
        assert_eq!(body.model, "gemma3:1b");
        assert!(body.options.is_none());
    }

    #[test]
    fn response_field_becomes_content() {
        let parsed: GenerateResponse = serde_json::from_str(
            r#"{"model":"gemma3:4b","created_at":"2024-01-01T00:00:00Z",
                "response":"{\"budget\":5000}","done":true,"done_reason":"stop"}"#,
        )
        .unwrap();
        let completion = parsed.into_completion();

        assert_eq!(completion.content, "{\"budget\":5000}");
        assert_eq!(completion.model, "gemma3:4b");
        assert_eq!(completion.finish_reason, FinishReason::Stop);
    }

    #[test]
    fn provider_info_names_ollama() {
        let info = provider().provider_info();
        assert_eq!(info.name, "ollama");
        assert_eq!(info.model, "gemma3:4b");
    }

    mod health {
        use super::*;

        fn tags(json: &str) -> TagsResponse {
            serde_json::from_str(json).unwrap()
        }

        #[test]
        fn configured_model_is_found() {
            let health = BackendHealth::from_tags(
                tags(r#"{"models":[{"name":"gemma3:4b","size":3338801804},{"name":"llama3:8b"}]}"#),
                "gemma3:4b",
            );
            assert!(health.model_available);
            assert_eq!(health.models, vec!["gemma3:4b", "llama3:8b"]);
        }

        #[test]
        fn untagged_model_matches_latest() {
            let health = BackendHealth::from_tags(tags(r#"{"models":[{"name":"gemma3:latest"}]}"#), "gemma3");
            assert!(health.model_available);
        }

        #[test]
        fn missing_model_is_reported() {
            let health = BackendHealth::from_tags(tags(r#"{"models":[]}"#), "gemma3:4b");
            assert!(!health.model_available);
            assert!(health.models.is_empty());
        }

        #[test]
        fn tags_url_ignores_trailing_slash() {
            assert_eq!(provider().tags_url(), "http://localhost:11434/api/tags");
        }

        #[tokio::test]
        async fn unreachable_server_fails_health() {
            let provider = OllamaProvider::new(
                OllamaConfig::new("http://127.0.0.1:9").with_timeout(Duration::from_secs(1)),
            )
            .unwrap();

            let err = provider.health().await.unwrap_err();
            assert!(err.is_retryable());
        }
    }

    #[tokio::test]
    async fn unreachable_server_is_unavailable() {
        let provider = OllamaProvider::new(
            OllamaConfig::new("http://127.0.0.1:9").with_timeout(Duration::from_secs(1)),
        )
        .unwrap();

        let err = provider.complete(request()).await.unwrap_err();
        assert!(err.is_retryable());
    }
}
