//! Completion provider abstraction
//!
//! Provides a common interface for the external completion API, a concrete
//! OpenAI-compatible client, and a logging wrapper.

mod error;
mod openai;
mod types;

#[cfg(test)]
pub mod testing;

pub use error::{CompletionError, CompletionErrorKind};
pub use openai::OpenAIService;
pub use types::{Completion, CompletionRequest, Usage};

use async_trait::async_trait;
use std::sync::Arc;

/// Common interface for completion providers
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Make a completion request. Never retried by callers.
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, CompletionError>;

    /// Get the model ID
    fn model_id(&self) -> &str;
}

/// Configuration for the completion provider
#[derive(Debug, Clone, Default)]
pub struct LlmConfig {
    pub openai_api_key: Option<String>,
    /// OpenAI-compatible endpoint override
    pub base_url: Option<String>,
    /// Model ID override
    pub model: Option<String>,
}

impl LlmConfig {
    pub fn from_env() -> Self {
        Self {
            openai_api_key: std::env::var("OPENAI_API_KEY").ok(),
            base_url: std::env::var("OPENAI_BASE_URL").ok(),
            model: std::env::var("FITBOT_MODEL").ok(),
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.openai_api_key.as_deref().is_some_and(|k| !k.is_empty())
    }
}

/// Build the completion service from configuration, wrapped with logging.
///
/// A missing API key is not fatal here: the service is still constructed
/// and every completion will fail in-band with an auth error.
pub fn build_service(config: &LlmConfig) -> Arc<dyn CompletionService> {
    let api_key = config.openai_api_key.clone().unwrap_or_default();
    let service = OpenAIService::new(api_key, config.model.as_deref(), config.base_url.as_deref());
    Arc::new(LoggingService::new(Arc::new(service)))
}

/// Logging wrapper for completion services
pub struct LoggingService {
    inner: Arc<dyn CompletionService>,
    model_id: String,
}

impl LoggingService {
    pub fn new(inner: Arc<dyn CompletionService>) -> Self {
        let model_id = inner.model_id().to_string();
        Self { inner, model_id }
    }
}

#[async_trait]
impl CompletionService for LoggingService {
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, CompletionError> {
        let start = std::time::Instant::now();
        let result = self.inner.complete(request).await;
        let duration = start.elapsed();

        match &result {
            Ok(completion) => {
                tracing::info!(
                    model = %self.model_id,
                    duration_ms = %duration.as_millis(),
                    input_tokens = completion.usage.input_tokens,
                    output_tokens = completion.usage.output_tokens,
                    "Completion request finished"
                );
            }
            Err(e) => {
                tracing::error!(
                    model = %self.model_id,
                    duration_ms = %duration.as_millis(),
                    error = %e.message,
                    retryable = e.kind.is_retryable(),
                    "Completion request failed"
                );
            }
        }

        result
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}
