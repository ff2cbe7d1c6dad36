//! LLM Provider Port
//!
//! Abstract interface for text generation backends. Implementations can be
//! swapped between providers (Google, Anthropic, OpenAI, ...).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// Options for LLM completion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionOptions {
    /// Maximum tokens to generate
    pub max_tokens: Option<u32>,
    /// Temperature (0.0 - 2.0)
    pub temperature: Option<f32>,
}

impl Default for CompletionOptions {
    fn default() -> Self {
        Self {
            max_tokens: Some(2048),
            temperature: Some(0.7),
        }
    }
}

/// Text generation backend.
///
/// A single call, no retries. Upstream failures surface as
/// `GenerationFailed` carrying the upstream message.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate text for one prompt
    async fn complete(
        &self,
        prompt: &str,
        options: &CompletionOptions,
    ) -> Result<String, DomainError>;

    /// Generate text with default options
    async fn complete_simple(&self, prompt: &str) -> Result<String, DomainError> {
        self.complete(prompt, &CompletionOptions::default()).await
    }

    /// Get the provider name (e.g., "google", "anthropic")
    fn provider_name(&self) -> &str;

    /// Get the model ID being used
    fn model_id(&self) -> &str;
}
