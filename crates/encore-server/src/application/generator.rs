//! Recommendation Text Generator
//!
//! Builds the discovery prompt and performs exactly one backend call.

use std::sync::Arc;

use encore::{build_recommendation_prompt, DomainError, FavoriteDigest, LlmProvider};

/// The exchange with the text generation backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedText {
    pub prompt_text: String,
    pub raw_response_text: String,
}

pub struct RecommendationGenerator {
    llm: Arc<dyn LlmProvider>,
}

impl RecommendationGenerator {
    pub fn new(llm: Arc<dyn LlmProvider>) -> Self {
        Self { llm }
    }

    /// No retries. Any backend failure surfaces as `GenerationFailed`.
    pub async fn generate(
        &self,
        user_input: &str,
        favorites: &[FavoriteDigest],
    ) -> Result<GeneratedText, DomainError> {
        if user_input.trim().is_empty() {
            return Err(DomainError::invalid("userInput is required"));
        }

        let prompt_text = build_recommendation_prompt(user_input, favorites);

        tracing::debug!(
            provider = self.llm.provider_name(),
            model = self.llm.model_id(),
            favorites = favorites.len(),
            "Requesting recommendations"
        );

        let raw_response_text = self
            .llm
            .complete_simple(&prompt_text)
            .await
            .map_err(|e| match e {
                DomainError::GenerationFailed(_) => e,
                other => DomainError::GenerationFailed(other.to_string()),
            })?;

        Ok(GeneratedText {
            prompt_text,
            raw_response_text,
        })
    }
}
