//! Google Gemini text generation provider.
//!
//! Calls `generateContent` once per completion; no retries.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

use encore::ports::CompletionOptions;
use encore::{DomainError, LlmProvider};

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

#[derive(Clone)]
pub struct GeminiProvider {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiProvider {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> reqwest::Result<Self> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            api_key: api_key.into(),
            model: model.into(),
            base_url: BASE_URL.to_string(),
        })
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    async fn complete(
        &self,
        prompt: &str,
        options: &CompletionOptions,
    ) -> Result<String, DomainError> {
        let url = format!(
            "{}/{model}:generateContent?key={api_key}",
            self.base_url,
            model = self.model,
            api_key = self.api_key
        );

        let request = GenerateContentRequest::new(prompt, options);

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|err| {
                DomainError::GenerationFailed(format!("Gemini request failed: {}", err))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            return Err(map_http_error(status, &body));
        }

        let payload: Value = response.json().await.map_err(|err| {
            DomainError::GenerationFailed(format!("Invalid Gemini response: {}", err))
        })?;

        let content = extract_answer(&payload).ok_or_else(|| {
            DomainError::GenerationFailed("Gemini returned no text".to_string())
        })?;

        tracing::debug!(
            model = %self.model,
            finish_reason = extract_finish_reason(&payload).as_deref().unwrap_or("unknown"),
            "Gemini completion received"
        );

        Ok(content)
    }

    fn provider_name(&self) -> &str {
        "google"
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}

// ============================================
// Request Types
// ============================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

impl GenerateContentRequest {
    fn new(prompt: &str, options: &CompletionOptions) -> Self {
        Self {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: options.temperature,
                max_output_tokens: options.max_tokens,
            },
        }
    }
}

// ============================================
// Helper Functions
// ============================================

/// Text parts of the first candidate, concatenated
fn extract_answer(root: &Value) -> Option<String> {
    let parts = root
        .get("candidates")?
        .as_array()?
        .first()?
        .get("content")?
        .get("parts")?
        .as_array()?;

    let text: String = parts
        .iter()
        .filter_map(|part| part.get("text").and_then(|t| t.as_str()))
        .collect();

    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

fn extract_finish_reason(root: &Value) -> Option<String> {
    root.get("candidates")?
        .as_array()?
        .first()?
        .get("finishReason")?
        .as_str()
        .map(str::to_string)
}

fn map_http_error(status: StatusCode, body: &str) -> DomainError {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|json| {
            json.get("error")
                .and_then(|err| err.get("message"))
                .and_then(|msg| msg.as_str())
                .map(|msg| msg.to_string())
        })
        .unwrap_or_else(|| body.to_string());

    if status == StatusCode::TOO_MANY_REQUESTS {
        return DomainError::GenerationFailed(format!("Gemini rate limited: {}", message));
    }

    DomainError::GenerationFailed(format!(
        "Gemini API error ({}): {}",
        status.as_u16(),
        message
    ))
}
