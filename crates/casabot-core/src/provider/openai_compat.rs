use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use crate::error::CompletionError;
use crate::types::{CompletionResponse, Message, TokenUsage};
use crate::util::http;

use super::CompletionProvider;

/// OpenAI-compatible completion provider.
/// Works with the OpenAI API and any compatible endpoint.
pub struct OpenAiCompatProvider {
    api_key: String,
    api_base: String,
    default_model: String,
}

impl OpenAiCompatProvider {
    pub fn new(api_key: String, api_base: Option<String>, default_model: String) -> Self {
        let base = api_base.unwrap_or_else(|| "https://api.openai.com/v1".to_string());
        Self {
            api_key,
            api_base: base.trim_end_matches('/').to_string(),
            default_model,
        }
    }
}

#[async_trait]
impl CompletionProvider for OpenAiCompatProvider {
    async fn complete(
        &self,
        messages: &[Message],
        model: &str,
        max_tokens: u32,
        temperature: f64,
    ) -> Result<CompletionResponse, CompletionError> {
        let url = format!("{}/chat/completions", self.api_base);

        let body = json!({
            "model": model,
            "messages": messages,
            "max_tokens": max_tokens,
            "temperature": temperature,
        });

        debug!("Completion request to {} with model {}", url, model);

        let response = http::client()
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(CompletionError::Api {
                status: status.as_u16(),
                message: text,
            });
        }

        let data: serde_json::Value = response.json().await?;
        parse_completion_response(&data)
    }

    fn default_model(&self) -> &str {
        &self.default_model
    }
}

/// Parse an OpenAI-format response into our CompletionResponse.
pub fn parse_completion_response(
    data: &serde_json::Value,
) -> Result<CompletionResponse, CompletionError> {
    let message = data
        .get("choices")
        .and_then(|c| c.get(0))
        .and_then(|choice| choice.get("message"))
        .ok_or_else(|| CompletionError::Parse("No message in response".to_string()))?;

    let content = message
        .get("content")
        .and_then(|v| v.as_str())
        .ok_or_else(|| CompletionError::Parse("No content in message".to_string()))?
        .to_string();

    let usage = if let Some(u) = data.get("usage") {
        TokenUsage {
            prompt_tokens: u.get("prompt_tokens").and_then(|v| v.as_u64()).unwrap_or(0) as u32,
            completion_tokens: u
                .get("completion_tokens")
                .and_then(|v| v.as_u64())
                .unwrap_or(0) as u32,
            total_tokens: u.get("total_tokens").and_then(|v| v.as_u64()).unwrap_or(0) as u32,
        }
    } else {
        TokenUsage::default()
    };

    Ok(CompletionResponse { content, usage })
}
