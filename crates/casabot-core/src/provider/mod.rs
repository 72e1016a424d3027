pub mod openai_compat;

use async_trait::async_trait;

use crate::config::CompletionConfig;
use crate::error::CompletionError;
use crate::types::{CompletionResponse, Message};

/// Trait for completion providers.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Send a chat completion request and return the assistant text.
    async fn complete(
        &self,
        messages: &[Message],
        model: &str,
        max_tokens: u32,
        temperature: f64,
    ) -> Result<CompletionResponse, CompletionError>;

    /// Get the default model for this provider.
    fn default_model(&self) -> &str;
}

/// Create the provider for the configured completion service.
pub fn create_provider(config: &CompletionConfig) -> Box<dyn CompletionProvider> {
    Box::new(openai_compat::OpenAiCompatProvider::new(
        config.api_key.clone(),
        config.api_base.clone(),
        config.model.clone(),
    ))
}
