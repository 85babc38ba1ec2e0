#[cfg(test)]
#[path = "provider_test.rs"]
mod tests;

use async_trait::async_trait;
use thiserror::Error;

use super::ProviderName;

pub const TEMPERATURE: f32 = 0.7;
pub const MAX_OUTPUT_TOKENS: u32 = 2048;

const PROMPT_TEMPLATE: &str = "You are a helpful and friendly AI assistant. You have access to the conversation history and can maintain context throughout our chat.

Conversation History:
{history}

Current Human Message: {input}

AI Assistant Response:";

/// Fills the fixed prompt template used for every invocation.
pub fn render_prompt(history: &str, input: &str) -> String {
    return PROMPT_TEMPLATE
        .replace("{history}", history)
        .replace("{input}", input);
}

#[derive(Debug, Error)]
pub enum ProviderError {
    /// Construction parameters or credentials were rejected before any
    /// request was made.
    #[error("configuration rejected: {0}")]
    Configuration(String),

    #[error("authentication failed: {0}")]
    Authentication(String),

    #[error("quota or rate limit exceeded: {0}")]
    QuotaExceeded(String),

    /// Network or backend fault. Safe to retry or switch models.
    #[error("backend unavailable: {0}")]
    Transient(String),

    #[error("unexpected backend failure: {0}")]
    Unknown(String),
}

#[async_trait]
pub trait ProviderClient {
    fn name(&self) -> ProviderName;

    /// Sends one fully rendered prompt and returns the assistant reply.
    /// No retries happen here; retry policy belongs to the caller.
    async fn invoke(&self, prompt: &str) -> Result<String, ProviderError>;
}

pub type ProviderBox = Box<dyn ProviderClient + Send + Sync>;
