#[cfg(test)]
#[path = "groq_test.rs"]
mod tests;

use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;

use super::classify_status;
use super::classify_transport;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::ModelDescriptor;
use crate::domain::models::ProviderClient;
use crate::domain::models::ProviderError;
use crate::domain::models::ProviderName;
use crate::domain::models::MAX_OUTPUT_TOKENS;
use crate::domain::models::TEMPERATURE;

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
struct MessageRequest {
    role: String,
    content: String,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
struct CompletionRequest {
    model: String,
    messages: Vec<MessageRequest>,
    temperature: f32,
    max_tokens: u32,
    stream: bool,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
struct MessageResponse {
    content: String,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
struct CompletionChoiceResponse {
    message: MessageResponse,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoiceResponse>,
}

/// Groq speaks the OpenAI chat-completions protocol.
pub struct Groq {
    url: String,
    token: String,
    model: String,
}

impl Groq {
    pub fn from_descriptor(
        descriptor: &ModelDescriptor,
        credential: &str,
    ) -> Result<Groq, ProviderError> {
        if credential.trim().is_empty() {
            return Err(ProviderError::Configuration(
                "Groq API key is empty".to_string(),
            ));
        }
        if descriptor.model_identifier.is_empty() {
            return Err(ProviderError::Configuration(
                "model identifier is empty".to_string(),
            ));
        }

        let mut url = Config::get(ConfigKey::GroqUrl);
        if url.is_empty() {
            url = Config::default(ConfigKey::GroqUrl);
        }

        return Ok(Groq {
            url,
            token: credential.to_string(),
            model: descriptor.model_identifier.clone(),
        });
    }
}

#[async_trait]
impl ProviderClient for Groq {
    fn name(&self) -> ProviderName {
        return ProviderName::Groq;
    }

    #[allow(clippy::implicit_return)]
    async fn invoke(&self, prompt: &str) -> Result<String, ProviderError> {
        let req = CompletionRequest {
            model: self.model.clone(),
            messages: vec![MessageRequest {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            temperature: TEMPERATURE,
            max_tokens: MAX_OUTPUT_TOKENS,
            stream: false,
        };

        let res = reqwest::Client::new()
            .post(format!("{url}/v1/chat/completions", url = self.url))
            .header("Authorization", format!("Bearer {}", self.token))
            .json(&req)
            .send()
            .await
            .map_err(classify_transport)?;

        let status = res.status().as_u16();
        let body = res.text().await.map_err(classify_transport)?;

        if status >= 400 {
            tracing::error!(status = status, "Groq completion request failed");
            return Err(classify_status(status, &body));
        }

        let parsed = serde_json::from_str::<CompletionResponse>(&body).map_err(|err| {
            return ProviderError::Unknown(format!("unexpected Groq response: {err}"));
        })?;

        let reply = parsed
            .choices
            .first()
            .map(|choice| return choice.message.content.clone())
            .unwrap_or_default();

        if reply.is_empty() {
            return Err(ProviderError::Unknown(
                "Groq returned no choices".to_string(),
            ));
        }

        return Ok(reply);
    }
}
