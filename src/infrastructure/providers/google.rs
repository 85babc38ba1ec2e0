#[cfg(test)]
#[path = "google_test.rs"]
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
struct Part {
    text: String,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    role: String,
    parts: Vec<Part>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CompletionRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Candidate {
    content: Content,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

pub struct Google {
    url: String,
    token: String,
    model: String,
}

impl Google {
    pub fn from_descriptor(
        descriptor: &ModelDescriptor,
        credential: &str,
    ) -> Result<Google, ProviderError> {
        if credential.trim().is_empty() {
            return Err(ProviderError::Configuration(
                "Google API key is empty".to_string(),
            ));
        }
        if descriptor.model_identifier.is_empty() {
            return Err(ProviderError::Configuration(
                "model identifier is empty".to_string(),
            ));
        }

        let mut url = Config::get(ConfigKey::GoogleUrl);
        if url.is_empty() {
            url = Config::default(ConfigKey::GoogleUrl);
        }

        return Ok(Google {
            url,
            token: credential.to_string(),
            model: descriptor.model_identifier.clone(),
        });
    }
}

#[async_trait]
impl ProviderClient for Google {
    fn name(&self) -> ProviderName {
        return ProviderName::Google;
    }

    #[allow(clippy::implicit_return)]
    async fn invoke(&self, prompt: &str) -> Result<String, ProviderError> {
        let req = CompletionRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                max_output_tokens: MAX_OUTPUT_TOKENS,
            },
        };

        let res = reqwest::Client::new()
            .post(format!(
                "{url}/v1beta/models/{model}:generateContent?key={key}",
                url = self.url,
                model = self.model,
                key = self.token,
            ))
            .json(&req)
            .send()
            .await
            .map_err(classify_transport)?;

        let status = res.status().as_u16();
        let body = res.text().await.map_err(classify_transport)?;

        if status >= 400 {
            tracing::error!(status = status, "Gemini completion request failed");
            return Err(classify_status(status, &body));
        }

        let parsed = serde_json::from_str::<CompletionResponse>(&body).map_err(|err| {
            return ProviderError::Unknown(format!("unexpected Gemini response: {err}"));
        })?;

        let reply = parsed
            .candidates
            .first()
            .map(|candidate| {
                return candidate
                    .content
                    .parts
                    .iter()
                    .map(|part| return part.text.as_str())
                    .collect::<Vec<&str>>()
                    .join("");
            })
            .unwrap_or_default();

        if reply.is_empty() {
            return Err(ProviderError::Unknown(
                "Gemini returned no candidates".to_string(),
            ));
        }

        return Ok(reply);
    }
}
