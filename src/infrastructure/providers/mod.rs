#[cfg(test)]
#[path = "providers_test.rs"]
mod tests;

pub mod google;
pub mod groq;

use crate::domain::models::ModelDescriptor;
use crate::domain::models::ProviderBox;
use crate::domain::models::ProviderError;
use crate::domain::models::ProviderName;

pub struct ProviderManager {}

impl ProviderManager {
    /// Builds a live client for the descriptor, keyed by provider family.
    pub fn build(
        descriptor: &ModelDescriptor,
        credential: &str,
    ) -> Result<ProviderBox, ProviderError> {
        match descriptor.provider {
            ProviderName::Google => {
                return Ok(Box::new(google::Google::from_descriptor(descriptor, credential)?));
            }
            ProviderName::Groq => {
                return Ok(Box::new(groq::Groq::from_descriptor(descriptor, credential)?));
            }
        }
    }
}

/// Maps an HTTP failure status to the error taxonomy. Gemini reports
/// invalid keys as a 400 with an explanatory body rather than a 401, so the
/// body is consulted for that case.
pub(crate) fn classify_status(status: u16, detail: &str) -> ProviderError {
    if status == 401 || status == 403 {
        return ProviderError::Authentication(detail.to_string());
    }
    if status == 400 && detail.to_lowercase().contains("api key") {
        return ProviderError::Authentication(detail.to_string());
    }
    if status == 429 {
        return ProviderError::QuotaExceeded(detail.to_string());
    }
    if status >= 500 {
        return ProviderError::Transient(detail.to_string());
    }

    return ProviderError::Unknown(format!("status {status}: {detail}"));
}

pub(crate) fn classify_transport(err: reqwest::Error) -> ProviderError {
    if err.is_connect() || err.is_timeout() {
        return ProviderError::Transient(err.to_string());
    }

    return ProviderError::Unknown(err.to_string());
}
