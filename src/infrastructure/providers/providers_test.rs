use super::classify_status;
use super::ProviderManager;
use crate::domain::models::ModelRegistry;
use crate::domain::models::ProviderClient;
use crate::domain::models::ProviderError;
use crate::domain::models::ProviderName;

#[test]
fn it_builds_a_client_per_provider_family() {
    let registry = ModelRegistry::builtin();

    let google = ProviderManager::build(registry.get(1).unwrap(), "AIzaSyB12345").unwrap();
    assert_eq!(google.name(), ProviderName::Google);

    let groq = ProviderManager::build(registry.get(3).unwrap(), "gsk_live_12345").unwrap();
    assert_eq!(groq.name(), ProviderName::Groq);
}

#[test]
fn it_rejects_empty_credentials_at_construction() {
    let registry = ModelRegistry::builtin();

    let res = ProviderManager::build(registry.get(1).unwrap(), "");
    assert!(matches!(res, Err(ProviderError::Configuration(_))));

    let res = ProviderManager::build(registry.get(3).unwrap(), "   ");
    assert!(matches!(res, Err(ProviderError::Configuration(_))));
}

#[test]
fn it_classifies_http_statuses() {
    assert!(matches!(
        classify_status(401, "unauthorized"),
        ProviderError::Authentication(_)
    ));
    assert!(matches!(
        classify_status(403, "forbidden"),
        ProviderError::Authentication(_)
    ));
    assert!(matches!(
        classify_status(429, "rate limit"),
        ProviderError::QuotaExceeded(_)
    ));
    assert!(matches!(
        classify_status(500, "boom"),
        ProviderError::Transient(_)
    ));
    assert!(matches!(
        classify_status(503, "unavailable"),
        ProviderError::Transient(_)
    ));
    assert!(matches!(
        classify_status(404, "missing"),
        ProviderError::Unknown(_)
    ));
}

#[test]
fn it_treats_bad_key_400s_as_authentication() {
    assert!(matches!(
        classify_status(400, "API key not valid. Please pass a valid API key."),
        ProviderError::Authentication(_)
    ));
    assert!(matches!(
        classify_status(400, "malformed request"),
        ProviderError::Unknown(_)
    ));
}
