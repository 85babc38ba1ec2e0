use anyhow::Result;

use super::CompletionChoiceResponse;
use super::CompletionResponse;
use super::Groq;
use super::MessageResponse;
use crate::domain::models::ProviderClient;
use crate::domain::models::ProviderError;

impl Groq {
    fn with_url(url: String) -> Groq {
        return Groq {
            url,
            token: "abc".to_string(),
            model: "llama-3.1-70b-versatile".to_string(),
        };
    }
}

#[tokio::test]
async fn it_gets_completions() -> Result<()> {
    let body = serde_json::to_string(&CompletionResponse {
        choices: vec![CompletionChoiceResponse {
            message: MessageResponse {
                content: "Hello World".to_string(),
            },
        }],
    })?;

    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .match_header("Authorization", "Bearer abc")
        .with_status(200)
        .with_body(body)
        .create();

    let backend = Groq::with_url(server.url());
    let res = backend.invoke("Say hi to the world").await?;
    mock.assert();

    assert_eq!(res, "Hello World");
    return Ok(());
}

#[tokio::test]
async fn it_surfaces_bad_tokens_as_authentication_errors() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(401)
        .with_body(r#"{"error": {"message": "Invalid API Key"}}"#)
        .create();

    let backend = Groq::with_url(server.url());
    let res = backend.invoke("Say hi").await;
    mock.assert();

    assert!(matches!(res, Err(ProviderError::Authentication(_))));
}

#[tokio::test]
async fn it_surfaces_rate_limits_as_quota_errors() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(429)
        .with_body(r#"{"error": {"message": "Rate limit reached"}}"#)
        .create();

    let backend = Groq::with_url(server.url());
    let res = backend.invoke("Say hi").await;
    mock.assert();

    assert!(matches!(res, Err(ProviderError::QuotaExceeded(_))));
}

#[tokio::test]
async fn it_surfaces_server_faults_as_transient_errors() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(500)
        .with_body("internal error")
        .create();

    let backend = Groq::with_url(server.url());
    let res = backend.invoke("Say hi").await;
    mock.assert();

    assert!(matches!(res, Err(ProviderError::Transient(_))));
}

#[tokio::test]
async fn it_rejects_empty_choice_lists() -> Result<()> {
    let body = serde_json::to_string(&CompletionResponse { choices: vec![] })?;

    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_body(body)
        .create();

    let backend = Groq::with_url(server.url());
    let res = backend.invoke("Say hi").await;
    mock.assert();

    assert!(matches!(res, Err(ProviderError::Unknown(_))));
    return Ok(());
}
