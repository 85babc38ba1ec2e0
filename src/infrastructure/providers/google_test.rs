use anyhow::Result;

use super::Candidate;
use super::CompletionResponse;
use super::Content;
use super::Google;
use super::Part;
use crate::domain::models::ProviderClient;
use crate::domain::models::ProviderError;

impl Google {
    fn with_url(url: String) -> Google {
        return Google {
            url,
            token: "abc".to_string(),
            model: "gemini-1.5-pro".to_string(),
        };
    }
}

#[tokio::test]
async fn it_gets_completions() -> Result<()> {
    let body = serde_json::to_string(&CompletionResponse {
        candidates: vec![Candidate {
            content: Content {
                role: "model".to_string(),
                parts: vec![Part {
                    text: "Hello there!".to_string(),
                }],
            },
        }],
    })?;

    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/v1beta/models/gemini-1.5-pro:generateContent?key=abc")
        .with_status(200)
        .with_body(body)
        .create();

    let backend = Google::with_url(server.url());
    let res = backend.invoke("Say hi").await?;
    mock.assert();

    assert_eq!(res, "Hello there!");
    return Ok(());
}

#[tokio::test]
async fn it_joins_multi_part_candidates() -> Result<()> {
    let body = serde_json::to_string(&CompletionResponse {
        candidates: vec![Candidate {
            content: Content {
                role: "model".to_string(),
                parts: vec![
                    Part {
                        text: "Hello ".to_string(),
                    },
                    Part {
                        text: "World".to_string(),
                    },
                ],
            },
        }],
    })?;

    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/v1beta/models/gemini-1.5-pro:generateContent?key=abc")
        .with_status(200)
        .with_body(body)
        .create();

    let backend = Google::with_url(server.url());
    let res = backend.invoke("Say hi to the world").await?;
    mock.assert();

    assert_eq!(res, "Hello World");
    return Ok(());
}

#[tokio::test]
async fn it_surfaces_bad_keys_as_authentication_errors() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/v1beta/models/gemini-1.5-pro:generateContent?key=abc")
        .with_status(400)
        .with_body(r#"{"error": {"message": "API key not valid. Please pass a valid API key."}}"#)
        .create();

    let backend = Google::with_url(server.url());
    let res = backend.invoke("Say hi").await;
    mock.assert();

    assert!(matches!(res, Err(ProviderError::Authentication(_))));
}

#[tokio::test]
async fn it_surfaces_rate_limits_as_quota_errors() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/v1beta/models/gemini-1.5-pro:generateContent?key=abc")
        .with_status(429)
        .with_body(r#"{"error": {"message": "Resource has been exhausted"}}"#)
        .create();

    let backend = Google::with_url(server.url());
    let res = backend.invoke("Say hi").await;
    mock.assert();

    assert!(matches!(res, Err(ProviderError::QuotaExceeded(_))));
}

#[tokio::test]
async fn it_surfaces_server_faults_as_transient_errors() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/v1beta/models/gemini-1.5-pro:generateContent?key=abc")
        .with_status(503)
        .with_body("upstream unavailable")
        .create();

    let backend = Google::with_url(server.url());
    let res = backend.invoke("Say hi").await;
    mock.assert();

    assert!(matches!(res, Err(ProviderError::Transient(_))));
}

#[tokio::test]
async fn it_rejects_empty_candidate_lists() -> Result<()> {
    let body = serde_json::to_string(&CompletionResponse { candidates: vec![] })?;

    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/v1beta/models/gemini-1.5-pro:generateContent?key=abc")
        .with_status(200)
        .with_body(body)
        .create();

    let backend = Google::with_url(server.url());
    let res = backend.invoke("Say hi").await;
    mock.assert();

    assert!(matches!(res, Err(ProviderError::Unknown(_))));
    return Ok(());
}
