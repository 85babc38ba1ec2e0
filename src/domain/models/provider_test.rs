use super::render_prompt;
use super::ProviderError;

#[test]
fn it_renders_history_and_input_into_the_template() {
    let res = render_prompt("Human: hi\nAI: hello", "how are you?");

    assert!(res.starts_with("You are a helpful and friendly AI assistant."));
    assert!(res.contains("Conversation History:\nHuman: hi\nAI: hello"));
    assert!(res.contains("Current Human Message: how are you?"));
    assert!(res.ends_with("AI Assistant Response:"));
}

#[test]
fn it_degrades_gracefully_on_an_empty_history() {
    let res = render_prompt("", "Hello");

    assert!(res.contains("Conversation History:\n\n"));
    assert!(res.contains("Current Human Message: Hello"));
}

#[test]
fn it_formats_each_error_kind_distinctly() {
    let auth = ProviderError::Authentication("401".to_string());
    let quota = ProviderError::QuotaExceeded("429".to_string());
    let transient = ProviderError::Transient("503".to_string());

    assert!(auth.to_string().contains("authentication failed"));
    assert!(quota.to_string().contains("quota or rate limit"));
    assert!(transient.to_string().contains("backend unavailable"));
}
