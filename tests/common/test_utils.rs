use super::mocks::MockLlmClient;
use secrecy::SecretString;
use serde_json::{Value, json};
use std::sync::Arc;
use text_summarizer::{
    config::ClientConfig,
    llm::LlmClient,
    server::{self, AppState},
    summarizer::Summarizer,
};

pub const TEST_API_KEY: &str = "AIzaSyTestKey_0123456789-abcdefghijk";

pub const MULTIPART_BOUNDARY: &str = "summarizer-test-boundary-7MA4YWxkTrZu0gW";

/// Long enough to pass the form's character and word minimums
pub const SAMPLE_TEXT: &str = "Rust is a systems programming language focused on safety, \
speed, and concurrency. It achieves memory safety without a garbage collector by using \
an ownership model that the compiler checks at build time. Many teams adopt it for \
command line tools, network services, and embedded software.";

/// Client configuration pointing at a mock server
pub fn test_client_config(base_url: &str) -> ClientConfig {
    ClientConfig {
        base_url: base_url.to_string(),
        api_key: Some(SecretString::new(TEST_API_KEY.to_string())),
        ..ClientConfig::default()
    }
}

pub fn summarizer_with(client: Arc<dyn LlmClient>) -> Summarizer {
    let defaults = ClientConfig::default();
    Summarizer::new(client, defaults.temperature, defaults.max_tokens)
}

pub fn app_with(client: Arc<dyn LlmClient>) -> axum::Router {
    server::router(AppState {
        summarizer: Arc::new(summarizer_with(client)),
    })
}

pub fn mock_app(mock: MockLlmClient) -> (axum::Router, Arc<MockLlmClient>) {
    let mock = Arc::new(mock);
    (app_with(mock.clone()), mock)
}

/// OpenAI-compatible chat completion body as returned by Gemini
pub fn completion_body(content: &str) -> Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "created": 1_700_000_000,
        "model": "gemini-1.5-flash",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }],
        "usage": { "prompt_tokens": 42, "completion_tokens": 12, "total_tokens": 54 }
    })
}

pub fn error_body(message: &str) -> Value {
    json!({
        "error": { "message": message, "type": "invalid_request_error", "param": null, "code": null }
    })
}

/// Builds a multipart/form-data body; returns (content type, body)
pub fn multipart_body(fields: &[(&str, &str)], file: Option<(&str, &[u8])>) -> (String, Vec<u8>) {
    let mut body = Vec::new();

    for (name, value) in fields {
        body.extend_from_slice(format!("--{}\r\n", MULTIPART_BOUNDARY).as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
        );
        body.extend_from_slice(value.as_bytes());
        body.extend_from_slice(b"\r\n");
    }

    if let Some((filename, bytes)) = file {
        body.extend_from_slice(format!("--{}\r\n", MULTIPART_BOUNDARY).as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\nContent-Type: text/plain\r\n\r\n",
                filename
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{}--\r\n", MULTIPART_BOUNDARY).as_bytes());

    (
        format!("multipart/form-data; boundary={}", MULTIPART_BOUNDARY),
        body,
    )
}
