//! Integration tests for the Gemini generateContent client, run against a
//! local mock server.

use httpmock::prelude::*;
use serde_json::json;
use textgen_client::{
    generate_gemini_text, GeminiConfig, GenerateError, Provider, DEFAULT_GEMINI_MODEL,
};

fn success_body(text: &str) -> serde_json::Value {
    json!({
        "candidates": [{
            "content": {"parts": [{"text": text}], "role": "model"},
            "finishReason": "STOP"
        }],
        "usageMetadata": {"promptTokenCount": 4, "candidatesTokenCount": 12, "totalTokenCount": 16}
    })
}

#[tokio::test]
async fn returns_text_from_success_response() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(format!("/{DEFAULT_GEMINI_MODEL}:generateContent"))
                .query_param("key", "test-key")
                .header("content-type", "application/json");
            then.status(200).json_body(success_body("echoed back"));
        })
        .await;

    let config = GeminiConfig::new("test-key").base_url(&server.base_url());
    let text = generate_gemini_text("say something", &config).await.unwrap();

    assert_eq!(text, "echoed back");
    // assert() also verifies the client made exactly one call
    mock.assert_async().await;
}

#[tokio::test]
async fn custom_model_appears_verbatim_in_url() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/gemini-1.5-pro:generateContent")
                .query_param("key", "test-key");
            then.status(200).json_body(success_body("ok"));
        })
        .await;

    let config = GeminiConfig::new("test-key")
        .model("gemini-1.5-pro")
        .base_url(&server.base_url());
    generate_gemini_text("prompt", &config).await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn applies_defaults_and_omits_system_instruction() {
    let server = MockServer::start_async().await;
    // Exact body match: default token cap, no system_instruction key.
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(format!("/{DEFAULT_GEMINI_MODEL}:generateContent"))
                .json_body(json!({
                    "contents": [{"parts": [{"text": "prompt"}]}],
                    "generationConfig": {"maxOutputTokens": 2000}
                }));
            then.status(200).json_body(success_body("ok"));
        })
        .await;

    let config = GeminiConfig::new("test-key").base_url(&server.base_url());
    generate_gemini_text("prompt", &config).await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn system_becomes_system_instruction_block() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(format!("/{DEFAULT_GEMINI_MODEL}:generateContent"))
                .json_body(json!({
                    "contents": [{"parts": [{"text": "prompt"}]}],
                    "generationConfig": {"maxOutputTokens": 512},
                    "system_instruction": {"parts": [{"text": "answer in one sentence"}]}
                }));
            then.status(200).json_body(success_body("ok"));
        })
        .await;

    let config = GeminiConfig::new("test-key")
        .max_output_tokens(512)
        .system("answer in one sentence")
        .base_url(&server.base_url());
    generate_gemini_text("prompt", &config).await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn empty_candidates_returns_empty_string() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path(format!("/{DEFAULT_GEMINI_MODEL}:generateContent"));
            then.status(200).json_body(json!({"candidates": []}));
        })
        .await;

    let config = GeminiConfig::new("test-key").base_url(&server.base_url());
    let text = generate_gemini_text("prompt", &config).await.unwrap();

    assert_eq!(text, "");
}

#[tokio::test]
async fn status_429_raises_rate_limited() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(format!("/{DEFAULT_GEMINI_MODEL}:generateContent"));
            then.status(429).body("quota exceeded");
        })
        .await;

    let config = GeminiConfig::new("test-key").base_url(&server.base_url());
    let err = generate_gemini_text("prompt", &config).await.unwrap_err();

    assert!(err.is_rate_limited());
    match err {
        GenerateError::RateLimited(message) => assert!(!message.is_empty()),
        other => panic!("expected RateLimited error, got {other:?}"),
    }
    mock.assert_async().await;
}

#[tokio::test]
async fn status_500_raises_generic_api_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path(format!("/{DEFAULT_GEMINI_MODEL}:generateContent"));
            then.status(500).body("backend exploded");
        })
        .await;

    let config = GeminiConfig::new("test-key").base_url(&server.base_url());
    let err = generate_gemini_text("prompt", &config).await.unwrap_err();

    assert!(!err.is_rate_limited());
    match err {
        GenerateError::Api(message) => {
            assert!(message.contains("500"));
            assert!(message.contains("backend exploded"));
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn provider_enum_dispatches_to_gemini() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(format!("/{DEFAULT_GEMINI_MODEL}:generateContent"));
            then.status(200).json_body(success_body("via provider"));
        })
        .await;

    let provider = Provider::Gemini(GeminiConfig::new("test-key").base_url(&server.base_url()));
    let text = provider.generate("prompt").await.unwrap();

    assert_eq!(text, "via provider");
    mock.assert_async().await;
}
