// ABOUTME: Integration tests for the OpenAI-compatible chat completions adapter
// ABOUTME: Verifies request shape, bearer auth, text extraction and vendor error mapping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::time::Duration;

use fitplan_server::errors::ProviderError;
use fitplan_server::llm::{
    GenerationOptions, OpenAiCompatibleConfig, OpenAiCompatibleProvider, TextGenerator,
};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn provider(server: &MockServer) -> OpenAiCompatibleProvider {
    let config = OpenAiCompatibleConfig::new("sk-test")
        .with_api_url(format!("{}/v1/chat/completions", server.uri()))
        .with_default_model("gpt-test");
    OpenAiCompatibleProvider::new(config).with_retry_backoff(Duration::ZERO)
}

#[tokio::test]
async fn test_chat_completion_text_returned() {
    let server = MockServer::start().await;
    let payload = json!({
        "id": "chatcmpl-1",
        "choices": [{ "index": 0, "message": { "role": "assistant", "content": "{\"tips\":[]}" } }]
    });

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({
            "model": "gpt-test",
            "messages": [{ "role": "user", "content": "make a plan" }],
            "max_tokens": 2000
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(payload.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let options = GenerationOptions::default().with_max_tokens(2000);
    let result = provider(&server)
        .call_text("make a plan", &options)
        .await
        .unwrap();

    assert_eq!(result.text, "{\"tips\":[]}");
    assert_eq!(result.raw, payload);
}

#[tokio::test]
async fn test_model_override_sent() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "model": "gpt-override" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "text": "completion style" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let options = GenerationOptions::default().with_model("gpt-override");
    let result = provider(&server).call_text("hi", &options).await.unwrap();

    assert_eq!(result.text, "completion style");
}

#[tokio::test]
async fn test_error_status_maps_to_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": { "message": "Incorrect API key provided", "type": "invalid_request_error" }
        })))
        // one initial attempt plus one retry
        .expect(2)
        .mount(&server)
        .await;

    let error = provider(&server)
        .call_text("hi", &GenerationOptions::default())
        .await
        .unwrap_err();

    match error {
        ProviderError::Api {
            provider,
            status,
            message,
        } => {
            assert_eq!(provider, "openai");
            assert_eq!(status, 401);
            assert_eq!(message, "Incorrect API key provided");
        }
        other => panic!("expected API error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_non_json_success_is_invalid_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&server)
        .await;

    let error = provider(&server)
        .call_text("hi", &GenerationOptions::default().with_retries(0))
        .await
        .unwrap_err();

    let ProviderError::InvalidResponse { message, .. } = error else {
        panic!("expected invalid response");
    };
    assert!(message.starts_with("OpenAI returned non-JSON response (status 200)"));
    assert!(message.contains("<html>gateway</html>"));
}
