// ABOUTME: Integration tests for primary and fallback provider selection
// ABOUTME: Verifies credential-driven routing, fallback on failure and the unconfigured error
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod helpers;

use std::sync::Arc;

use fitplan_server::config::LlmConfig;
use fitplan_server::errors::{AppError, ErrorCode, ProviderError};
use fitplan_server::llm::{GenerationOptions, ProviderChain, RouteCache, TextGenerator};
use helpers::scripted_generator::ScriptedGenerator;
use serde_json::json;
use wiremock::matchers::{any, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn chain_of(
    primary: Option<&Arc<ScriptedGenerator>>,
    fallback: Option<&Arc<ScriptedGenerator>>,
) -> ProviderChain {
    let erase = |g: &Arc<ScriptedGenerator>| g.clone() as Arc<dyn TextGenerator>;
    ProviderChain::new(primary.map(erase), fallback.map(erase))
}

fn llm_config(server: &MockServer) -> LlmConfig {
    LlmConfig::from_lookup(&|name| match name {
        "GEMINI_API_URL" => Some(format!("{}/v1", server.uri())),
        "OPENAI_API_URL" => Some(format!("{}/openai/chat", server.uri())),
        _ => None,
    })
}

// ============================================================================
// Unconfigured
// ============================================================================

#[tokio::test]
async fn test_no_credentials_fails_without_network_calls() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let config = llm_config(&server);
    assert!(!config.has_any_provider());

    let chain = ProviderChain::from_config(&config, Arc::new(RouteCache::new()));
    assert!(!chain.is_configured());

    let error = chain
        .call_text("hello", &GenerationOptions::default())
        .await
        .unwrap_err();
    assert!(error.is_config());
    assert!(error.to_string().starts_with("no provider configured"));
    assert_eq!(AppError::from(error).code, ErrorCode::ConfigMissing);
}

// ============================================================================
// Selection
// ============================================================================

#[tokio::test]
async fn test_primary_answer_skips_fallback() {
    let primary = Arc::new(ScriptedGenerator::replying(["primary"]).named("gemini"));
    let fallback = Arc::new(ScriptedGenerator::replying(["fallback"]).named("openai"));
    let chain = chain_of(Some(&primary), Some(&fallback));

    let result = chain
        .call_text("hello", &GenerationOptions::default())
        .await
        .unwrap();

    assert_eq!(result.text, "primary");
    assert_eq!(chain.name(), "gemini");
    assert_eq!(fallback.call_count(), 0);
}

#[tokio::test]
async fn test_fallback_used_when_primary_fails() {
    let primary = Arc::new(ScriptedGenerator::failing(404, "model not found"));
    let fallback = Arc::new(ScriptedGenerator::replying(["fallback"]));
    let chain = chain_of(Some(&primary), Some(&fallback));
    let options = GenerationOptions::default().with_temperature(0.0);

    let result = chain.call_text("hello", &options).await.unwrap();

    assert_eq!(result.text, "fallback");
    assert_eq!(primary.call_count(), 1);
    assert_eq!(fallback.prompts(), vec!["hello".to_owned()]);
    assert_eq!(fallback.options()[0], options);
}

#[tokio::test]
async fn test_fallback_only_chain() {
    let fallback = Arc::new(ScriptedGenerator::replying(["only fallback"]).named("openai"));
    let chain = chain_of(None, Some(&fallback));

    let result = chain
        .call_text("hello", &GenerationOptions::default())
        .await
        .unwrap();

    assert_eq!(result.text, "only fallback");
    assert_eq!(chain.name(), "openai");
}

#[tokio::test]
async fn test_primary_error_surfaces_without_fallback() {
    let primary = Arc::new(ScriptedGenerator::failing(500, "boom"));
    let chain = chain_of(Some(&primary), None);

    let error = chain
        .call_text("hello", &GenerationOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(error, ProviderError::Api { status: 500, .. }));
}

#[tokio::test]
async fn test_both_failures_are_reported() {
    let primary = Arc::new(ScriptedGenerator::failing(500, "primary down"));
    let fallback = Arc::new(ScriptedGenerator::failing(429, "fallback throttled"));
    let chain = chain_of(Some(&primary), Some(&fallback));

    let error = chain
        .call_text("hello", &GenerationOptions::default())
        .await
        .unwrap_err();

    let message = error.to_string();
    assert!(message.contains("primary down"));
    assert!(message.contains("fallback provider also failed"));
    assert!(message.contains("fallback throttled"));
    assert_eq!(AppError::from(error).code, ErrorCode::ExternalRateLimited);
}

// ============================================================================
// Configured Chain Against Mock Vendors
// ============================================================================

#[tokio::test]
async fn test_configured_chain_falls_back_to_openai() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/openai/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "content": "from openai" } }]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": { "message": "API key not valid" }
        })))
        .mount(&server)
        .await;

    let mut config = llm_config(&server);
    config.gemini_api_key = Some("bad-gemini-key".to_owned());
    config.openai_api_key = Some("sk-good".to_owned());

    let chain = ProviderChain::from_config(&config, Arc::new(RouteCache::new()));
    let result = chain
        .call_text("hello", &GenerationOptions::default().with_retries(0))
        .await
        .unwrap();

    assert_eq!(result.text, "from openai");
}
