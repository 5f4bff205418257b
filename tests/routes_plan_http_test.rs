// ABOUTME: HTTP integration tests for the generate-plan route
// ABOUTME: Tests body handling, debug echo and the status and envelope of every pipeline outcome
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod helpers;

use std::sync::Arc;

use fitplan_server::config::ServerConfig;
use fitplan_server::errors::ProviderError;
use fitplan_server::llm::ProviderChain;
use fitplan_server::routes::{router, AppState};
use helpers::axum_test::AxumTestRequest;
use helpers::fixtures::{
    plan_missing_diet, plan_request, plan_without_day_wise, valid_plan, valid_profile,
};
use helpers::scripted_generator::ScriptedGenerator;
use serde_json::{json, Value};

const ROUTE: &str = "/api/generate-plan";

fn test_config() -> ServerConfig {
    ServerConfig::from_lookup(&|_| None).unwrap()
}

fn app(generator: &Arc<ScriptedGenerator>) -> axum::Router {
    router(AppState::new(test_config(), generator.clone()))
}

// ============================================================================
// Request Body Handling
// ============================================================================

#[tokio::test]
async fn test_empty_body_rejected() {
    let generator = Arc::new(ScriptedGenerator::replying(Vec::<String>::new()));

    let response = AxumTestRequest::post(ROUTE)
        .raw_body("   ")
        .send(app(&generator))
        .await;

    assert_eq!(response.status(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"], "Empty request body");
    assert_eq!(body["code"], "INVALID_INPUT");
    assert_eq!(generator.call_count(), 0);
}

#[tokio::test]
async fn test_malformed_json_returns_parser_details_and_preview() {
    let generator = Arc::new(ScriptedGenerator::replying(Vec::<String>::new()));

    let response = AxumTestRequest::post(ROUTE)
        .header("content-type", "application/json")
        .raw_body("{\"user\": {\"name\": \"Alex\",}")
        .send(app(&generator))
        .await;

    assert_eq!(response.status(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"], "Invalid JSON in request body");
    assert!(body["details"].as_str().is_some_and(|d| !d.is_empty()));
    assert_eq!(body["raw"], "{\"user\": {\"name\": \"Alex\",}");
}

#[tokio::test]
async fn test_malformed_json_preview_is_truncated() {
    let generator = Arc::new(ScriptedGenerator::replying(Vec::<String>::new()));
    let long_body = format!("{{{}", "x".repeat(500));

    let response = AxumTestRequest::post(ROUTE)
        .raw_body(&long_body)
        .send(app(&generator))
        .await;

    assert_eq!(response.status(), 400);
    let body: Value = response.json();
    assert_eq!(body["raw"].as_str().unwrap().chars().count(), 200);
}

#[tokio::test]
async fn test_debug_echo_returns_parsed_body_without_generation() {
    let generator = Arc::new(ScriptedGenerator::replying(Vec::<String>::new()));
    let mut config = test_config();
    config.debug_echo = true;
    let app = router(AppState::new(config, generator.clone()));
    let request = plan_request(json!({ "name": "Alex" }));

    let response = AxumTestRequest::post(ROUTE).json(&request).send(app).await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(body, json!({ "debug": true, "received": request }));
    assert_eq!(generator.call_count(), 0);
}

// ============================================================================
// Outcomes
// ============================================================================

#[tokio::test]
async fn test_invalid_user_payload() {
    let generator = Arc::new(ScriptedGenerator::replying(Vec::<String>::new()));

    let response = AxumTestRequest::post(ROUTE)
        .json(&plan_request(json!({ "age": 30 })))
        .send(app(&generator))
        .await;

    assert_eq!(response.status(), 400);
    let body: Value = response.json();
    assert_eq!(
        body,
        json!({ "error": "Invalid user payload", "details": { "name": ["Required"] } })
    );
    assert_eq!(generator.call_count(), 0);
}

#[tokio::test]
async fn test_strict_plan_response() {
    let text = valid_plan().to_string();
    let generator = Arc::new(ScriptedGenerator::replying([text.clone()]));

    let response = AxumTestRequest::post(ROUTE)
        .json(&plan_request(valid_profile()))
        .send(app(&generator))
        .await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(body, json!({ "plan": valid_plan(), "raw": text }));
}

#[tokio::test]
async fn test_heuristic_plan_response_carries_warning() {
    let generator = Arc::new(ScriptedGenerator::replying([plan_missing_diet().to_string()]));

    let response = AxumTestRequest::post(ROUTE)
        .json(&plan_request(valid_profile()))
        .send(app(&generator))
        .await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(body["plan"], plan_missing_diet());
    assert_eq!(body["validationWarning"], json!({ "dietPlan": ["Required"] }));
    assert!(body["raw"].is_string());
}

#[tokio::test]
async fn test_repaired_plan_response_has_both_raw_texts() {
    let first = plan_without_day_wise().to_string();
    let second = valid_plan().to_string();
    let generator = Arc::new(ScriptedGenerator::replying([first.clone(), second.clone()]));

    let response = AxumTestRequest::post(ROUTE)
        .json(&plan_request(valid_profile()))
        .send(app(&generator))
        .await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(body["plan"], valid_plan());
    assert_eq!(body["raw"], json!([first, second]));
}

#[tokio::test]
async fn test_unparseable_output_is_bad_gateway() {
    let generator = Arc::new(ScriptedGenerator::replying(["no json at all"]));

    let response = AxumTestRequest::post(ROUTE)
        .json(&plan_request(valid_profile()))
        .send(app(&generator))
        .await;

    assert_eq!(response.status(), 502);
    let body: Value = response.json();
    assert_eq!(
        body,
        json!({ "error": "Failed to parse plan from LLM", "raw": "no json at all" })
    );
}

#[tokio::test]
async fn test_unrepaired_output_returns_original_parse() {
    let generator = Arc::new(ScriptedGenerator::replying([
        plan_without_day_wise().to_string(),
        "still nothing".to_owned(),
    ]));

    let response = AxumTestRequest::post(ROUTE)
        .json(&plan_request(valid_profile()))
        .send(app(&generator))
        .await;

    assert_eq!(response.status(), 502);
    let body: Value = response.json();
    assert_eq!(body["error"], "LLM returned JSON that failed schema validation");
    assert_eq!(body["parsed"], plan_without_day_wise());
    assert_eq!(body["validation"]["workoutPlan"], json!(["Required"]));
}

// ============================================================================
// Provider Failures
// ============================================================================

#[tokio::test]
async fn test_no_provider_configured() {
    let state = AppState::new(test_config(), Arc::new(ProviderChain::default()));

    let response = AxumTestRequest::post(ROUTE)
        .json(&plan_request(valid_profile()))
        .send(router(state))
        .await;

    assert_eq!(response.status(), 500);
    let body: Value = response.json();
    assert_eq!(body["code"], "CONFIG_MISSING");
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("no provider configured"));
}

#[tokio::test]
async fn test_vendor_failure_maps_to_gateway_error() {
    let generator = Arc::new(ScriptedGenerator::with_results([Err(
        ProviderError::AttemptsExhausted { attempts: vec![] },
    )]));

    let response = AxumTestRequest::post(ROUTE)
        .json(&plan_request(valid_profile()))
        .send(app(&generator))
        .await;

    assert_eq!(response.status(), 502);
    let body: Value = response.json();
    assert_eq!(body["code"], "EXTERNAL_SERVICE_ERROR");
}

#[tokio::test]
async fn test_vendor_auth_failure_is_service_unavailable() {
    let generator = Arc::new(ScriptedGenerator::failing(401, "bad key"));

    let response = AxumTestRequest::post(ROUTE)
        .json(&plan_request(valid_profile()))
        .send(app(&generator))
        .await;

    assert_eq!(response.status(), 503);
    let body: Value = response.json();
    assert_eq!(body["code"], "EXTERNAL_AUTH_FAILED");
}
