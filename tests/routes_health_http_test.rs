// ABOUTME: HTTP integration tests for health check routes
// ABOUTME: Tests liveness and readiness endpoints alone and inside the assembled router
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod helpers;

use std::sync::Arc;

use fitplan_server::config::ServerConfig;
use fitplan_server::llm::ProviderChain;
use fitplan_server::routes::health::HealthRoutes;
use fitplan_server::routes::{router, AppState};
use helpers::axum_test::AxumTestRequest;

// ============================================================================
// GET /health
// ============================================================================

#[tokio::test]
async fn test_health_endpoint_success() {
    let response = AxumTestRequest::get("/health")
        .send(HealthRoutes::routes())
        .await;

    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "fitplan-server");
    let timestamp = body["timestamp"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
}

// ============================================================================
// GET /ready
// ============================================================================

#[tokio::test]
async fn test_ready_endpoint_success() {
    let response = AxumTestRequest::get("/ready")
        .send(HealthRoutes::routes())
        .await;

    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "ready");
    assert!(body["timestamp"].is_string());
}

// ============================================================================
// Assembled Router
// ============================================================================

#[tokio::test]
async fn test_health_served_without_any_provider() {
    let config = ServerConfig::from_lookup(&|_| None).unwrap();
    let app = router(AppState::new(config, Arc::new(ProviderChain::default())));

    let response = AxumTestRequest::get("/health").send(app).await;

    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let config = ServerConfig::from_lookup(&|_| None).unwrap();
    let app = router(AppState::new(config, Arc::new(ProviderChain::default())));

    let response = AxumTestRequest::get("/api/unknown").send(app).await;

    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_cors_allows_any_origin_by_default() {
    let config = ServerConfig::from_lookup(&|_| None).unwrap();
    let app = router(AppState::new(config, Arc::new(ProviderChain::default())));

    let response = AxumTestRequest::get("/health")
        .header("origin", "http://localhost:5173")
        .send(app)
        .await;

    assert_eq!(response.status(), 200);
    assert_eq!(
        response.header("access-control-allow-origin").as_deref(),
        Some("*")
    );
}
