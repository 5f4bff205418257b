// ABOUTME: Health check route handlers for service monitoring and status endpoints
// ABOUTME: Liveness and readiness probes that answer even when no LLM vendor is configured
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Health check routes for service monitoring

use axum::{routing::get, Json, Router};
use chrono::Utc;
use serde_json::{json, Value};

use crate::constants::service_names;

/// Liveness and readiness routes
pub struct HealthRoutes;

impl HealthRoutes {
    /// `GET /health` and `GET /ready`
    pub fn routes() -> Router {
        Router::new()
            .route("/health", get(|| async { probe("healthy") }))
            .route("/ready", get(|| async { probe("ready") }))
    }
}

fn probe(status: &str) -> Json<Value> {
    Json(json!({
        "status": status,
        "service": service_names::FITPLAN_SERVER,
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": Utc::now().to_rfc3339()
    }))
}
