// ABOUTME: Plan generation route turning a user profile into a workout and diet plan
// ABOUTME: Reads the raw body for clear JSON errors, supports debug echo, and maps outcomes to HTTP
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Plan generation routes
//!
//! The body is read as text rather than through the `Json` extractor so that
//! malformed JSON is answered with the parser message and a body preview.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};
use tracing::{debug, error, info};

use super::AppState;
use crate::constants::limits;
use crate::errors::AppError;
use crate::models::GeneratePlanRequest;
use crate::utils::truncate_chars;

/// Plan routes implementation
pub struct PlanRoutes;

impl PlanRoutes {
    /// Create all plan routes
    pub fn routes(state: AppState) -> Router {
        Router::new()
            .route("/api/generate-plan", post(Self::handle_generate_plan))
            .with_state(state)
    }

    /// `POST /api/generate-plan`
    async fn handle_generate_plan(State(state): State<AppState>, body: String) -> Response {
        if body.trim().is_empty() {
            return AppError::invalid_input("Empty request body").into_response();
        }

        let parsed: Value = match serde_json::from_str(&body) {
            Ok(value) => value,
            Err(e) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "error": "Invalid JSON in request body",
                        "details": e.to_string(),
                        "raw": truncate_chars(&body, limits::REJECTED_BODY_PREVIEW_CHARS),
                    })),
                )
                    .into_response();
            }
        };

        debug!(
            body = %truncate_chars(&body, limits::LOGGED_BODY_PREVIEW_CHARS),
            "Received generate-plan request"
        );

        if state.config.debug_echo {
            return Json(json!({ "debug": true, "received": parsed })).into_response();
        }

        let request = GeneratePlanRequest::from_value(&parsed);
        match state.plans.generate(&request).await {
            Ok(outcome) => {
                info!(outcome = outcome.label(), "Plan request finished");
                outcome.into_response()
            }
            Err(e) => {
                error!(error = %e, "Plan generation failed");
                AppError::from(e).into_response()
            }
        }
    }
}
