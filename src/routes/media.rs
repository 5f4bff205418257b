// ABOUTME: Media routes proxying exercise image generation and plan narration
// ABOUTME: JSON in, JSON or streamed audio out, with vendor errors relayed
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use axum::{
    body::Body,
    extract::State,
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::AppState;
use crate::errors::{AppError, AppResult};
use crate::external::{ImageRequest, SpeechRequest};

/// Media routes implementation
pub struct MediaRoutes;

impl MediaRoutes {
    /// Create all media routes
    pub fn routes(state: AppState) -> Router {
        Router::new()
            .route("/api/generate-image", post(Self::handle_generate_image))
            .route("/api/text-to-speech", post(Self::handle_text_to_speech))
            .with_state(state)
    }

    /// `POST /api/generate-image`
    async fn handle_generate_image(
        State(state): State<AppState>,
        body: String,
    ) -> AppResult<Json<Value>> {
        let request: ImageRequest = parse_body(&body)?;
        let output = state.images.generate(&request).await?;
        Ok(Json(output.to_body()))
    }

    /// `POST /api/text-to-speech`
    async fn handle_text_to_speech(
        State(state): State<AppState>,
        body: String,
    ) -> AppResult<Response> {
        let request: SpeechRequest = parse_body(&body)?;
        let audio = state.speech.synthesize(&request).await?;
        Ok((
            [(CONTENT_TYPE, audio.content_type)],
            Body::from_stream(audio.stream),
        )
            .into_response())
    }
}

fn parse_body<T: DeserializeOwned>(body: &str) -> AppResult<T> {
    serde_json::from_str(body)
        .map_err(|e| AppError::invalid_format(format!("Invalid JSON in request body: {e}")))
}
