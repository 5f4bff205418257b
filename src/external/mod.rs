// ABOUTME: Thin proxies for third-party media vendors used alongside generated plans
// ABOUTME: Exercise image generation and text-to-speech narration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # External Media Services
//!
//! Both proxies keep vendor credentials on the server. Vendor error statuses
//! are relayed to the caller together with the vendor's payload.

mod images;
mod speech;

pub use images::{ImageGenerator, ImageOutput, ImageRequest};
pub use speech::{SpeechAudio, SpeechRequest, SpeechSynthesizer};

use reqwest::{Response, StatusCode};
use serde_json::Value;

use crate::constants::limits;
use crate::errors::{AppError, ErrorCode};
use crate::utils::truncate_chars;

/// Transport failure talking to `service`
fn transport_error(service: &str, error: reqwest::Error) -> AppError {
    AppError::new(
        ErrorCode::ExternalServiceUnavailable,
        format!("{service} request failed: {error}"),
    )
    .with_source(error)
}

/// Read a vendor response body as JSON
async fn read_json(service: &str, response: Response) -> Result<(StatusCode, Value), AppError> {
    let status = response.status();
    let raw = response.text().await.map_err(|e| transport_error(service, e))?;
    let data = serde_json::from_str(&raw).map_err(|_| {
        AppError::external_service(
            service,
            format!(
                "non-JSON response (status {}): {}",
                status.as_u16(),
                truncate_chars(&raw, limits::VENDOR_BODY_PREVIEW_CHARS)
            ),
        )
    })?;
    Ok((status, data))
}
