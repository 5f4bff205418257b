// ABOUTME: Exercise image generation through Replicate predictions or OpenAI Images
// ABOUTME: Polls Replicate until the prediction settles and normalizes OpenAI url or base64 output
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::time::sleep;
use tracing::{debug, info, instrument, warn};

use super::{read_json, transport_error};
use crate::config::MediaConfig;
use crate::constants::{defaults, network};
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::utils::http_client::shared_client;

/// Body of a generate-image request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageRequest {
    /// Image description
    #[serde(default)]
    pub prompt: Option<String>,
    /// Size such as `512x512`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    /// Number of images
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n: Option<u32>,
    /// Vendor model override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl ImageRequest {
    /// Width taken from the `WIDTHxHEIGHT` size string
    fn width(&self) -> Option<u32> {
        self.size.as_deref()?.split('x').next()?.parse().ok()
    }
}

/// Generated image reference
#[derive(Debug, Clone, PartialEq)]
pub enum ImageOutput {
    /// Hosted image URL (whatever the vendor returned as output)
    Url {
        /// URL value
        url: Value,
        /// Vendor payload
        raw: Value,
    },
    /// Inline base64 PNG
    DataUrl {
        /// `data:image/png;base64,...`
        data_url: String,
        /// Vendor payload
        raw: Value,
    },
    /// Vendor answered without a recognizable image field
    Raw {
        /// Vendor payload
        raw: Value,
    },
}

impl ImageOutput {
    /// JSON response body
    #[must_use]
    pub fn to_body(&self) -> Value {
        match self {
            Self::Url { url, raw } => json!({ "url": url, "raw": raw }),
            Self::DataUrl { data_url, raw } => json!({ "dataUrl": data_url, "raw": raw }),
            Self::Raw { raw } => json!({ "raw": raw }),
        }
    }
}

/// Image generation proxy
#[derive(Clone)]
pub struct ImageGenerator {
    client: Client,
    config: MediaConfig,
    poll_attempts: u32,
    poll_interval: Duration,
}

impl ImageGenerator {
    /// Create a proxy using the media vendor settings
    #[must_use]
    pub fn new(config: MediaConfig) -> Self {
        Self {
            client: shared_client().clone(),
            config,
            poll_attempts: network::IMAGE_POLL_ATTEMPTS,
            poll_interval: Duration::from_millis(network::IMAGE_POLL_INTERVAL_MS),
        }
    }

    /// Override the Replicate polling schedule
    #[must_use]
    pub const fn with_polling(mut self, attempts: u32, interval: Duration) -> Self {
        self.poll_attempts = attempts;
        self.poll_interval = interval;
        self
    }

    /// Generate an image for `request`
    ///
    /// Replicate is used when both its token and model version are set,
    /// otherwise `OpenAI` Images.
    ///
    /// # Errors
    ///
    /// Returns an error when the prompt is missing, no vendor is configured,
    /// the vendor rejects the request, generation fails, or polling runs out.
    #[instrument(skip_all)]
    pub async fn generate(&self, request: &ImageRequest) -> AppResult<ImageOutput> {
        let prompt = request
            .prompt
            .as_deref()
            .filter(|p| !p.is_empty())
            .ok_or_else(|| AppError::invalid_input("Missing 'prompt' in request body"))?;

        if let (Some(token), Some(version)) = (
            &self.config.replicate_api_token,
            &self.config.replicate_model_version,
        ) {
            return self
                .generate_with_replicate(token, version, prompt, request)
                .await;
        }

        if let Some(api_key) = &self.config.openai_api_key {
            return self.generate_with_openai(api_key, prompt, request).await;
        }

        Err(AppError::config(
            "No image provider configured. Set REPLICATE_API_TOKEN and REPLICATE_MODEL_VERSION or OPENAI_API_KEY.",
        ))
    }

    async fn generate_with_replicate(
        &self,
        token: &str,
        version: &str,
        prompt: &str,
        request: &ImageRequest,
    ) -> AppResult<ImageOutput> {
        let predictions_url = format!("{}/predictions", self.config.replicate_api_url);
        let authorization = format!("Token {token}");

        let mut input = json!({ "prompt": prompt });
        if let Some(width) = request.width() {
            input["width"] = json!(width);
        }

        let response = self
            .client
            .post(&predictions_url)
            .header(AUTHORIZATION, &authorization)
            .json(&json!({ "version": version, "input": input }))
            .send()
            .await
            .map_err(|e| transport_error("Replicate", e))?;
        let (status, created) = read_json("Replicate", response).await?;
        if !status.is_success() {
            return Err(AppError::upstream(
                status.as_u16(),
                "Replicate create failed",
                created,
            ));
        }

        let prediction_id = created
            .get("id")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                AppError::external_service("Replicate", "prediction response has no id")
                    .with_details(created.clone())
            })?;
        let status_url = format!("{predictions_url}/{prediction_id}");
        info!(prediction_id, "Replicate prediction created");

        for attempt in 0..self.poll_attempts {
            if attempt > 0 {
                sleep(self.poll_interval).await;
            }

            let response = self
                .client
                .get(&status_url)
                .header(AUTHORIZATION, &authorization)
                .send()
                .await
                .map_err(|e| transport_error("Replicate", e))?;
            let (_, prediction) = read_json("Replicate", response).await?;

            match prediction.get("status").and_then(Value::as_str) {
                Some("succeeded") => {
                    let output = prediction.get("output").cloned().unwrap_or(Value::Null);
                    let url = output.get(0).cloned().unwrap_or(output);
                    return Ok(ImageOutput::Url {
                        url,
                        raw: prediction,
                    });
                }
                Some("failed") => {
                    warn!(prediction_id, "Replicate generation failed");
                    return Err(AppError::new(
                        ErrorCode::ExternalServiceError,
                        "Replicate generation failed",
                    )
                    .with_details(prediction));
                }
                other => debug!(prediction_id, attempt, status = ?other, "Replicate prediction pending"),
            }
        }

        Err(AppError::external_timeout("Replicate generation timed out"))
    }

    async fn generate_with_openai(
        &self,
        api_key: &str,
        prompt: &str,
        request: &ImageRequest,
    ) -> AppResult<ImageOutput> {
        let mut payload = json!({
            "prompt": prompt,
            "n": request.n.unwrap_or(1),
            "size": request.size.as_deref().unwrap_or(defaults::IMAGE_SIZE),
        });
        if let Some(model) = &request.model {
            payload["model"] = json!(model);
        }

        let response = self
            .client
            .post(&self.config.openai_images_url)
            .bearer_auth(api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| transport_error("OpenAI Images", e))?;
        let (status, data) = read_json("OpenAI Images", response).await?;
        if !status.is_success() {
            return Err(AppError::upstream(status.as_u16(), "Image API error", data));
        }

        let Some(first) = data.pointer("/data/0").filter(|v| !v.is_null()) else {
            return Err(
                AppError::new(ErrorCode::ExternalServiceError, "No image returned")
                    .with_details(data),
            );
        };

        if let Some(url) = first.get("url").filter(|u| is_present(u)) {
            return Ok(ImageOutput::Url {
                url: url.clone(),
                raw: data,
            });
        }
        if let Some(b64) = first.get("b64_json").and_then(Value::as_str).filter(|b| !b.is_empty()) {
            return Ok(ImageOutput::DataUrl {
                data_url: format!("data:image/png;base64,{b64}"),
                raw: data,
            });
        }
        Ok(ImageOutput::Raw { raw: data })
    }
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

impl std::fmt::Debug for ImageGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageGenerator")
            .field("config", &self.config)
            .field("poll_attempts", &self.poll_attempts)
            .field("poll_interval", &self.poll_interval)
            .finish_non_exhaustive()
    }
}
