// ABOUTME: Text-to-speech proxy streaming ElevenLabs audio back to the caller
// ABOUTME: Relays vendor errors with their status and preserves the audio content type
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use bytes::Bytes;
use futures_util::stream::BoxStream;
use futures_util::StreamExt;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{instrument, warn};

use super::transport_error;
use crate::config::MediaConfig;
use crate::constants::defaults;
use crate::errors::{AppError, AppResult};
use crate::utils::http_client::shared_client;

/// Body of a text-to-speech request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpeechRequest {
    /// Text to narrate
    #[serde(default)]
    pub text: Option<String>,
    /// Voice identifier override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice: Option<String>,
    /// Vendor model override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

/// Streaming audio answer
pub struct SpeechAudio {
    /// Content type reported by the vendor
    pub content_type: String,
    /// Audio bytes as they arrive
    pub stream: BoxStream<'static, Result<Bytes, reqwest::Error>>,
}

impl std::fmt::Debug for SpeechAudio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpeechAudio")
            .field("content_type", &self.content_type)
            .finish_non_exhaustive()
    }
}

/// `ElevenLabs` text-to-speech proxy
#[derive(Clone)]
pub struct SpeechSynthesizer {
    client: Client,
    config: MediaConfig,
}

impl SpeechSynthesizer {
    /// Create a proxy using the media vendor settings
    #[must_use]
    pub fn new(config: MediaConfig) -> Self {
        Self {
            client: shared_client().clone(),
            config,
        }
    }

    /// Narrate `request.text`
    ///
    /// # Errors
    ///
    /// Returns an error when the text is missing, no `ElevenLabs` key is set,
    /// the vendor cannot be reached, or it answers with an error status.
    #[instrument(skip_all, fields(voice = tracing::field::Empty))]
    pub async fn synthesize(&self, request: &SpeechRequest) -> AppResult<SpeechAudio> {
        let text = request
            .text
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::invalid_input("Missing text in request body"))?;
        let api_key = self
            .config
            .elevenlabs_api_key
            .as_deref()
            .ok_or_else(|| AppError::config("ElevenLabs API key not configured"))?;

        let voice = request
            .voice
            .as_deref()
            .filter(|v| !v.is_empty())
            .unwrap_or(&self.config.elevenlabs_voice_id);
        tracing::Span::current().record("voice", voice);

        let mut body = json!({ "text": text });
        if let Some(model) = request.model.as_deref().filter(|m| !m.is_empty()) {
            body["model"] = json!(model);
        }

        let response = self
            .client
            .post(format!(
                "{}/text-to-speech/{voice}",
                self.config.elevenlabs_api_url
            ))
            .header("xi-api-key", api_key)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| transport_error("ElevenLabs", e))?;

        let status = response.status();
        if !status.is_success() {
            let details = response
                .text()
                .await
                .map_err(|e| transport_error("ElevenLabs", e))?;
            warn!(status = %status, "ElevenLabs error");
            return Err(AppError::upstream(
                status.as_u16(),
                "ElevenLabs error",
                Value::String(details),
            ));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults::AUDIO_CONTENT_TYPE)
            .to_owned();

        Ok(SpeechAudio {
            content_type,
            stream: response.bytes_stream().boxed(),
        })
    }
}

impl std::fmt::Debug for SpeechSynthesizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpeechSynthesizer")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
