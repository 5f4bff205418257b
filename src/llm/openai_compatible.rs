// ABOUTME: OpenAI-compatible chat completions adapter used as the fallback text generator
// ABOUTME: Sends a single user message with bearer auth and reads the first choice
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # `OpenAI`-Compatible Provider
//!
//! Works with any endpoint that speaks the chat completions protocol. The
//! endpoint is a full URL (`.../v1/chat/completions`), not a base.

use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use super::retry::{send_with_retry, RetryPolicy};
use super::{vendor_error_message, GenerationOptions, ProviderCallResult, TextGenerator};
use crate::config::LlmConfig;
use crate::constants::{defaults, limits, network};
use crate::errors::ProviderError;
use crate::utils::http_client::shared_client;
use crate::utils::truncate_chars;

const PROVIDER_NAME: &str = "openai";

// ============================================================================
// API Request Types
// ============================================================================

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

// ============================================================================
// Configuration
// ============================================================================

/// Chat completions adapter settings
#[derive(Clone)]
pub struct OpenAiCompatibleConfig {
    /// Full chat completions URL
    pub api_url: String,
    /// Bearer token
    pub api_key: String,
    /// Model used when the call does not name one
    pub default_model: String,
}

impl OpenAiCompatibleConfig {
    /// Settings for the public `OpenAI` endpoint
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_url: defaults::OPENAI_API_URL.to_owned(),
            api_key: api_key.into(),
            default_model: defaults::OPENAI_MODEL.to_owned(),
        }
    }

    /// Settings from the LLM configuration, if an `OpenAI` key is present
    #[must_use]
    pub fn from_llm_config(config: &LlmConfig) -> Option<Self> {
        let api_key = config.openai_api_key.as_ref()?;
        Some(
            Self::new(api_key.clone())
                .with_api_url(config.openai_api_url.clone())
                .with_default_model(config.openai_model.clone()),
        )
    }

    /// Set the chat completions URL
    #[must_use]
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Set the default model
    #[must_use]
    pub fn with_default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }
}

impl Debug for OpenAiCompatibleConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("OpenAiCompatibleConfig")
            .field("api_url", &self.api_url)
            .field("api_key", &"[REDACTED]")
            .field("default_model", &self.default_model)
            .finish()
    }
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// `OpenAI`-compatible text generator
pub struct OpenAiCompatibleProvider {
    client: Client,
    config: OpenAiCompatibleConfig,
    backoff: Duration,
}

impl OpenAiCompatibleProvider {
    /// Create a provider from its settings
    #[must_use]
    pub fn new(config: OpenAiCompatibleConfig) -> Self {
        Self {
            client: shared_client().clone(),
            config,
            backoff: Duration::from_millis(network::RETRY_BACKOFF_MS),
        }
    }

    /// Override the delay between retry attempts
    #[must_use]
    pub const fn with_retry_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    /// Text of the first choice, or the serialized payload when there is none
    fn extract_text(data: &Value) -> String {
        data.pointer("/choices/0/message/content")
            .and_then(Value::as_str)
            .or_else(|| data.pointer("/choices/0/text").and_then(Value::as_str))
            .map_or_else(|| data.to_string(), str::to_owned)
    }
}

#[async_trait]
impl TextGenerator for OpenAiCompatibleProvider {
    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    #[instrument(skip(self, prompt, options), fields(model = %options.model.as_deref().unwrap_or(&self.config.default_model)))]
    async fn call_text(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<ProviderCallResult, ProviderError> {
        let body = ChatCompletionRequest {
            model: options
                .model
                .as_deref()
                .unwrap_or(&self.config.default_model),
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: options.temperature.unwrap_or(defaults::OPENAI_TEMPERATURE),
            max_tokens: options.max_tokens.unwrap_or(defaults::OPENAI_MAX_TOKENS),
        };
        let policy = RetryPolicy::new(options.retries).with_backoff(self.backoff);

        debug!("Sending request to OpenAI-compatible API");

        let response = send_with_retry(
            || {
                self.client
                    .post(&self.config.api_url)
                    .bearer_auth(&self.config.api_key)
                    .json(&body)
            },
            policy,
        )
        .await
        .map_err(|source| ProviderError::Http {
            provider: PROVIDER_NAME,
            source,
        })?;

        let status = response.status();
        let raw = response.text().await.map_err(|source| ProviderError::Http {
            provider: PROVIDER_NAME,
            source,
        })?;
        let parsed = serde_json::from_str::<Value>(&raw);

        if !status.is_success() {
            let message = match &parsed {
                Ok(data) => vendor_error_message(data).unwrap_or_else(|| {
                    format!("OpenAI request failed with status {}", status.as_u16())
                }),
                Err(e) => format!(
                    "OpenAI request failed with status {} (non-JSON response: {e})",
                    status.as_u16()
                ),
            };
            warn!(status = %status, "OpenAI-compatible API error");
            return Err(ProviderError::Api {
                provider: PROVIDER_NAME,
                status: status.as_u16(),
                message,
            });
        }

        let data = parsed.map_err(|_| ProviderError::InvalidResponse {
            provider: PROVIDER_NAME,
            message: format!(
                "OpenAI returned non-JSON response (status {}): {}",
                status.as_u16(),
                truncate_chars(&raw, limits::VENDOR_BODY_PREVIEW_CHARS)
            ),
        })?;

        Ok(ProviderCallResult {
            text: Self::extract_text(&data),
            raw: data,
        })
    }
}

impl Debug for OpenAiCompatibleProvider {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("OpenAiCompatibleProvider")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
