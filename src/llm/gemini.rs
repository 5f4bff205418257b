// ABOUTME: Google Gemini text-generation adapter with endpoint and model discovery
// ABOUTME: Tries the cached route, then each API version with the requested and a discovered model
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Gemini Provider
//!
//! Calls the Generative Language API `generateContent` method. Model names
//! and API versions drift over time, so a failed call is followed by a
//! `models` listing on the same endpoint and a retry with the best model that
//! supports `generateContent`:
//!
//! 1. the requested model, if listed
//! 2. the first `gemini-1.5-flash` model
//! 3. the first `gemini-1.5-pro` model
//! 4. any `gemini` model
//! 5. the first listed model
//!
//! The first route that answers is remembered in the shared [`RouteCache`]
//! and tried first on the next call.

use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use super::retry::{send_with_retry, RetryPolicy};
use super::route_cache::{GeminiRoute, RouteCache};
use super::{vendor_error_message, GenerationOptions, ProviderCallResult, TextGenerator};
use crate::config::LlmConfig;
use crate::constants::{defaults, limits, network};
use crate::errors::{ProviderError, RouteAttempt};
use crate::utils::http_client::shared_client;
use crate::utils::truncate_chars;

/// Model placeholder recorded when model listing itself fails
const LIST_MODELS_ATTEMPT: &str = "<listModels>";

/// Prefix the models listing puts in front of model identifiers
const MODEL_NAME_PREFIX: &str = "models/";

// ============================================================================
// API Request Types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: [Content<'a>; 1],
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: [Part<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

impl<'a> GenerateContentRequest<'a> {
    fn new(prompt: &'a str, options: &GenerationOptions) -> Self {
        Self {
            contents: [Content {
                role: "user",
                parts: [Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: options.temperature.unwrap_or(defaults::GEMINI_TEMPERATURE),
                max_output_tokens: options
                    .max_tokens
                    .unwrap_or(defaults::GEMINI_MAX_OUTPUT_TOKENS),
            },
        }
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Gemini adapter settings
#[derive(Clone)]
pub struct GeminiConfig {
    /// API key sent as the `key` query parameter
    pub api_key: String,
    /// Model used when the call does not name one
    pub default_model: String,
    /// Base endpoints tried in order
    pub base_urls: Vec<String>,
}

impl GeminiConfig {
    /// Settings with the default model and the built-in endpoints
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            default_model: defaults::GEMINI_MODEL.to_owned(),
            base_urls: defaults::GEMINI_BASE_URLS
                .iter()
                .map(|url| (*url).to_owned())
                .collect(),
        }
    }

    /// Settings from the LLM configuration, if a Gemini key is present
    #[must_use]
    pub fn from_llm_config(config: &LlmConfig) -> Option<Self> {
        let api_key = config.gemini_api_key.as_ref()?;
        let mut gemini = Self::new(api_key.clone()).with_default_model(config.gemini_model.clone());
        if let Some(base_url) = &config.gemini_base_url {
            gemini = gemini.with_base_url(base_url.clone());
        }
        Some(gemini)
    }

    /// Set the default model
    #[must_use]
    pub fn with_default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    /// Use a single base endpoint instead of the built-in candidates
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_urls = vec![base_url.into().trim_end_matches('/').to_owned()];
        self
    }
}

impl Debug for GeminiConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"[REDACTED]")
            .field("default_model", &self.default_model)
            .field("base_urls", &self.base_urls)
            .finish()
    }
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// Google Gemini text generator
pub struct GeminiProvider {
    client: Client,
    config: GeminiConfig,
    routes: Arc<RouteCache>,
    backoff: Duration,
}

impl GeminiProvider {
    /// Create a provider sharing `routes` with every other Gemini caller
    #[must_use]
    pub fn new(config: GeminiConfig, routes: Arc<RouteCache>) -> Self {
        Self {
            client: shared_client().clone(),
            config,
            routes,
            backoff: Duration::from_millis(network::RETRY_BACKOFF_MS),
        }
    }

    /// Override the delay between retry attempts
    #[must_use]
    pub const fn with_retry_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    /// Configured default model
    #[must_use]
    pub fn default_model(&self) -> &str {
        &self.config.default_model
    }

    /// Call `generateContent` on one route
    async fn try_route(
        &self,
        base_url: &str,
        model: &str,
        body: &GenerateContentRequest<'_>,
        policy: RetryPolicy,
    ) -> Result<ProviderCallResult, RouteAttempt> {
        let url = format!("{base_url}/models/{model}:generateContent");
        let failed = |status: Option<u16>, message: String| RouteAttempt {
            base_url: base_url.to_owned(),
            model: model.to_owned(),
            status,
            message: Some(message),
        };

        let response = send_with_retry(
            || {
                self.client
                    .post(&url)
                    .query(&[("key", self.config.api_key.as_str())])
                    .json(body)
            },
            policy,
        )
        .await
        .map_err(|e| failed(None, e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| failed(Some(status.as_u16()), e.to_string()))?;

        match serde_json::from_str::<Value>(&text) {
            Ok(data) if status.is_success() => Ok(ProviderCallResult {
                text: extract_text(&data),
                raw: data,
            }),
            Ok(data) => Err(RouteAttempt {
                base_url: base_url.to_owned(),
                model: model.to_owned(),
                status: Some(status.as_u16()),
                message: vendor_error_message(&data),
            }),
            Err(e) => Err(failed(Some(status.as_u16()), e.to_string())),
        }
    }

    /// List the models an endpoint offers
    async fn list_models(&self, base_url: &str) -> Result<Vec<Value>, String> {
        let url = format!("{base_url}/models");
        let policy = RetryPolicy::new(network::DEFAULT_RETRIES).with_backoff(self.backoff);

        let response = send_with_retry(
            || {
                self.client
                    .get(&url)
                    .query(&[("key", self.config.api_key.as_str())])
            },
            policy,
        )
        .await
        .map_err(|e| format!("{e} (base: {base_url})"))?;

        let status = response.status();
        let raw = response
            .text()
            .await
            .map_err(|e| format!("{e} (base: {base_url})"))?;
        let parsed = serde_json::from_str::<Value>(&raw);

        if !status.is_success() {
            let message = parsed
                .ok()
                .as_ref()
                .and_then(vendor_error_message)
                .unwrap_or_else(|| {
                    format!("Gemini listModels failed with status {}", status.as_u16())
                });
            return Err(format!("{message} (base: {base_url})"));
        }

        let data = parsed.map_err(|_| {
            format!(
                "Gemini listModels returned non-JSON (base: {base_url}): {}",
                truncate_chars(&raw, limits::VENDOR_BODY_PREVIEW_CHARS)
            )
        })?;

        Ok(data
            .get("models")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default())
    }

    async fn remember(&self, base_url: &str, model: &str) {
        self.routes
            .set(GeminiRoute {
                base_url: base_url.to_owned(),
                model: model.to_owned(),
            })
            .await;
    }
}

#[async_trait]
impl TextGenerator for GeminiProvider {
    fn name(&self) -> &'static str {
        "gemini"
    }

    #[instrument(skip(self, prompt, options), fields(model = %options.model.as_deref().unwrap_or(&self.config.default_model)))]
    async fn call_text(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<ProviderCallResult, ProviderError> {
        let requested = options
            .model
            .as_deref()
            .unwrap_or(&self.config.default_model);
        let model = normalize_model_name(requested);
        let body = GenerateContentRequest::new(prompt, options);
        let policy = RetryPolicy::new(options.retries).with_backoff(self.backoff);
        let mut attempts = Vec::new();

        if let Some(route) = self.routes.get().await {
            debug!(base_url = %route.base_url, model = %route.model, "Trying cached Gemini route");
            match self
                .try_route(&route.base_url, &route.model, &body, policy)
                .await
            {
                Ok(result) => return Ok(result),
                Err(attempt) => {
                    warn!(attempt = %attempt, "Cached Gemini route failed, rediscovering");
                    attempts.push(attempt);
                    self.routes.invalidate().await;
                }
            }
        }

        for base_url in &self.config.base_urls {
            match self.try_route(base_url, model, &body, policy).await {
                Ok(result) => {
                    self.remember(base_url, model).await;
                    return Ok(result);
                }
                Err(attempt) => {
                    debug!(attempt = %attempt, "Requested Gemini model failed");
                    attempts.push(attempt);
                }
            }

            let models = match self.list_models(base_url).await {
                Ok(models) => models,
                Err(message) => {
                    attempts.push(RouteAttempt {
                        base_url: base_url.clone(),
                        model: LIST_MODELS_ATTEMPT.to_owned(),
                        status: None,
                        message: Some(message),
                    });
                    continue;
                }
            };

            let Some(picked) = pick_model(&models, Some(requested)) else {
                debug!(base_url = %base_url, "No listed Gemini model supports generateContent");
                continue;
            };

            match self.try_route(base_url, &picked, &body, policy).await {
                Ok(result) => {
                    info!(base_url = %base_url, model = %picked, "Discovered working Gemini model");
                    self.remember(base_url, &picked).await;
                    return Ok(result);
                }
                Err(attempt) => attempts.push(attempt),
            }
        }

        Err(ProviderError::AttemptsExhausted { attempts })
    }
}

impl Debug for GeminiProvider {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("GeminiProvider")
            .field("config", &self.config)
            .field("backoff", &self.backoff)
            // Omit `client` field as HTTP clients are not useful to debug
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Response Helpers
// ============================================================================

/// Strip the `models/` prefix the listing endpoint uses
#[must_use]
pub fn normalize_model_name(name: &str) -> &str {
    name.strip_prefix(MODEL_NAME_PREFIX).unwrap_or(name)
}

fn supports_generate_content(model: &Value) -> bool {
    model
        .get("supportedGenerationMethods")
        .and_then(Value::as_array)
        .is_some_and(|methods| {
            methods
                .iter()
                .any(|m| m.as_str() == Some("generateContent"))
        })
}

fn listed_name(model: &Value) -> &str {
    normalize_model_name(model.get("name").and_then(Value::as_str).unwrap_or(""))
}

/// Choose a model from a `models` listing
#[must_use]
pub fn pick_model(models: &[Value], preferred: Option<&str>) -> Option<String> {
    if let Some(preferred) = preferred.map(normalize_model_name) {
        let hit = models.iter().find(|m| listed_name(m) == preferred);
        if hit.is_some_and(supports_generate_content) {
            return Some(preferred.to_owned());
        }
    }

    let ranked: Vec<&str> = models
        .iter()
        .filter(|m| supports_generate_content(m))
        .map(listed_name)
        .filter(|name| !name.is_empty())
        .collect();

    defaults::GEMINI_MODEL_PREFERENCE
        .iter()
        .find_map(|family| {
            ranked
                .iter()
                .find(|name| name.to_lowercase().contains(family))
        })
        .or_else(|| ranked.first())
        .map(|name| (*name).to_owned())
}

/// Text from a `generateContent` response, tolerating older payload shapes
#[must_use]
pub fn extract_text(data: &Value) -> String {
    if let Some(parts) = data.pointer("/candidates/0/content/parts").and_then(Value::as_array) {
        let text: String = parts
            .iter()
            .filter_map(|part| part.get("text").and_then(Value::as_str))
            .collect();
        if !text.is_empty() {
            return text;
        }
    }

    let alternate = ["/candidates/0/output", "/candidates/0/content", "/output", "/text"]
        .iter()
        .find_map(|pointer| data.pointer(pointer).filter(|v| !v.is_null()));
    if let Some(Value::String(text)) = alternate {
        return text.clone();
    }

    data.to_string()
}
