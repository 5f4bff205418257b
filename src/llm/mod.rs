// ABOUTME: Text-generation provider abstraction over Gemini and OpenAI-compatible APIs
// ABOUTME: Defines the prompt-in/text-out contract, call options and the shared result type
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Text Generation Providers
//!
//! Every backend implements [`TextGenerator`]: one prompt goes in, the model's
//! text and the raw vendor payload come out. Vendor differences (request
//! shape, authentication, model discovery) stay inside the adapters.
//!
//! - [`GeminiProvider`]: Google Generative Language API with endpoint and
//!   model discovery, remembering the last working route in a [`RouteCache`]
//! - [`OpenAiCompatibleProvider`]: chat completions with bearer auth
//! - [`ProviderChain`]: primary plus fallback, chosen by credential presence
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use fitplan_server::config::LlmConfig;
//! use fitplan_server::llm::{GenerationOptions, ProviderChain, RouteCache, TextGenerator};
//!
//! # async fn example(config: &LlmConfig) -> Result<(), fitplan_server::errors::ProviderError> {
//! let chain = ProviderChain::from_config(config, Arc::new(RouteCache::new()));
//! let result = chain
//!     .call_text("Say hello as JSON", &GenerationOptions::default().with_temperature(0.0))
//!     .await?;
//! println!("{}", result.text);
//! # Ok(())
//! # }
//! ```

mod gemini;
mod openai_compatible;
pub mod prompts;
mod provider;
mod retry;
mod route_cache;

pub use gemini::{GeminiConfig, GeminiProvider};
pub use openai_compatible::{OpenAiCompatibleConfig, OpenAiCompatibleProvider};
pub use provider::ProviderChain;
pub use retry::{send_with_retry, RetryPolicy};
pub use route_cache::{GeminiRoute, RouteCache};

use async_trait::async_trait;
use serde_json::Value;

use crate::constants::network;
use crate::errors::ProviderError;

// ============================================================================
// Call Options
// ============================================================================

/// Per-call sampling and retry settings
///
/// Unset fields fall back to each vendor's own defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationOptions {
    /// Model override
    pub model: Option<String>,
    /// Sampling temperature
    pub temperature: Option<f32>,
    /// Output token ceiling
    pub max_tokens: Option<u32>,
    /// Extra attempts per network call
    pub retries: u32,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            model: None,
            temperature: None,
            max_tokens: None,
            retries: network::DEFAULT_RETRIES,
        }
    }
}

impl GenerationOptions {
    /// Set the model override
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the sampling temperature
    #[must_use]
    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the output token ceiling
    #[must_use]
    pub const fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Set the retry budget
    #[must_use]
    pub const fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }
}

// ============================================================================
// Call Result
// ============================================================================

/// Model text plus the vendor payload it came from
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderCallResult {
    /// Generated text
    pub text: String,
    /// Full vendor response body
    pub raw: Value,
}

// ============================================================================
// Provider Trait
// ============================================================================

/// A backend that turns a prompt into text
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Short provider name for logs
    fn name(&self) -> &'static str;

    /// Send `prompt` and return the generated text
    ///
    /// # Errors
    ///
    /// Returns a [`ProviderError`] when the backend is not configured, cannot
    /// be reached, or answers with an error.
    async fn call_text(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<ProviderCallResult, ProviderError>;
}

/// Vendor error message from a JSON error body (`error.message`, then `message`)
pub(crate) fn vendor_error_message(body: &Value) -> Option<String> {
    body.pointer("/error/message")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .or_else(|| body.get("message").and_then(Value::as_str).filter(|m| !m.is_empty()))
        .map(str::to_owned)
}
