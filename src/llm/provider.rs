// ABOUTME: Provider chain selecting Gemini first and an OpenAI-compatible fallback
// ABOUTME: Chooses backends by credential presence and surfaces both failures when both fail
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Provider Chain
//!
//! | Gemini key | `OpenAI` key | Behavior |
//! |---|---|---|
//! | set | set | Gemini, then `OpenAI` if every Gemini route fails |
//! | set | unset | Gemini only |
//! | unset | set | `OpenAI` only |
//! | unset | unset | [`ProviderError::NotConfigured`] without any network call |

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use super::{
    GeminiConfig, GeminiProvider, GenerationOptions, OpenAiCompatibleConfig,
    OpenAiCompatibleProvider, ProviderCallResult, RouteCache, TextGenerator,
};
use crate::config::LlmConfig;
use crate::errors::ProviderError;

/// Primary generator with an optional fallback
#[derive(Clone, Default)]
pub struct ProviderChain {
    primary: Option<Arc<dyn TextGenerator>>,
    fallback: Option<Arc<dyn TextGenerator>>,
}

impl ProviderChain {
    /// Build a chain from explicit generators
    #[must_use]
    pub fn new(
        primary: Option<Arc<dyn TextGenerator>>,
        fallback: Option<Arc<dyn TextGenerator>>,
    ) -> Self {
        Self { primary, fallback }
    }

    /// Build the Gemini/`OpenAI` chain from configuration
    ///
    /// `routes` is the process-wide Gemini route cache.
    #[must_use]
    pub fn from_config(config: &LlmConfig, routes: Arc<RouteCache>) -> Self {
        let primary = GeminiConfig::from_llm_config(config).map(|gemini| {
            Arc::new(GeminiProvider::new(gemini, routes)) as Arc<dyn TextGenerator>
        });
        let fallback = OpenAiCompatibleConfig::from_llm_config(config).map(|openai| {
            Arc::new(OpenAiCompatibleProvider::new(openai)) as Arc<dyn TextGenerator>
        });

        info!(
            primary = primary.as_ref().map_or("none", |p| p.name()),
            fallback = fallback.as_ref().map_or("none", |p| p.name()),
            "Text generation providers configured"
        );

        Self { primary, fallback }
    }

    /// Whether any backend is available
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.primary.is_some() || self.fallback.is_some()
    }
}

#[async_trait]
impl TextGenerator for ProviderChain {
    fn name(&self) -> &'static str {
        self.primary
            .as_ref()
            .or(self.fallback.as_ref())
            .map_or("none", |p| p.name())
    }

    async fn call_text(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<ProviderCallResult, ProviderError> {
        let Some(primary) = &self.primary else {
            return match &self.fallback {
                Some(fallback) => fallback.call_text(prompt, options).await,
                None => Err(ProviderError::NotConfigured),
            };
        };

        let primary_error = match primary.call_text(prompt, options).await {
            Ok(result) => return Ok(result),
            Err(e) => e,
        };

        let Some(fallback) = &self.fallback else {
            return Err(primary_error);
        };

        warn!(
            primary = primary.name(),
            fallback = fallback.name(),
            error = %primary_error,
            "Primary provider failed, trying fallback"
        );

        fallback
            .call_text(prompt, options)
            .await
            .map_err(|fallback_error| ProviderError::FallbackFailed {
                primary: Box::new(primary_error),
                fallback: Box::new(fallback_error),
            })
    }
}

impl fmt::Debug for ProviderChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderChain")
            .field("primary", &self.primary.as_ref().map(|p| p.name()))
            .field("fallback", &self.fallback.as_ref().map(|p| p.name()))
            .finish()
    }
}
