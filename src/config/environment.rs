// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Reads provider credentials, endpoint overrides and server settings from env variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration management
//!
//! Missing provider credentials are not a startup error: the server starts and
//! reports the problem on each request that needs the missing backend.

use std::env;
use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

use crate::constants::{defaults, env_config};
use crate::errors::{AppError, AppResult};

/// Environment type for logging and diagnostics
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Text-generation provider settings
#[derive(Clone, Default)]
pub struct LlmConfig {
    /// Gemini API key; absent routes every call to the fallback vendor
    pub gemini_api_key: Option<String>,
    /// Gemini model requested first
    pub gemini_model: String,
    /// Single Gemini base endpoint replacing the built-in candidates
    pub gemini_base_url: Option<String>,
    /// `OpenAI`-compatible API key
    pub openai_api_key: Option<String>,
    /// `OpenAI`-compatible chat completions URL
    pub openai_api_url: String,
    /// `OpenAI`-compatible model
    pub openai_model: String,
}

impl LlmConfig {
    /// Build from an arbitrary variable lookup
    #[must_use]
    pub fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Self {
        Self {
            gemini_api_key: non_empty(lookup, env_config::GEMINI_API_KEY),
            gemini_model: non_empty(lookup, env_config::GEMINI_MODEL)
                .unwrap_or_else(|| defaults::GEMINI_MODEL.to_owned()),
            gemini_base_url: non_empty(lookup, env_config::GEMINI_API_URL),
            openai_api_key: non_empty(lookup, env_config::OPENAI_API_KEY),
            openai_api_url: non_empty(lookup, env_config::OPENAI_API_URL)
                .unwrap_or_else(|| defaults::OPENAI_API_URL.to_owned()),
            openai_model: non_empty(lookup, env_config::OPENAI_MODEL)
                .unwrap_or_else(|| defaults::OPENAI_MODEL.to_owned()),
        }
    }

    /// Whether at least one text-generation vendor has a credential
    #[must_use]
    pub const fn has_any_provider(&self) -> bool {
        self.gemini_api_key.is_some() || self.openai_api_key.is_some()
    }
}

impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("LlmConfig")
            .field("gemini_api_key", &redact(self.gemini_api_key.as_ref()))
            .field("gemini_model", &self.gemini_model)
            .field("gemini_base_url", &self.gemini_base_url)
            .field("openai_api_key", &redact(self.openai_api_key.as_ref()))
            .field("openai_api_url", &self.openai_api_url)
            .field("openai_model", &self.openai_model)
            .finish()
    }
}

/// Image generation and text-to-speech vendor settings
#[derive(Clone, Default)]
pub struct MediaConfig {
    /// Replicate API token
    pub replicate_api_token: Option<String>,
    /// Replicate model version; required together with the token
    pub replicate_model_version: Option<String>,
    /// Replicate API base
    pub replicate_api_url: String,
    /// `OpenAI` key for the Images fallback
    pub openai_api_key: Option<String>,
    /// `OpenAI` Images endpoint
    pub openai_images_url: String,
    /// `ElevenLabs` API key
    pub elevenlabs_api_key: Option<String>,
    /// Voice used when the request names none
    pub elevenlabs_voice_id: String,
    /// `ElevenLabs` API base
    pub elevenlabs_api_url: String,
}

impl MediaConfig {
    /// Build from an arbitrary variable lookup
    #[must_use]
    pub fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Self {
        Self {
            replicate_api_token: non_empty(lookup, env_config::REPLICATE_API_TOKEN),
            replicate_model_version: non_empty(lookup, env_config::REPLICATE_MODEL_VERSION),
            replicate_api_url: non_empty(lookup, env_config::REPLICATE_API_URL)
                .unwrap_or_else(|| defaults::REPLICATE_API_URL.to_owned()),
            openai_api_key: non_empty(lookup, env_config::OPENAI_API_KEY),
            openai_images_url: non_empty(lookup, env_config::OPENAI_IMAGES_URL)
                .unwrap_or_else(|| defaults::OPENAI_IMAGES_URL.to_owned()),
            elevenlabs_api_key: non_empty(lookup, env_config::ELEVENLABS_API_KEY),
            elevenlabs_voice_id: non_empty(lookup, env_config::ELEVENLABS_VOICE_ID)
                .unwrap_or_else(|| defaults::ELEVENLABS_VOICE_ID.to_owned()),
            elevenlabs_api_url: non_empty(lookup, env_config::ELEVENLABS_API_URL)
                .unwrap_or_else(|| defaults::ELEVENLABS_API_URL.to_owned()),
        }
    }
}

impl std::fmt::Debug for MediaConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("MediaConfig")
            .field("replicate_api_token", &redact(self.replicate_api_token.as_ref()))
            .field("replicate_model_version", &self.replicate_model_version)
            .field("replicate_api_url", &self.replicate_api_url)
            .field("openai_api_key", &redact(self.openai_api_key.as_ref()))
            .field("openai_images_url", &self.openai_images_url)
            .field("elevenlabs_api_key", &redact(self.elevenlabs_api_key.as_ref()))
            .field("elevenlabs_voice_id", &self.elevenlabs_voice_id)
            .field("elevenlabs_api_url", &self.elevenlabs_api_url)
            .finish()
    }
}

/// Complete server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP listen port
    pub http_port: u16,
    /// HTTP bind host
    pub host: String,
    /// Deployment environment
    pub environment: Environment,
    /// Return parsed request bodies instead of generating plans
    pub debug_echo: bool,
    /// Browser origins allowed by CORS (`*` or a comma-separated list)
    pub cors_allowed_origins: String,
    /// Text-generation providers
    pub llm: LlmConfig,
    /// Media proxies
    pub media: MediaConfig,
}

impl ServerConfig {
    /// Load configuration from process environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if `HTTP_PORT` is set but is not a valid port number.
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(&|name| env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable lookup
    ///
    /// # Errors
    ///
    /// Returns an error if `HTTP_PORT` is set but is not a valid port number.
    pub fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let http_port = match non_empty(lookup, env_config::HTTP_PORT) {
            Some(raw) => raw.parse::<u16>().map_err(|e| {
                AppError::config(format!("Invalid {} value '{raw}': {e}", env_config::HTTP_PORT))
            })?,
            None => defaults::HTTP_PORT,
        };

        Ok(Self {
            http_port,
            host: non_empty(lookup, env_config::HOST).unwrap_or_else(|| defaults::HOST.to_owned()),
            environment: non_empty(lookup, env_config::ENVIRONMENT)
                .map(|s| Environment::from_str_or_default(&s))
                .unwrap_or_default(),
            debug_echo: non_empty(lookup, env_config::DEBUG_ECHO)
                .is_some_and(|v| v.eq_ignore_ascii_case("true")),
            cors_allowed_origins: non_empty(lookup, env_config::CORS_ALLOWED_ORIGINS)
                .unwrap_or_else(|| defaults::CORS_ALLOWED_ORIGINS.to_owned()),
            llm: LlmConfig::from_lookup(lookup),
            media: MediaConfig::from_lookup(lookup),
        })
    }

    /// One-line summary for startup logs (never includes secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        let primary = if self.llm.gemini_api_key.is_some() {
            format!("gemini ({})", self.llm.gemini_model)
        } else {
            "none".to_owned()
        };
        let fallback = if self.llm.openai_api_key.is_some() {
            format!("openai-compatible ({})", self.llm.openai_model)
        } else {
            "none".to_owned()
        };
        let images = match (
            &self.media.replicate_api_token,
            &self.media.replicate_model_version,
            &self.media.openai_api_key,
        ) {
            (Some(_), Some(_), _) => "replicate",
            (_, _, Some(_)) => "openai",
            _ => "none",
        };
        let speech = if self.media.elevenlabs_api_key.is_some() {
            "elevenlabs"
        } else {
            "none"
        };

        format!(
            "Fitplan server configuration: environment={}, http={}:{}, llm.primary={primary}, \
             llm.fallback={fallback}, images={images}, speech={speech}, debug_echo={}",
            self.environment, self.host, self.http_port, self.debug_echo
        )
    }
}

fn non_empty(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<String> {
    lookup(name)
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

const fn redact(secret: Option<&String>) -> &'static str {
    if secret.is_some() {
        "[REDACTED]"
    } else {
        "<unset>"
    }
}
