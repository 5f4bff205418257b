// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Environment variable names, vendor defaults, generation parameters and timeouts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped into logical domains rather than being in a single large file.

/// Environment variable names read by the configuration layer
pub mod env_config {
    /// HTTP listen port
    pub const HTTP_PORT: &str = "HTTP_PORT";
    /// HTTP bind host
    pub const HOST: &str = "HOST";
    /// Deployment environment (development, production, testing)
    pub const ENVIRONMENT: &str = "ENVIRONMENT";
    /// Echo parsed request bodies instead of generating plans
    pub const DEBUG_ECHO: &str = "DEBUG_ECHO";
    /// Comma-separated browser origins allowed by CORS, or `*`
    pub const CORS_ALLOWED_ORIGINS: &str = "CORS_ALLOWED_ORIGINS";

    /// Primary vendor credential
    pub const GEMINI_API_KEY: &str = "GEMINI_API_KEY";
    /// Primary vendor model override
    pub const GEMINI_MODEL: &str = "GEMINI_MODEL";
    /// Primary vendor base endpoint override
    pub const GEMINI_API_URL: &str = "GEMINI_API_URL";

    /// Secondary vendor credential (also used for image generation)
    pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
    /// Secondary vendor chat completions endpoint override
    pub const OPENAI_API_URL: &str = "OPENAI_API_URL";
    /// Secondary vendor model override
    pub const OPENAI_MODEL: &str = "OPENAI_MODEL";

    /// Replicate API token
    pub const REPLICATE_API_TOKEN: &str = "REPLICATE_API_TOKEN";
    /// Replicate model version to run
    pub const REPLICATE_MODEL_VERSION: &str = "REPLICATE_MODEL_VERSION";
    /// Replicate API base override
    pub const REPLICATE_API_URL: &str = "REPLICATE_API_URL";
    /// `OpenAI` Images endpoint override
    pub const OPENAI_IMAGES_URL: &str = "OPENAI_IMAGES_URL";

    /// `ElevenLabs` API key
    pub const ELEVENLABS_API_KEY: &str = "ELEVENLABS_API_KEY";
    /// `ElevenLabs` default voice
    pub const ELEVENLABS_VOICE_ID: &str = "ELEVENLABS_VOICE_ID";
    /// `ElevenLabs` API base override
    pub const ELEVENLABS_API_URL: &str = "ELEVENLABS_API_URL";
}

/// Default values applied when configuration is absent
pub mod defaults {
    /// Default HTTP port
    pub const HTTP_PORT: u16 = 8081;
    /// Default bind host
    pub const HOST: &str = "127.0.0.1";
    /// Default CORS origins
    pub const CORS_ALLOWED_ORIGINS: &str = "*";

    /// Default Gemini model
    pub const GEMINI_MODEL: &str = "gemini-1.5-flash-latest";
    /// Gemini base endpoints tried in order when no override is set
    pub const GEMINI_BASE_URLS: &[&str] = &[
        "https://generativelanguage.googleapis.com/v1",
        "https://generativelanguage.googleapis.com/v1beta",
    ];
    /// Discovery preference, most capable fast family first
    pub const GEMINI_MODEL_PREFERENCE: &[&str] =
        &["gemini-1.5-flash", "gemini-1.5-pro", "gemini"];
    /// Gemini temperature when the caller does not set one
    pub const GEMINI_TEMPERATURE: f32 = 0.2;
    /// Gemini output token ceiling when the caller does not set one
    pub const GEMINI_MAX_OUTPUT_TOKENS: u32 = 1024;

    /// `OpenAI`-compatible chat completions endpoint
    pub const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";
    /// `OpenAI`-compatible default model
    pub const OPENAI_MODEL: &str = "gpt-4o-mini";
    /// `OpenAI`-compatible temperature when the caller does not set one
    pub const OPENAI_TEMPERATURE: f32 = 0.2;
    /// `OpenAI`-compatible token ceiling when the caller does not set one
    pub const OPENAI_MAX_TOKENS: u32 = 1200;

    /// Replicate API base
    pub const REPLICATE_API_URL: &str = "https://api.replicate.com/v1";
    /// `OpenAI` Images endpoint
    pub const OPENAI_IMAGES_URL: &str = "https://api.openai.com/v1/images/generations";
    /// Image size when the caller does not set one
    pub const IMAGE_SIZE: &str = "512x512";

    /// `ElevenLabs` API base
    pub const ELEVENLABS_API_URL: &str = "https://api.elevenlabs.io/v1";
    /// `ElevenLabs` voice when neither caller nor environment sets one
    pub const ELEVENLABS_VOICE_ID: &str = "21m00Tcm4TlvDq8ikWAM";
    /// Audio content type when the vendor omits one
    pub const AUDIO_CONTENT_TYPE: &str = "audio/mpeg";
}

/// Sampling parameters for the two passes of plan generation
pub mod generation {
    /// First pass temperature
    pub const PLAN_TEMPERATURE: f32 = 0.2;
    /// First pass output token ceiling
    pub const PLAN_MAX_TOKENS: u32 = 2500;
    /// First pass retry budget
    pub const PLAN_RETRIES: u32 = 2;

    /// Repair pass temperature
    pub const REPAIR_TEMPERATURE: f32 = 0.0;
    /// Repair pass output token ceiling
    pub const REPAIR_MAX_TOKENS: u32 = 2000;
    /// Repair pass retry budget
    pub const REPAIR_RETRIES: u32 = 1;
}

/// Retry and timeout settings for outbound HTTP calls
pub mod network {
    /// Extra attempts per network call when the caller does not set a budget
    pub const DEFAULT_RETRIES: u32 = 1;
    /// Fixed delay between attempts
    pub const RETRY_BACKOFF_MS: u64 = 500;
    /// Connection timeout for vendor APIs
    pub const CONNECT_TIMEOUT_SECS: u64 = 10;
    /// Request timeout for vendor APIs (generation can be slow)
    pub const REQUEST_TIMEOUT_SECS: u64 = 120;
    /// Replicate status polls before giving up
    pub const IMAGE_POLL_ATTEMPTS: u32 = 30;
    /// Delay between Replicate status polls
    pub const IMAGE_POLL_INTERVAL_MS: u64 = 1500;
}

/// Diagnostic truncation limits
pub mod limits {
    /// Characters of a rejected request body echoed back to the client
    pub const REJECTED_BODY_PREVIEW_CHARS: usize = 200;
    /// Characters of an incoming request body written to debug logs
    pub const LOGGED_BODY_PREVIEW_CHARS: usize = 2000;
    /// Characters of a non-JSON vendor body quoted in errors
    pub const VENDOR_BODY_PREVIEW_CHARS: usize = 300;
}

/// Service identity used in structured logs
pub mod service_names {
    /// Service name
    pub const FITPLAN_SERVER: &str = "fitplan-server";
}
