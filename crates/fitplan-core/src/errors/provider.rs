// ABOUTME: Structured error type for text-generation provider calls
// ABOUTME: Captures transport, vendor API, and exhausted-route failures with attempt history
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt::{Display, Formatter, Result as FmtResult};

use super::{AppError, ErrorCode};

/// One failed (endpoint, model) attempt against the primary vendor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteAttempt {
    /// Base endpoint the call was sent to
    pub base_url: String,
    /// Model identifier, or `<listModels>` for discovery failures
    pub model: String,
    /// HTTP status when a response was received
    pub status: Option<u16>,
    /// Vendor or transport message
    pub message: Option<String>,
}

impl Display for RouteAttempt {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{} :: {}", self.base_url, self.model)?;
        if let Some(status) = self.status {
            write!(f, " ({status})")?;
        }
        if let Some(message) = &self.message {
            write!(f, " - {message}")?;
        }
        Ok(())
    }
}

fn summarize(attempts: &[RouteAttempt]) -> String {
    attempts
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Errors raised while calling a text-generation backend
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// Neither the primary nor the fallback vendor has a credential
    #[error("no provider configured: set GEMINI_API_KEY or OPENAI_API_KEY")]
    NotConfigured,

    /// Transport-level failure (connect, timeout, TLS)
    #[error("{provider} request failed: {source}")]
    Http {
        /// Provider name
        provider: &'static str,
        /// Underlying transport error
        #[source]
        source: reqwest::Error,
    },

    /// Vendor answered with an error status
    #[error("{provider} API error ({status}): {message}")]
    Api {
        /// Provider name
        provider: &'static str,
        /// HTTP status code
        status: u16,
        /// Vendor message
        message: String,
    },

    /// Vendor answered 2xx with a body we cannot use
    #[error("{provider} returned an unusable response: {message}")]
    InvalidResponse {
        /// Provider name
        provider: &'static str,
        /// Description of the problem
        message: String,
    },

    /// Every primary route (cached, requested, discovered) failed
    #[error("Gemini request failed. Tried: {}", summarize(.attempts))]
    AttemptsExhausted {
        /// Attempt history in call order
        attempts: Vec<RouteAttempt>,
    },

    /// Primary vendor failed and the fallback vendor failed too
    #[error("{primary}; fallback provider also failed: {fallback}")]
    FallbackFailed {
        /// Primary vendor failure
        primary: Box<ProviderError>,
        /// Fallback vendor failure
        fallback: Box<ProviderError>,
    },
}

impl ProviderError {
    /// Whether this failure is a configuration problem rather than a call failure
    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::NotConfigured)
    }

    fn error_code(&self) -> ErrorCode {
        match self {
            Self::NotConfigured => ErrorCode::ConfigMissing,
            Self::Http { .. } => ErrorCode::ExternalServiceUnavailable,
            Self::Api { status: 429, .. } => ErrorCode::ExternalRateLimited,
            Self::Api {
                status: 401 | 403, ..
            } => ErrorCode::ExternalAuthFailed,
            Self::FallbackFailed { fallback, .. } => fallback.error_code(),
            Self::Api { .. } | Self::InvalidResponse { .. } | Self::AttemptsExhausted { .. } => {
                ErrorCode::ExternalServiceError
            }
        }
    }
}

impl From<ProviderError> for AppError {
    fn from(error: ProviderError) -> Self {
        Self::new(error.error_code(), error.to_string()).with_source(error)
    }
}
