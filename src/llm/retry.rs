// ABOUTME: Bounded retry wrapper for outbound vendor requests
// ABOUTME: Retries transport failures and non-2xx answers with a fixed backoff
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::time::Duration;

use reqwest::{RequestBuilder, Response};
use tokio::time::sleep;
use tracing::debug;

use crate::constants::network;

/// Retry budget and delay for one logical request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Extra attempts after the first
    pub retries: u32,
    /// Fixed delay between attempts
    pub backoff: Duration,
}

impl RetryPolicy {
    /// Policy with the default fixed backoff
    #[must_use]
    pub const fn new(retries: u32) -> Self {
        Self {
            retries,
            backoff: Duration::from_millis(network::RETRY_BACKOFF_MS),
        }
    }

    /// Override the delay between attempts
    #[must_use]
    pub const fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(network::DEFAULT_RETRIES)
    }
}

/// Send the request built by `build`, retrying up to `policy.retries` times
///
/// A non-2xx response is retried but still returned once the budget is
/// spent, so callers can read the vendor's error body.
///
/// # Errors
///
/// Returns the transport error of the final attempt when it produced no
/// response at all.
pub async fn send_with_retry<F>(build: F, policy: RetryPolicy) -> Result<Response, reqwest::Error>
where
    F: Fn() -> RequestBuilder + Send + Sync,
{
    let mut attempt = 0;
    loop {
        let outcome = build().send().await;
        let retryable = match &outcome {
            Ok(response) => !response.status().is_success(),
            Err(_) => true,
        };
        if !retryable || attempt >= policy.retries {
            return outcome;
        }

        attempt += 1;
        match &outcome {
            Ok(response) => debug!(status = %response.status(), attempt, "Retrying vendor request"),
            Err(e) => debug!(error = %e, attempt, "Retrying vendor request after transport error"),
        }
        sleep(policy.backoff).await;
    }
}
