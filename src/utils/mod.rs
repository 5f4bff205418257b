// ABOUTME: Shared utility modules
// ABOUTME: Pooled outbound HTTP client and small text helpers for diagnostics
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Shared outbound HTTP client with timeouts
pub mod http_client;

/// First `limit` characters of `text`, for log lines and error previews
#[must_use]
pub fn truncate_chars(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}
