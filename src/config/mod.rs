// ABOUTME: Configuration module root
// ABOUTME: Environment-only configuration for the HTTP server, LLM providers and media proxies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Environment-based configuration management
pub mod environment;

pub use environment::{Environment, LlmConfig, MediaConfig, ServerConfig};
