// ABOUTME: Main library entry point for the fitness plan generation service
// ABOUTME: LLM-backed workout and diet plans with tolerant parsing and single-shot repair
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![recursion_limit = "256"]
#![deny(unsafe_code)]

//! # Fitplan Server
//!
//! An HTTP service that turns a user's fitness profile into a structured
//! workout and diet plan by prompting a large language model, then recovers a
//! schema-conformant plan from whatever text the model returns.
//!
//! ## Pipeline
//!
//! 1. **Schema validation** of the incoming profile ([`schema`])
//! 2. **Prompt construction** with a literal response schema ([`llm::prompts`])
//! 3. **Provider call** through Gemini with model discovery, falling back to an
//!    `OpenAI`-compatible endpoint ([`llm`])
//! 4. **JSON recovery** from prose or code-fenced output ([`plan::extract_json`])
//! 5. **Classification**: strict success, heuristic acceptance, or one repair
//!    re-prompt before a terminal verdict ([`plan::PlanGenerator`])
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use fitplan_server::config::environment::ServerConfig;
//! use fitplan_server::errors::AppResult;
//!
//! fn main() -> AppResult<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("Fitplan server configured with port: HTTP={}", config.http_port);
//!     Ok(())
//! }
//! ```

/// Environment-driven configuration
pub mod config;

/// Application constants and configuration values
pub mod constants;

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Image generation and text-to-speech vendor proxies
pub mod external;

/// Text-generation provider abstraction (Gemini, `OpenAI`-compatible)
pub mod llm;

/// Structured logging setup
pub mod logging;

/// Profile and plan data models
pub mod models;

/// Plan recovery pipeline: extraction, classification and repair
pub mod plan;

/// HTTP routes
pub mod routes;

/// Declarative shape validation for profiles and plans
pub mod schema;

/// Shared utilities
pub mod utils;

/// HTTP middleware (CORS)
pub mod middleware;
