// ABOUTME: Re-exports the unified error types from the core crate
// ABOUTME: Keeps `crate::errors::*` paths stable for routes, providers and tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use fitplan_core::errors::{
    AppError, AppResult, ErrorCode, ErrorResponse, ProviderError, RouteAttempt,
};
