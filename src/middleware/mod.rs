// ABOUTME: HTTP middleware configuration shared by all routes
// ABOUTME: CORS policy for browser clients
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// CORS configuration
pub mod cors;

pub use cors::setup_cors;
