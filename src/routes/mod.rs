// ABOUTME: Route module organization for the fitplan HTTP endpoints
// ABOUTME: Shared application state and the assembled router with tracing and CORS layers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Route module for the fitplan server
//!
//! Each domain module contains only route definitions and thin handlers that
//! delegate to the plan pipeline or the media proxies.

/// Health check routes
pub mod health;
/// Image generation and text-to-speech routes
pub mod media;
/// Plan generation routes
pub mod plans;

pub use health::HealthRoutes;
pub use media::MediaRoutes;
pub use plans::PlanRoutes;

use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::external::{ImageGenerator, SpeechSynthesizer};
use crate::llm::{ProviderChain, RouteCache, TextGenerator};
use crate::middleware::setup_cors;
use crate::plan::PlanGenerator;

/// Dependencies shared by all handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Server configuration
    pub config: Arc<ServerConfig>,
    /// Plan recovery pipeline
    pub plans: PlanGenerator,
    /// Image generation proxy
    pub images: ImageGenerator,
    /// Text-to-speech proxy
    pub speech: SpeechSynthesizer,
}

impl AppState {
    /// Assemble state around an explicit text generator
    #[must_use]
    pub fn new(config: ServerConfig, generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            plans: PlanGenerator::new(generator),
            images: ImageGenerator::new(config.media.clone()),
            speech: SpeechSynthesizer::new(config.media.clone()),
            config: Arc::new(config),
        }
    }

    /// Assemble state with the configured provider chain
    #[must_use]
    pub fn from_config(config: ServerConfig) -> Self {
        let chain = ProviderChain::from_config(&config.llm, Arc::new(RouteCache::new()));
        Self::new(config, Arc::new(chain))
    }
}

/// Build the complete router
pub fn router(state: AppState) -> Router {
    let cors = setup_cors(&state.config);

    Router::new()
        .merge(HealthRoutes::routes())
        .merge(PlanRoutes::routes(state.clone()))
        .merge(MediaRoutes::routes(state))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
