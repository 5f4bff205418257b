// ABOUTME: Server binary for the fitness plan generation API
// ABOUTME: Loads environment configuration, initializes logging and serves the axum router
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![recursion_limit = "256"]

//! # Fitplan Server Binary
//!
//! Starts the HTTP API that generates workout and diet plans.

use anyhow::{Context, Result};
use clap::Parser;
use fitplan_server::{
    config::environment::ServerConfig,
    logging,
    routes::{router, AppState},
};
use tokio::net::TcpListener;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "fitplan-server")]
#[command(about = "Fitness plan generation API - LLM-backed workout and diet plans")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override bind host
    #[arg(long)]
    host: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(host) = args.host {
        config.host = host;
    }

    logging::init_from_env()?;

    info!("Starting Fitplan server");
    info!("{}", config.summary());
    if !config.llm.has_any_provider() {
        warn!("No text generation provider configured; plan requests will fail until GEMINI_API_KEY or OPENAI_API_KEY is set");
    }

    let address = format!("{}:{}", config.host, config.http_port);
    let app = router(AppState::from_config(config));

    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;

    info!("HTTP server listening on http://{address}");
    info!("  POST /api/generate-plan");
    info!("  POST /api/generate-image");
    info!("  POST /api/text-to-speech");
    info!("  GET  /health, /ready");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Fitplan server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
