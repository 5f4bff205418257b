// ABOUTME: Logging configuration and structured logging setup for observability and debugging
// ABOUTME: Chooses the tracing output format and quiets HTTP client noise around vendor calls
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Structured logging built on `tracing-subscriber`
//!
//! Settings are read from `RUST_LOG`, `LOG_FORMAT`, `LOG_INCLUDE_LOCATION`,
//! `LOG_INCLUDE_THREAD`, `LOG_INCLUDE_SPANS` and `ENVIRONMENT`. Production
//! always records source locations and thread ids.

use std::env;
use std::io;

use anyhow::{anyhow, Result};
use tracing::info;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    registry::Registry,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

use crate::config::Environment;
use crate::constants::service_names;

/// Dependencies that log every request at debug level
const NOISY_TARGETS: &[&str] = &["hyper=warn", "hyper_util=warn", "reqwest=warn", "h2=warn"];

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Log output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// One JSON object per line
    Json,
    /// Multi-line human output
    #[default]
    Pretty,
    /// Single-line human output
    Compact,
}

impl LogFormat {
    /// Parse the `LOG_FORMAT` value, falling back to pretty output
    #[must_use]
    pub fn from_str_or_default(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "json" => Self::Json,
            "compact" => Self::Compact,
            _ => Self::Pretty,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct LoggingConfig {
    /// Default directive when `RUST_LOG` is unset
    pub level: String,
    /// Output format
    pub format: LogFormat,
    /// Include source file and line numbers
    pub include_location: bool,
    /// Include thread ids and names
    pub include_thread: bool,
    /// Emit span open/close events
    pub include_spans: bool,
    /// Service name attached to the startup event
    pub service_name: String,
    /// Deployment environment
    pub environment: Environment,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: LogFormat::default(),
            include_location: false,
            include_thread: false,
            include_spans: false,
            service_name: service_names::FITPLAN_SERVER.into(),
            environment: Environment::default(),
        }
    }
}

impl LoggingConfig {
    /// Read logging settings from the process environment
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(&|name| env::var(name).ok())
    }

    /// Read logging settings from an arbitrary variable lookup
    #[must_use]
    pub fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Self {
        let environment =
            Environment::from_str_or_default(lookup("ENVIRONMENT").as_deref().unwrap_or_default());
        let production = environment.is_production();
        let flag = |name: &str| lookup(name).is_some();

        Self {
            level: lookup("RUST_LOG").unwrap_or_else(|| "info".into()),
            format: LogFormat::from_str_or_default(lookup("LOG_FORMAT").as_deref().unwrap_or_default()),
            include_location: production || flag("LOG_INCLUDE_LOCATION"),
            include_thread: production || flag("LOG_INCLUDE_THREAD"),
            include_spans: flag("LOG_INCLUDE_SPANS"),
            service_name: service_names::FITPLAN_SERVER.into(),
            environment,
        }
    }

    fn env_filter(&self) -> EnvFilter {
        let mut filter = EnvFilter::new(&self.level);
        for directive in NOISY_TARGETS.iter().chain(&["tower_http=info"]) {
            if let Ok(directive) = directive.parse() {
                filter = filter.add_directive(directive);
            }
        }
        filter
    }

    fn fmt_layer(&self) -> BoxedLayer {
        let span_events = if self.include_spans {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        };
        let layer = fmt::layer()
            .with_writer(io::stdout)
            .with_file(self.include_location)
            .with_line_number(self.include_location)
            .with_thread_ids(self.include_thread)
            .with_thread_names(self.include_thread)
            .with_span_events(span_events);

        match self.format {
            LogFormat::Json => layer.json().boxed(),
            LogFormat::Pretty => layer.boxed(),
            LogFormat::Compact => layer.compact().with_target(false).boxed(),
        }
    }

    /// Install the global tracing subscriber
    ///
    /// # Errors
    ///
    /// Returns an error if a global subscriber is already installed
    pub fn init(&self) -> Result<()> {
        tracing_subscriber::registry()
            .with(self.fmt_layer())
            .with(self.env_filter())
            .try_init()
            .map_err(|e| anyhow!("Failed to install tracing subscriber: {e}"))?;

        info!(
            service.name = %self.service_name,
            service.version = env!("CARGO_PKG_VERSION"),
            environment = %self.environment,
            log.level = %self.level,
            log.format = ?self.format,
            "Logging configured"
        );
        Ok(())
    }
}

/// Initialize logging from the process environment
///
/// # Errors
///
/// Returns an error if logging initialization fails
pub fn init_from_env() -> Result<()> {
    LoggingConfig::from_env().init()
}
