// ABOUTME: Tracing subscriber setup and structured domain events for the Liftshare server
// ABOUTME: Reads log level and format from the environment and quiets noisy dependencies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Logging
//!
//! `LOG_FORMAT` selects `json`, `pretty` (default) or `compact` output.
//! `RUST_LOG` takes precedence over the configured level for the base
//! filter; dependency noise directives are always appended.

use crate::config::Environment;
use anyhow::Result;
use std::env;
use std::io;
use tracing::{info, warn};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

/// Service name used when `SERVICE_NAME` is unset
pub const SERVICE_NAME: &str = "liftshare-server";

/// Fixed directives appended to every filter
const NOISE_DIRECTIVES: [&str; 4] = ["hyper=warn", "sqlx=warn", "sqlx::query=warn", "tower_http=info"];

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// One JSON object per line
    Json,
    /// Multi-field human readable lines
    Pretty,
    /// Single-line terse output
    Compact,
}

impl LogFormat {
    /// Parse a `LOG_FORMAT` value, defaulting to pretty
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "json" => Self::Json,
            "compact" => Self::Compact,
            _ => Self::Pretty,
        }
    }
}

/// Subscriber settings
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Level for this crate and the fallback base filter
    pub level: String,
    /// Output format
    pub format: LogFormat,
    /// Emit file and line for each event
    pub include_location: bool,
    /// Emit span open and close events
    pub include_spans: bool,
    /// Reported service name
    pub service_name: String,
    /// Deployment environment
    pub environment: Environment,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: LogFormat::Pretty,
            include_location: false,
            include_spans: false,
            service_name: SERVICE_NAME.to_owned(),
            environment: Environment::Development,
        }
    }
}

impl LoggingConfig {
    /// Read settings from `RUST_LOG`, `LOG_FORMAT`, `LOG_INCLUDE_LOCATION`,
    /// `LOG_INCLUDE_SPANS`, `SERVICE_NAME` and `ENVIRONMENT`
    #[must_use]
    pub fn from_env() -> Self {
        let environment = Environment::from_str_or_default(
            &env::var("ENVIRONMENT").unwrap_or_default(),
        );

        Self {
            level: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_owned()),
            format: LogFormat::from_str_or_default(&env::var("LOG_FORMAT").unwrap_or_default()),
            // production logs always carry source locations
            include_location: environment.is_production()
                || env::var("LOG_INCLUDE_LOCATION").is_ok(),
            include_spans: env::var("LOG_INCLUDE_SPANS").is_ok(),
            service_name: env::var("SERVICE_NAME").unwrap_or_else(|_| SERVICE_NAME.to_owned()),
            environment,
        }
    }

    fn env_filter(&self) -> EnvFilter {
        let mut filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&self.level));

        let own = format!("liftshare_server={}", self.level);
        for directive in NOISE_DIRECTIVES.iter().copied().chain([own.as_str()]) {
            match directive.parse() {
                Ok(parsed) => filter = filter.add_directive(parsed),
                Err(e) => eprintln!("Ignoring log directive '{directive}': {e}"),
            }
        }
        filter
    }

    fn fmt_layer(&self) -> Box<dyn Layer<Registry> + Send + Sync> {
        let span_events = if self.include_spans {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        };

        let layer = fmt::layer()
            .with_writer(io::stdout)
            .with_file(self.include_location)
            .with_line_number(self.include_location)
            .with_span_events(span_events);

        match self.format {
            LogFormat::Json => layer.json().with_current_span(true).boxed(),
            LogFormat::Pretty => layer.with_target(true).boxed(),
            LogFormat::Compact => layer.compact().with_target(false).boxed(),
        }
    }

    /// Install the global subscriber
    ///
    /// # Errors
    ///
    /// Returns an error if a global subscriber is already installed
    pub fn init(&self) -> Result<()> {
        tracing_subscriber::registry()
            .with(self.fmt_layer())
            .with(self.env_filter())
            .try_init()?;

        info!(
            service.name = %self.service_name,
            service.version = env!("CARGO_PKG_VERSION"),
            environment = %self.environment,
            log.level = %self.level,
            log.format = ?self.format,
            log.location = self.include_location,
            "Logging initialized"
        );
        Ok(())
    }
}

/// Initialize logging from the environment
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed
pub fn init_from_env() -> Result<()> {
    LoggingConfig::from_env().init()
}

/// Structured domain events
pub struct AppLogger;

impl AppLogger {
    /// Authentication attempt outcome; failures log at warn
    pub fn log_auth_event(user_id: Option<i64>, event: &str, success: bool) {
        if success {
            info!(user.id = ?user_id, auth.event = %event, auth.success = true, "Auth event");
        } else {
            warn!(user.id = ?user_id, auth.event = %event, auth.success = false, "Auth event");
        }
    }

    /// Public workout copied into another account
    pub fn log_workout_fork(user_id: i64, source_workout_id: i64, new_workout_id: i64, links: u64) {
        info!(
            user.id = user_id,
            workout.source_id = source_workout_id,
            workout.id = new_workout_id,
            workout.links = links,
            "Public workout forked"
        );
    }

    /// Image stored on disk
    pub fn log_upload(user_id: i64, filename: &str, size: usize, content_type: &str) {
        info!(
            user.id = user_id,
            upload.filename = %filename,
            upload.size = size,
            upload.content_type = %content_type,
            "Image uploaded"
        );
    }
}
