//! Logging System
//!
//! Structured logging implementation using the `tracing` crate. Provides
//! configurable log levels and output formats for the discovery library's
//! diagnostics.

use crate::error::DiscoveryError;
use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error, off
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: json, text (default: text)
    #[serde(default = "default_format")]
    pub format: String,

    /// Enable colored output (text format only)
    #[serde(default = "default_true")]
    pub color: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_format(),
            color: default_true(),
        }
    }
}

/// Initialize the logging system
///
/// Priority order (highest to lowest):
/// 1. Environment variables (GRAFT_LOG, GRAFT_LOG_FORMAT)
/// 2. Configuration file
/// 3. Defaults
pub fn init_logging(config: Option<&LoggingConfig>) -> Result<(), DiscoveryError> {
    let filter = build_env_filter(config);
    let format = determine_format(config)?;
    let use_color = config.map(|c| c.color).unwrap_or(true);

    let base_subscriber = Registry::default().with(filter);

    if format == "json" {
        base_subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(std::io::stdout),
            )
            .init();
    } else {
        base_subscriber
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_ansi(use_color)
                    .with_writer(std::io::stdout),
            )
            .init();
    }

    Ok(())
}

/// Build environment filter from config or the GRAFT_LOG environment variable
fn build_env_filter(config: Option<&LoggingConfig>) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_env("GRAFT_LOG") {
        return filter;
    }

    let level = config.map(|c| c.level.as_str()).unwrap_or("info");
    EnvFilter::new(level)
}

/// Determine output format from config or environment
fn determine_format(config: Option<&LoggingConfig>) -> Result<String, DiscoveryError> {
    if let Ok(format) = std::env::var("GRAFT_LOG_FORMAT") {
        if format == "json" || format == "text" {
            return Ok(format);
        }
    }

    let format = config.map(|c| c.format.as_str()).unwrap_or("text");

    if format != "json" && format != "text" {
        return Err(DiscoveryError::Config(format!(
            "Invalid log format: {} (must be 'json' or 'text')",
            format
        )));
    }

    Ok(format.to_string())
}
