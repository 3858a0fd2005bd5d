//! Error types for namespace and entity discovery.

use std::path::PathBuf;
use thiserror::Error;

/// Discovery-related errors
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Unknown entity filter: {0} (expected 'any', 'stub', or 'implemented')")]
    UnknownFilter(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Discovery I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for DiscoveryError {
    fn from(err: config::ConfigError) -> Self {
        DiscoveryError::Config(err.to_string())
    }
}
