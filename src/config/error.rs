//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Host is not an IP address: {0}")]
    InvalidHost(String),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Gas limit must be non-zero")]
    InvalidGasLimit,

    #[error("Gas price must be non-zero")]
    InvalidGasPrice,

    #[error("Poll intervals must be non-zero")]
    InvalidPollInterval,

    #[error("Broadcast election bound must be non-zero")]
    InvalidBroadcastBound,
}
