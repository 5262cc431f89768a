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
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid bind address: {0}")]
    InvalidAddress(String),

    #[error("Log filter must not be empty")]
    EmptyLogLevel,

    #[error("Connection buffer must be at least 1")]
    InvalidConnectionBuffer,

    #[error("Maximum name length must be at least 1")]
    InvalidNameLength,

    #[error("Maximum round duration must be at least 1 second")]
    InvalidRoundDuration,
}
