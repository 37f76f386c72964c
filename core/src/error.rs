//! Startup error types.
//!
//! Request-level errors belong to the service crates; these only cover what
//! can go wrong before the first request is accepted.

use thiserror::Error;

/// A configuration value was present but unusable.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a port number in 0..=65535, got {value:?}")]
    InvalidPort { var: String, value: String },
}

/// Errors returned from a service's `main`.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
