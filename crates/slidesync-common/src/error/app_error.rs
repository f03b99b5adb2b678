//! Application error types
//!
//! Startup and serve failures for the gateway process. The realtime layer
//! itself has no user-visible error surface — per-event faults are logged
//! and dropped at the handler boundary — so this type only covers what can
//! go wrong before and around serving.

use crate::config::ConfigError;
use thiserror::Error;

/// Application-wide error type
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Listener/serve errors
    #[error("Server error: {0}")]
    Server(String),
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

/// Application result type
pub type AppResult<T> = Result<T, AppError>;
