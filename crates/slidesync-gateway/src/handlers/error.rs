//! Handler error types

use thiserror::Error;

/// Handler error type.
///
/// These never terminate a connection or reach other rooms: the socket loop
/// logs the error and drops the offending event.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// Payload failed validation for its event
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// Event that requires a payload arrived without one
    #[error("Missing payload")]
    MissingPayload,

    /// Internal error (e.g. the outbound channel went away mid-handle)
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Handler result type
pub type HandlerResult<T> = Result<T, HandlerError>;
