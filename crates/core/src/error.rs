//! Error model shared by the request-side collaborators.

use thiserror::Error;

/// Result type used across `warden-core`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised by the web context, session and profile primitives.
///
/// Authorization outcomes are never expressed here; a deny is a plain `false`
/// at the authorizer layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A value failed validation (e.g. a blank profile identifier).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A session value could not be encoded or decoded.
    #[error("session value '{key}' could not be converted: {message}")]
    SessionValue { key: String, message: String },
}

impl CoreError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn session_value(key: impl Into<String>, err: &serde_json::Error) -> Self {
        Self::SessionValue {
            key: key.into(),
            message: err.to_string(),
        }
    }
}
