//! Centralized error types for PharmaBrand.

use thiserror::Error;

use crate::package::PackageField;

/// Main error type for PharmaBrand operations.
#[derive(Error, Debug)]
pub enum BrandError {
    /// Local, pre-network, user-correctable input problem.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Network failure or non-success HTTP outcome.
    #[error("{message}")]
    Transport { status: Option<u16>, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("No project is loaded")]
    NotLoaded,

    #[error("A save is already in progress for {0}")]
    SaveInProgress(PackageField),

    #[error("{0}")]
    Export(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for PharmaBrand operations.
pub type BrandResult<T> = Result<T, BrandError>;

impl BrandError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a transport error, optionally carrying the HTTP status.
    pub fn transport(status: Option<u16>, msg: impl Into<String>) -> Self {
        Self::Transport {
            status,
            message: msg.into(),
        }
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Short text to show next to the control that failed.
    ///
    /// Transport errors surface the server message verbatim.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(msg) | Self::NotFound(msg) | Self::Export(msg) => msg.clone(),
            Self::Transport { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// HTTP status attached to the failure, if the backend answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport { status, .. } => *status,
            Self::NotFound(_) => Some(404),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_message_is_verbatim() {
        let err = BrandError::transport(Some(500), "db down");
        assert_eq!(err.user_message(), "db down");
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn test_validation_message_has_no_prefix_for_users() {
        let err = BrandError::validation("fill the form");
        assert_eq!(err.user_message(), "fill the form");
        assert_eq!(err.to_string(), "Validation error: fill the form");
    }
}
