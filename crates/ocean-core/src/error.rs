//! Centralized error types for the ocean crates.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for domain and validation failures.
#[derive(Error, Debug)]
pub enum OceanError {
    #[error("Unknown entity label: {0}")]
    UnknownLabel(String),

    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error("Source file not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for ocean operations.
pub type OceanResult<T> = Result<T, OceanError>;

impl OceanError {
    /// Create an invalid parameter error.
    pub fn invalid(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a missing parameter error.
    pub fn missing(name: impl Into<String>) -> Self {
        Self::MissingParameter(name.into())
    }

    /// Whether the error was caused by the caller rather than the system.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownLabel(_)
                | Self::MissingParameter(_)
                | Self::InvalidParameter { .. }
                | Self::NodeNotFound(_)
        )
    }
}
