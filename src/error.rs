// file: src/error.rs
// version: 1.0.0
// guid: 3f8a1c29-74b0-4d6e-9a12-c5e807f1b2d4

use thiserror::Error;

/// Result type alias for the application
pub type Result<T> = std::result::Result<T, GcliError>;

/// Error types for gcli
#[derive(Error, Debug)]
pub enum GcliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("GitHub API error: {0}")]
    GithubApi(String),

    #[error("Git error: {0}")]
    Git(String),

    #[error("Model error: {0}")]
    Model(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{0}")]
    Cancelled(String),
}

impl GcliError {
    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new authentication error
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Auth(msg.into())
    }

    /// Create a new GitHub API error
    pub fn github_api(msg: impl Into<String>) -> Self {
        Self::GithubApi(msg.into())
    }

    /// Create a new git error
    pub fn git(msg: impl Into<String>) -> Self {
        Self::Git(msg.into())
    }

    /// Create a new model error
    pub fn model(msg: impl Into<String>) -> Self {
        Self::Model(msg.into())
    }

    /// Create a new invalid argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Create a new cancellation error
    pub fn cancelled(msg: impl Into<String>) -> Self {
        Self::Cancelled(msg.into())
    }
}
