use thiserror::Error;

/// Unified error type for version-labeler operations
#[derive(Error, Debug)]
pub enum LabelerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Context error: {0}")]
    Context(String),

    #[error("Invalid changed-files pattern '{pattern}': {error}")]
    Pattern {
        pattern: String,
        error: globset::Error,
    },

    #[error("Remote operation failed: {0}")]
    Remote(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in version-labeler
pub type Result<T> = std::result::Result<T, LabelerError>;

impl LabelerError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        LabelerError::Config(msg.into())
    }

    /// Create a context error with context
    pub fn context(msg: impl Into<String>) -> Self {
        LabelerError::Context(msg.into())
    }

    /// Create a remote error with context
    pub fn remote(msg: impl Into<String>) -> Self {
        LabelerError::Remote(msg.into())
    }

    /// Wrap a glob compilation failure together with the offending pattern
    pub fn pattern(pattern: impl Into<String>, error: globset::Error) -> Self {
        LabelerError::Pattern {
            pattern: pattern.into(),
            error,
        }
    }
}
