//! Error types for dockfix-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that abort a run before or outside per-file processing
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from dockfix-content
    #[error(transparent)]
    Content(#[from] dockfix_content::Error),

    /// Error from dockfix-fs
    #[error(transparent)]
    Fs(#[from] dockfix_fs::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Report serialization error
    #[error("Failed to render JSON report: {0}")]
    Json(#[from] serde_json::Error),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}
