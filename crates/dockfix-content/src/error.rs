//! Error types for dockfix-content

/// Result type for dockfix-content operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in dockfix-content operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid indent {indent:?}: {reason}")]
    InvalidIndent { indent: String, reason: String },
}

impl Error {
    pub fn invalid_indent(indent: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidIndent {
            indent: indent.into(),
            reason: reason.into(),
        }
    }
}
