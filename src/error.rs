use thiserror::Error;

/// Unified error type for relkit operations
#[derive(Error, Debug)]
pub enum RelkitError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("Tag error: {0}")]
    Tag(String),

    #[error("Invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in relkit
pub type Result<T> = std::result::Result<T, RelkitError>;

impl RelkitError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        RelkitError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        RelkitError::Version(msg.into())
    }

    /// Create a tag error with context
    pub fn tag(msg: impl Into<String>) -> Self {
        RelkitError::Tag(msg.into())
    }
}
