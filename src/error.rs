/// Errors raised by the smoothing and stylisation core.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StyleError {
    /// A caller-supplied parameter is outside its accepted range or format
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl StyleError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        StyleError::InvalidArgument(msg.into())
    }
}

/// Convenience Result type for core operations.
pub type Result<T> = std::result::Result<T, StyleError>;
