use crate::font::FontError;

/// Errors surfaced by rune-shape.
///
/// Most failure modes inside shaping and bidi resolution degrade instead of
/// erroring; only bad caller input and configuration/font loading problems
/// end up here.
#[derive(Debug, thiserror::Error)]
pub enum ShapeError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Font(#[from] FontError),

    #[error("failed to read config file: {0}")]
    ConfigIo(#[source] std::io::Error),

    #[error("failed to parse config file: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

impl ShapeError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        ShapeError::InvalidArgument(message.into())
    }
}

/// Convenient result alias for shaping operations.
pub type Result<T> = std::result::Result<T, ShapeError>;
