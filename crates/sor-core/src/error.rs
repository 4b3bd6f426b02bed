use thiserror::Error;

#[derive(Debug, Error)]
pub enum SorError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown material: {0}")]
    UnknownMaterial(String),

    #[error("Unknown light color: {0}")]
    UnknownLightColor(String),

    #[error("Geometry error: {0}")]
    Geometry(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SorError {
    /// Shorthand for a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, SorError>;
