use crate::backend::BackendError;
use crate::config::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HelperError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("backend error: {0}")]
    Backend(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<BackendError> for HelperError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::NotFound(_) => Self::NotFound(err.to_string()),
            BackendError::AlreadyExists(_) | BackendError::Service(_) => {
                Self::Backend(err.to_string())
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, HelperError>;
