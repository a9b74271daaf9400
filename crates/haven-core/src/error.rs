//! Error types for Haven

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Required input absent or malformed
    #[error("Validation error: {0}")]
    Validation(String),

    /// A dependent component failed to initialize
    #[error("Engine unavailable: {0}")]
    Unavailable(String),

    /// Unexpected fault during computation
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Coarse error class used by transport layers to pick a status code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    Validation,
    Unavailable,
    Internal,
}

impl Error {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn class(&self) -> ErrorClass {
        match self {
            Error::Validation(_) | Error::Json(_) => ErrorClass::Validation,
            Error::Unavailable(_) | Error::InvalidData(_) | Error::Io(_) => {
                ErrorClass::Unavailable
            }
            Error::Internal(_) => ErrorClass::Internal,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
