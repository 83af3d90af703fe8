//! Error types

use thiserror::Error;

/// Core errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid value for {field}: {message}")]
    InvalidContext { field: String, message: String },
}

impl Error {
    pub fn invalid_context(field: impl Into<String>, message: impl Into<String>) -> Self {
        Error::InvalidContext {
            field: field.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
