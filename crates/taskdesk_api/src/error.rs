//! Facade error surfaced to callers as a notification message.

use std::error::Error;
use std::fmt::{Display, Formatter};
use taskdesk_core::import::ImportError;
use taskdesk_core::{DbError, LoggingError, ServiceError};

pub type ApiResult<T> = Result<T, ApiError>;

/// Failure of a facade call. Every variant carries the message shown to
/// the user; the variant only tells callers how to react.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    Unauthorized(String),
    InvalidInput(String),
    NotFound(String),
    /// Database could not be opened, migrated or queried.
    Storage(String),
    /// Logging or configuration bootstrap failed.
    Setup(String),
}

impl ApiError {
    pub fn message(&self) -> &str {
        match self {
            Self::Unauthorized(message)
            | Self::InvalidInput(message)
            | Self::NotFound(message)
            | Self::Storage(message)
            | Self::Setup(message) => message,
        }
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl Error for ApiError {}

impl From<ServiceError> for ApiError {
    fn from(value: ServiceError) -> Self {
        let message = value.to_string();
        match value {
            ServiceError::Unauthorized(_) => Self::Unauthorized(message),
            ServiceError::InvalidInput(_) => Self::InvalidInput(message),
            ServiceError::NotFound { .. } => Self::NotFound(message),
            ServiceError::Repo(_) => Self::Storage(message),
        }
    }
}

impl From<DbError> for ApiError {
    fn from(value: DbError) -> Self {
        Self::Storage(value.to_string())
    }
}

impl From<ImportError> for ApiError {
    fn from(value: ImportError) -> Self {
        Self::InvalidInput(value.to_string())
    }
}

impl From<LoggingError> for ApiError {
    fn from(value: LoggingError) -> Self {
        Self::Setup(value.to_string())
    }
}
