//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into the operations of the remote
//!   interface (profiles, clients, tasks, team, to-dos, dashboards).
//! - Keep the facade layer decoupled from storage details.
//!
//! # Invariants
//! - Service APIs never bypass repository validation.
//! - Authorization decisions are made by `ProfileService`; other services
//!   trust the caller identity they are handed.

use crate::model::ValidationError;
use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod client_service;
pub mod dashboard_service;
pub mod profile_service;
pub mod public_search_service;
pub mod task_service;
pub mod team_service;
pub mod todo_service;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Use-case level failure surfaced to callers as a notification message.
#[derive(Debug)]
pub enum ServiceError {
    /// Caller lacks the role or ownership the operation needs.
    Unauthorized(String),
    /// Request shape is invalid (empty names, mismatched batches, ...).
    InvalidInput(String),
    /// Target record does not exist.
    NotFound { entity: &'static str, id: String },
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthorized(message) => write!(f, "unauthorized: {message}"),
            Self::InvalidInput(message) => write!(f, "invalid input: {message}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound { entity, id } => Self::NotFound { entity, id },
            RepoError::Validation(err) => Self::InvalidInput(err.to_string()),
            other => Self::Repo(other),
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(value: ValidationError) -> Self {
        Self::InvalidInput(value.to_string())
    }
}

impl ServiceError {
    pub(crate) fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}
