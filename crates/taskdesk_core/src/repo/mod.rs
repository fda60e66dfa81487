//! Repository layer abstractions and SQLite implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts per entity.
//! - Isolate SQL details from service/business orchestration.
//!
//! # Invariants
//! - Write paths validate records before SQL mutations.
//! - Read paths reject invalid persisted enum values instead of masking them.
//! - Updates and deletes of missing rows return `RepoError::NotFound`.

use crate::db::DbError;
use crate::model::ValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod client_repo;
pub mod profile_repo;
pub mod task_repo;
pub mod team_repo;
pub mod todo_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationError),
    Db(DbError),
    NotFound { entity: &'static str, id: String },
    InvalidData(String),
}

impl RepoError {
    pub(crate) fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound { .. } => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Decodes a stored enum column, reporting the table/column on failure.
pub(crate) fn decode_enum<T>(
    value: &str,
    column: &'static str,
    parse: impl FnOnce(&str) -> Option<T>,
) -> RepoResult<T> {
    parse(value).ok_or_else(|| RepoError::InvalidData(format!("invalid value `{value}` in {column}")))
}

/// Narrows a SQLite rowid to the 32-bit ids of the interface.
pub(crate) fn decode_id(value: i64, column: &'static str) -> RepoResult<u32> {
    u32::try_from(value)
        .map_err(|_| RepoError::InvalidData(format!("id `{value}` out of range in {column}")))
}

pub(crate) fn decode_amount(value: Option<i64>, column: &'static str) -> RepoResult<Option<u64>> {
    value
        .map(|amount| {
            u64::try_from(amount).map_err(|_| {
                RepoError::InvalidData(format!("negative amount `{amount}` in {column}"))
            })
        })
        .transpose()
}

/// Rejects amounts above `i64::MAX` so stored values read back unchanged.
pub(crate) fn encode_amount(value: Option<u64>, field: &'static str) -> RepoResult<Option<i64>> {
    value
        .map(|amount| {
            i64::try_from(amount).map_err(|_| {
                RepoError::Validation(ValidationError::AmountOutOfRange {
                    field,
                    value: amount,
                })
            })
        })
        .transpose()
}

pub(crate) fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
