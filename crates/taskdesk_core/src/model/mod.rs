//! Domain model for the consultancy workspace.
//!
//! # Responsibility
//! - Define canonical records (tasks, clients, team members, to-dos,
//!   profiles) and the request/response shapes of the use-case surface.
//! - Own enum label parsing and the outstanding-amount rule.
//!
//! # Invariants
//! - Every timestamp is a `Time` in nanoseconds since the Unix epoch.
//! - Wire names follow the camelCase shape of the remote interface.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod client;
pub mod dto;
pub mod enums;
pub mod identity;
pub mod task;
pub mod todo;

/// Nanosecond-resolution Unix timestamp used at the interface boundary.
pub type Time = i64;

/// Record-level validation failure raised before persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required text field is empty after trimming.
    EmptyField(&'static str),
    /// Two related inputs disagree, e.g. id list and record list lengths.
    Mismatch(String),
    /// An amount does not fit the signed 64-bit storage column.
    AmountOutOfRange { field: &'static str, value: u64 },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField(field) => write!(f, "{field} cannot be empty"),
            Self::Mismatch(details) => write!(f, "{details}"),
            Self::AmountOutOfRange { field, value } => {
                write!(f, "{field} {value} exceeds the largest storable amount")
            }
        }
    }
}

impl Error for ValidationError {}

pub(crate) fn require_text(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(())
}
