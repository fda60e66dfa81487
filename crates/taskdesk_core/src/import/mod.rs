//! Spreadsheet bulk import with a preview step.
//!
//! # Responsibility
//! - Tokenize CSV text exported from spreadsheet tools.
//! - Validate rows against the current clients and team members.
//! - Hand only error-free rows to the commit step.
//!
//! # Invariants
//! - Row validation never aborts the batch; every problem becomes a per-row
//!   message and the row is left out of the commit.
//! - File-level problems (no rows, missing column, too many rows) fail the
//!   whole import with `ImportError`.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod client_import;
pub mod csv;
pub mod task_import;
pub mod team_import;

pub type ImportResult<T> = Result<T, ImportError>;

/// File-level import failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportError {
    /// Input contained no data rows.
    NoRows,
    /// A required header column could not be located.
    MissingColumn(&'static str),
    /// More data rows than a single upload accepts.
    TooManyRows { limit: usize, found: usize },
    /// All-or-nothing imports report every invalid row.
    InvalidRows(Vec<String>),
}

impl Display for ImportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoRows => write!(f, "no data rows found"),
            Self::MissingColumn(column) => write!(f, "could not find \"{column}\" column"),
            Self::TooManyRows { limit, found } => {
                write!(f, "cannot import more than {limit} rows at once (found {found})")
            }
            Self::InvalidRows(errors) => write!(f, "{}", errors.join("; ")),
        }
    }
}

impl Error for ImportError {}

/// One previewed input row.
///
/// `record` is present exactly when `error` is absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewRow<T> {
    /// 1-based row number within the tokenized input, header included.
    pub line: usize,
    pub cells: Vec<String>,
    pub record: Option<T>,
    pub error: Option<String>,
}

impl<T> PreviewRow<T> {
    fn valid(line: usize, cells: Vec<String>, record: T) -> Self {
        Self {
            line,
            cells,
            record: Some(record),
            error: None,
        }
    }

    fn invalid(line: usize, cells: Vec<String>, error: String) -> Self {
        Self {
            line,
            cells,
            record: None,
            error: Some(error),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }
}

/// Records of the error-free rows, in input order.
pub fn commit_rows<T: Clone>(rows: &[PreviewRow<T>]) -> Vec<T> {
    rows.iter()
        .filter(|row| row.is_valid())
        .filter_map(|row| row.record.clone())
        .collect()
}

/// Cell `index` of `row`, or "" when the row is shorter.
fn cell(row: &[String], index: usize) -> &str {
    row.get(index).map_or("", String::as_str)
}

fn optional_text(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Skips the first row when its first cell contains `marker`.
fn data_start(rows: &[Vec<String>], marker: &str) -> usize {
    match rows.first().and_then(|row| row.first()) {
        Some(first) if first.to_lowercase().contains(marker) => 1,
        _ => 0,
    }
}
