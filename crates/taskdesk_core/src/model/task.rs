//! Task record, task filters and the outstanding-amount rule.
//!
//! # Invariants
//! - `title` and `client_name` are non-empty for persisted tasks.
//! - `outstanding_amount` equals `bill - advance_received` (saturating) whenever
//!   either side is present; it is derived, never user-entered.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::enums::{PaymentStatus, Recurrence, TaskStatus, TaskType};
use super::identity::{Principal, TeamMember};
use super::{require_text, Time, ValidationError};

pub type TaskId = u32;

static NON_NUMERIC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^0-9.]").expect("valid non-numeric regex"));

/// Canonical task record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub status: TaskStatus,
    pub title: String,
    pub client_id: u32,
    pub payment_status: PaymentStatus,
    #[serde(default)]
    pub sub_type: Option<String>,
    #[serde(default)]
    pub completion_date: Option<Time>,
    pub assigned_to: Principal,
    pub client_name: String,
    #[serde(default)]
    pub assignment_date: Option<Time>,
    #[serde(default)]
    pub bill: Option<String>,
    #[serde(default)]
    pub advance_received: Option<u64>,
    pub created_at: Time,
    pub recurring: Recurrence,
    #[serde(default)]
    pub due_date: Option<Time>,
    #[serde(default)]
    pub manual_assignment_date: Option<Time>,
    pub task_type: TaskType,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub outstanding_amount: Option<u64>,
    #[serde(default)]
    pub captains: Vec<Principal>,
    pub assigned_name: String,
}

impl Task {
    /// Creates an unsaved pending task (`id = 0`) with empty optional fields.
    pub fn new(
        title: impl Into<String>,
        client_name: impl Into<String>,
        task_type: TaskType,
        assignee: &TeamMember,
    ) -> Self {
        Self {
            id: 0,
            status: TaskStatus::Pending,
            title: title.into(),
            client_id: 0,
            payment_status: PaymentStatus::Pending,
            sub_type: None,
            completion_date: None,
            assigned_to: assignee.principal.clone(),
            client_name: client_name.into(),
            assignment_date: None,
            bill: None,
            advance_received: None,
            created_at: 0,
            recurring: Recurrence::None,
            due_date: None,
            manual_assignment_date: None,
            task_type,
            comment: None,
            outstanding_amount: None,
            captains: Vec::new(),
            assigned_name: assignee.name.clone(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text(&self.title, "task title")?;
        require_text(&self.client_name, "task client name")
    }

    /// Recomputes the derived outstanding amount from bill and advance.
    pub fn refresh_outstanding(&mut self) {
        self.outstanding_amount =
            compute_outstanding(self.bill.as_deref(), self.advance_received);
    }

    /// Assignment date shown to users: the manual one wins.
    pub fn effective_assignment_date(&self) -> Option<Time> {
        self.manual_assignment_date.or(self.assignment_date)
    }

    /// Numeric value of the free-form bill string, 0 when absent.
    pub fn bill_value(&self) -> u64 {
        self.bill.as_deref().map_or(0, bill_amount)
    }
}

/// Parses a free-form bill such as `"₹50,000"` into whole currency units.
///
/// Every character other than digits and `.` is dropped; unparsable input
/// yields 0.
pub fn bill_amount(bill: &str) -> u64 {
    let cleaned = NON_NUMERIC_RE.replace_all(bill, "");
    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => value.trunc() as u64,
        _ => 0,
    }
}

/// Bill minus advance received, saturating at zero.
///
/// Returns `None` when neither a bill nor an advance is recorded.
pub fn compute_outstanding(bill: Option<&str>, advance_received: Option<u64>) -> Option<u64> {
    let bill = bill.map(str::trim).filter(|value| !value.is_empty());
    if bill.is_none() && advance_received.is_none() {
        return None;
    }
    let billed = bill.map_or(0, bill_amount);
    Some(billed.saturating_sub(advance_received.unwrap_or(0)))
}

/// Server-side task filter. Absent fields do not constrain the result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskFilter {
    #[serde(default)]
    pub status: Option<TaskStatus>,
    #[serde(default)]
    pub payment_status: Option<PaymentStatus>,
    /// Exact match after trimming, case-insensitive.
    #[serde(default)]
    pub sub_type: Option<String>,
    /// Exact assignee name, case-insensitive.
    #[serde(default)]
    pub assignee_name: Option<String>,
    /// Substring of the client name, case-insensitive.
    #[serde(default)]
    pub search_term: Option<String>,
    #[serde(default)]
    pub task_type: Option<TaskType>,
    /// Substring of the comment, case-insensitive.
    #[serde(default)]
    pub comment: Option<String>,
}

impl TaskFilter {
    pub fn matches(&self, task: &Task) -> bool {
        if self.status.is_some_and(|status| task.status != status) {
            return false;
        }
        if self
            .payment_status
            .is_some_and(|status| task.payment_status != status)
        {
            return false;
        }
        if self.task_type.is_some_and(|kind| task.task_type != kind) {
            return false;
        }
        if let Some(sub_type) = non_blank(self.sub_type.as_deref()) {
            let actual = task.sub_type.as_deref().unwrap_or("").trim();
            if !actual.eq_ignore_ascii_case(sub_type) {
                return false;
            }
        }
        if let Some(assignee) = non_blank(self.assignee_name.as_deref()) {
            if !task.assigned_name.trim().eq_ignore_ascii_case(assignee) {
                return false;
            }
        }
        if let Some(term) = non_blank(self.search_term.as_deref()) {
            if !contains_ignore_case(&task.client_name, term) {
                return false;
            }
        }
        if let Some(term) = non_blank(self.comment.as_deref()) {
            match task.comment.as_deref() {
                Some(comment) if contains_ignore_case(comment, term) => {}
                _ => return false,
            }
        }
        true
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

/// Case-insensitive substring test used by every text search.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::{bill_amount, compute_outstanding};

    #[test]
    fn bill_amount_strips_currency_and_separators() {
        assert_eq!(bill_amount("₹50,000"), 50_000);
        assert_eq!(bill_amount("1200.75"), 1200);
        assert_eq!(bill_amount("n/a"), 0);
    }

    #[test]
    fn outstanding_saturates_and_requires_some_input() {
        assert_eq!(compute_outstanding(Some("50000"), Some(25_000)), Some(25_000));
        assert_eq!(compute_outstanding(Some("100"), Some(500)), Some(0));
        assert_eq!(compute_outstanding(None, Some(10)), Some(0));
        assert_eq!(compute_outstanding(Some("  "), None), None);
        assert_eq!(compute_outstanding(None, None), None);
    }
}
