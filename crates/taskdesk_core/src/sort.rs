//! Column sorting for task tables.
//!
//! # Contract
//! - Clicking the active column cycles ascending, descending, unsorted.
//! - Clicking another column starts it ascending.
//! - Sorting is stable; the unsorted state keeps input order.
//! - Status sorts by workflow rank, text columns case-insensitively, and
//!   missing dates as 0.

use crate::model::dto::{PublicTask, PublicTaskByAssignee, RevenueTaskDetails};
use crate::model::enums::{SortDirection, TaskStatus};
use crate::model::task::{bill_amount, Task};
use crate::model::Time;
use std::cmp::Ordering;

/// A sortable column of rows of type `T`.
pub trait SortColumn<T>: Copy + PartialEq {
    /// Ascending order of two rows under this column.
    fn compare(self, left: &T, right: &T) -> Ordering;
}

/// Tri-state header toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState<C> {
    active: Option<(C, SortDirection)>,
}

impl<C> Default for SortState<C> {
    fn default() -> Self {
        Self { active: None }
    }
}

impl<C: Copy + PartialEq> SortState<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a header click on `column`.
    pub fn toggle(&mut self, column: C) {
        self.active = match self.active {
            Some((current, SortDirection::Asc)) if current == column => {
                Some((column, SortDirection::Desc))
            }
            Some((current, SortDirection::Desc)) if current == column => None,
            _ => Some((column, SortDirection::Asc)),
        };
    }

    pub fn column(&self) -> Option<C> {
        self.active.map(|(column, _)| column)
    }

    pub fn direction(&self) -> Option<SortDirection> {
        self.active.map(|(_, direction)| direction)
    }

    /// Sorts `rows` in place; a no-op while unsorted.
    pub fn apply<T>(&self, rows: &mut [T])
    where
        C: SortColumn<T>,
    {
        if let Some((column, direction)) = self.active {
            sort_rows(rows, column, direction);
        }
    }
}

/// Stable sort of `rows` by `column`.
pub fn sort_rows<T, C: SortColumn<T>>(rows: &mut [T], column: C, direction: SortDirection) {
    rows.sort_by(|left, right| {
        let ordering = column.compare(left, right);
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}

pub fn sort_tasks(tasks: &mut [Task], column: TaskSortColumn, direction: SortDirection) {
    sort_rows(tasks, column, direction);
}

/// Orders statuses by workflow rank, not by name.
pub fn compare_task_status(left: TaskStatus, right: TaskStatus) -> Ordering {
    left.rank().cmp(&right.rank())
}

fn compare_text(left: &str, right: &str) -> Ordering {
    left.to_lowercase().cmp(&right.to_lowercase())
}

fn compare_optional_text(left: Option<&str>, right: Option<&str>) -> Ordering {
    compare_text(left.unwrap_or(""), right.unwrap_or(""))
}

fn compare_dates(left: Option<Time>, right: Option<Time>) -> Ordering {
    left.unwrap_or(0).cmp(&right.unwrap_or(0))
}

/// Columns of the main task table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskSortColumn {
    DueDate,
    CompletionDate,
    ClientName,
    SubType,
    Status,
}

impl SortColumn<Task> for TaskSortColumn {
    fn compare(self, left: &Task, right: &Task) -> Ordering {
        match self {
            Self::DueDate => compare_dates(left.due_date, right.due_date),
            Self::CompletionDate => compare_dates(left.completion_date, right.completion_date),
            Self::ClientName => compare_text(&left.client_name, &right.client_name),
            Self::SubType => {
                compare_optional_text(left.sub_type.as_deref(), right.sub_type.as_deref())
            }
            Self::Status => compare_task_status(left.status, right.status),
        }
    }
}

/// Columns of the revenue drill-down table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevenueSortColumn {
    TaskName,
    ClientName,
    Bill,
    AdvanceReceived,
    OutstandingAmount,
}

impl SortColumn<RevenueTaskDetails> for RevenueSortColumn {
    fn compare(self, left: &RevenueTaskDetails, right: &RevenueTaskDetails) -> Ordering {
        match self {
            Self::TaskName => compare_text(&left.task_name, &right.task_name),
            Self::ClientName => compare_text(&left.client_name, &right.client_name),
            Self::Bill => {
                let value = |row: &RevenueTaskDetails| row.bill.as_deref().map_or(0, bill_amount);
                value(left).cmp(&value(right))
            }
            Self::AdvanceReceived => left
                .advance_received
                .unwrap_or(0)
                .cmp(&right.advance_received.unwrap_or(0)),
            Self::OutstandingAmount => left
                .outstanding_amount
                .unwrap_or(0)
                .cmp(&right.outstanding_amount.unwrap_or(0)),
        }
    }
}

/// Columns of the public search result tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublicTaskSortColumn {
    Title,
    ClientName,
    SubType,
    Status,
    DueDate,
}

impl SortColumn<PublicTask> for PublicTaskSortColumn {
    fn compare(self, left: &PublicTask, right: &PublicTask) -> Ordering {
        match self {
            Self::Title => compare_text(&left.title, &right.title),
            Self::ClientName => compare_text(&left.client_name, &right.client_name),
            Self::SubType => {
                compare_optional_text(left.sub_type.as_deref(), right.sub_type.as_deref())
            }
            Self::Status => compare_task_status(left.status, right.status),
            Self::DueDate => compare_dates(left.due_date, right.due_date),
        }
    }
}

impl SortColumn<PublicTaskByAssignee> for PublicTaskSortColumn {
    fn compare(self, left: &PublicTaskByAssignee, right: &PublicTaskByAssignee) -> Ordering {
        match self {
            Self::Title => compare_text(&left.title, &right.title),
            Self::ClientName => compare_text(&left.client_name, &right.client_name),
            Self::SubType => compare_text(left.task_sub_type.label(), right.task_sub_type.label()),
            Self::Status => compare_task_status(left.status, right.status),
            Self::DueDate => compare_dates(left.due_date, right.due_date),
        }
    }
}
