//! Task import: positional columns
//! `ClientName, Title, TaskType, SubType, Status, Comment, AssignedName,
//! DueDate, AssignmentDate, Bill, AdvanceReceived, PaymentStatus`.
//!
//! # Contract
//! - A first row whose first cell mentions "client" is a header.
//! - Rows with fewer than 5 cells are reported as malformed.
//! - Client and team member names match case-insensitively after trimming;
//!   the stored task carries the canonical names.
//! - Empty status and payment status default to pending.
//! - Dates accept `YYYY-MM-DD` and `DD/MM/YYYY`; the assignment date is
//!   kept as the manual assignment date.

use crate::import::{cell, commit_rows, data_start, optional_text, ImportError, ImportResult, PreviewRow};
use crate::model::client::Client;
use crate::model::enums::{PaymentStatus, Recurrence, TaskStatus, TaskType};
use crate::model::identity::TeamMember;
use crate::model::task::Task;
use crate::model::Time;
use crate::time::{date_to_nanos, parse_import_date};

pub const TASK_COLUMNS: [&str; 12] = [
    "Client Name",
    "Title",
    "Task Type",
    "Sub Type",
    "Status",
    "Comment",
    "Assigned Name",
    "Due Date",
    "Assignment Date",
    "Bill",
    "Advance Received",
    "Payment Status",
];

const MIN_CELLS: usize = 5;

pub type TaskPreviewRow = PreviewRow<Task>;

/// Validates every data row of `rows` against the known clients and members.
pub fn preview_tasks(
    rows: &[Vec<String>],
    clients: &[Client],
    members: &[TeamMember],
) -> ImportResult<Vec<TaskPreviewRow>> {
    let start = data_start(rows, "client");
    let preview: Vec<TaskPreviewRow> = rows
        .iter()
        .enumerate()
        .skip(start)
        .filter(|(_, row)| row.iter().any(|value| !value.is_empty()))
        .map(|(index, row)| preview_row(index + 1, row, clients, members))
        .collect();

    if preview.is_empty() {
        return Err(ImportError::NoRows);
    }
    Ok(preview)
}

/// Tasks of the error-free rows, ready for bulk import.
pub fn commit_tasks(rows: &[TaskPreviewRow]) -> Vec<Task> {
    commit_rows(rows)
}

fn preview_row(
    line: usize,
    row: &[String],
    clients: &[Client],
    members: &[TeamMember],
) -> TaskPreviewRow {
    if row.len() < MIN_CELLS {
        return PreviewRow::invalid(
            line,
            row.to_vec(),
            format!(
                "Invalid format on line {line}. Expected: {}",
                TASK_COLUMNS.join(", ")
            ),
        );
    }

    let mut errors: Vec<&'static str> = Vec::new();

    let client = find_client(clients, cell(row, 0));
    if client.is_none() {
        errors.push("Client not found");
    }
    let title = cell(row, 1).trim();
    if title.is_empty() {
        errors.push("Title required");
    }
    let task_type = TaskType::parse_label(cell(row, 2));
    if task_type.is_none() {
        errors.push("Invalid Task Type");
    }
    let status = parse_or_default(cell(row, 4), TaskStatus::parse_label, TaskStatus::Pending);
    if status.is_none() {
        errors.push("Invalid Status");
    }
    let member = find_member(members, cell(row, 6));
    if member.is_none() {
        errors.push("Team member not found");
    }
    let payment_status =
        parse_or_default(cell(row, 11), PaymentStatus::parse_label, PaymentStatus::Pending);
    if payment_status.is_none() {
        errors.push("Invalid Payment Status");
    }
    let due_date = parse_optional_date(cell(row, 7));
    if due_date.is_err() {
        errors.push("Invalid Due Date");
    }
    let assignment_date = parse_optional_date(cell(row, 8));
    if assignment_date.is_err() {
        errors.push("Invalid Assignment Date");
    }
    let advance_received = parse_amount(cell(row, 10));
    if advance_received.is_err() {
        errors.push("Invalid Advance Received");
    }

    match (
        client,
        task_type,
        status,
        member,
        payment_status,
        due_date,
        assignment_date,
        advance_received,
    ) {
        (
            Some(client),
            Some(task_type),
            Some(status),
            Some(member),
            Some(payment_status),
            Ok(due_date),
            Ok(manual_assignment_date),
            Ok(advance_received),
        ) if errors.is_empty() => {
            let mut task = Task::new(title, client.name.trim(), task_type, member);
            task.client_id = client.id;
            task.sub_type = optional_text(cell(row, 3));
            task.status = status;
            task.comment = optional_text(cell(row, 5));
            task.due_date = due_date;
            task.manual_assignment_date = manual_assignment_date;
            task.bill = optional_text(cell(row, 9));
            task.advance_received = advance_received;
            task.payment_status = payment_status;
            task.recurring = Recurrence::None;
            task.refresh_outstanding();
            PreviewRow::valid(line, row.to_vec(), task)
        }
        _ => PreviewRow::invalid(line, row.to_vec(), errors.join(", ")),
    }
}

fn find_client<'a>(clients: &'a [Client], name: &str) -> Option<&'a Client> {
    let name = name.trim().to_lowercase();
    if name.is_empty() {
        return None;
    }
    clients
        .iter()
        .find(|client| client.name.trim().to_lowercase() == name)
}

fn find_member<'a>(members: &'a [TeamMember], name: &str) -> Option<&'a TeamMember> {
    let name = name.trim().to_lowercase();
    if name.is_empty() {
        return None;
    }
    members
        .iter()
        .find(|member| member.name.trim().to_lowercase() == name)
}

/// `Some(default)` for an empty cell, `None` for an unknown label.
fn parse_or_default<T>(value: &str, parse: impl FnOnce(&str) -> Option<T>, default: T) -> Option<T> {
    if value.trim().is_empty() {
        Some(default)
    } else {
        parse(value)
    }
}

fn parse_optional_date(value: &str) -> Result<Option<Time>, ()> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    parse_import_date(value).map(|date| Some(date_to_nanos(date))).ok_or(())
}

/// Whole amount with optional thousands separators.
fn parse_amount(value: &str) -> Result<Option<u64>, ()> {
    let cleaned: String = value
        .chars()
        .filter(|ch| *ch != ',' && !ch.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return Ok(None);
    }
    cleaned.parse::<u64>().map(Some).map_err(|_| ())
}

#[cfg(test)]
mod tests {
    use super::{parse_amount, parse_optional_date};

    #[test]
    fn amounts_accept_separators_and_reject_text() {
        assert_eq!(parse_amount(""), Ok(None));
        assert_eq!(parse_amount("25,000"), Ok(Some(25_000)));
        assert!(parse_amount("twenty").is_err());
        assert!(parse_amount("-5").is_err());
    }

    #[test]
    fn export_dates_reimport() {
        assert_eq!(
            parse_optional_date("31/03/2026"),
            parse_optional_date("2026-03-31")
        );
        assert!(parse_optional_date("31.03.2026").is_err());
    }
}
