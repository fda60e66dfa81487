//! CSV reports and import templates.
//!
//! Dates are written as `DD/MM/YYYY` so reports re-import cleanly; file
//! names carry the UTC date of the export.

use crate::import::client_import::CLIENT_COLUMNS;
use crate::import::csv::write_csv;
use crate::import::task_import::TASK_COLUMNS;
use crate::import::team_import::MAX_TEAM_IMPORT_ROWS;
use crate::model::client::Client;
use crate::model::dto::{PublicTask, PublicTaskByAssignee, RevenueTaskDetails};
use crate::model::enums::{RevenueCardType, TaskStatus, TaskType};
use crate::model::identity::TeamMember;
use crate::model::task::Task;
use crate::model::todo::ToDoItem;
use crate::model::Time;
use crate::time::{file_date_stamp, format_export_date};

/// Rendered CSV document plus its suggested file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub file_name: String,
    pub contents: String,
}

impl ExportFile {
    fn dated(prefix: &str, now: Time, contents: String) -> Self {
        Self {
            file_name: format!("{prefix}_{}.csv", file_date_stamp(now)),
            contents,
        }
    }

    fn named(file_name: &str, contents: String) -> Self {
        Self {
            file_name: file_name.to_string(),
            contents,
        }
    }
}

const TASK_REPORT_COLUMNS: [&str; 15] = [
    "Client Name",
    "Task Name",
    "Task Category",
    "Sub Category",
    "Status",
    "Comment",
    "Assigned Name",
    "Due Date",
    "Assignment Date",
    "Completion Date",
    "Bill",
    "Advance Received",
    "Outstanding Amount",
    "Payment Status",
    "Created Date",
];

/// Full task report; the assignment date prefers the manual one.
pub fn export_tasks(tasks: &[Task], now: Time) -> ExportFile {
    let rows: Vec<Vec<String>> = tasks
        .iter()
        .map(|task| {
            vec![
                task.client_name.clone(),
                task.title.clone(),
                task.task_type.label().to_string(),
                task.sub_type.clone().unwrap_or_default(),
                task.status.label().to_string(),
                task.comment.clone().unwrap_or_default(),
                task.assigned_name.clone(),
                format_export_date(task.due_date),
                format_export_date(task.effective_assignment_date()),
                format_export_date(task.completion_date),
                task.bill.clone().unwrap_or_default(),
                amount_cell(task.advance_received),
                amount_cell(task.outstanding_amount),
                task.payment_status.label().to_string(),
                format_export_date(Some(task.created_at)),
            ]
        })
        .collect();
    ExportFile::dated("task_report", now, write_csv(&TASK_REPORT_COLUMNS, &rows))
}

pub fn export_public_tasks(tasks: &[PublicTask], now: Time) -> ExportFile {
    let header = [
        "Title",
        "Client Name",
        "Task Type",
        "Task Sub Type",
        "Assigned To",
        "Status",
        "Payment Status",
        "Assigned Date",
        "Due Date",
        "Completion Date",
        "Comment",
    ];
    let rows: Vec<Vec<String>> = tasks
        .iter()
        .map(|task| {
            vec![
                task.title.clone(),
                task.client_name.clone(),
                task.task_type.label().to_string(),
                task.task_sub_type.label().to_string(),
                task.assigned_name.clone(),
                task.status.label().to_string(),
                task.payment_status.label().to_string(),
                format_export_date(task.assigned_date),
                format_export_date(task.due_date),
                completion_cell(task.status, task.completion_date),
                task.comment.clone().unwrap_or_default(),
            ]
        })
        .collect();
    ExportFile::dated("public_search_tasks", now, write_csv(&header, &rows))
}

pub fn export_tasks_by_assignee(tasks: &[PublicTaskByAssignee], now: Time) -> ExportFile {
    let header = [
        "Title",
        "Client Name",
        "Task Type",
        "Task Sub Type",
        "Task Status",
        "Payment Status",
        "Assigned Date",
        "Due Date",
        "Completion Date",
        "Comment",
    ];
    let rows: Vec<Vec<String>> = tasks
        .iter()
        .map(|task| {
            vec![
                task.title.clone(),
                task.client_name.clone(),
                task.task_type.label().to_string(),
                task.task_sub_type.label().to_string(),
                task.status.label().to_string(),
                task.payment_status.label().to_string(),
                format_export_date(task.assigned_date),
                format_export_date(task.due_date),
                completion_cell(task.status, task.completion_date),
                task.comment.clone().unwrap_or_default(),
            ]
        })
        .collect();
    ExportFile::dated("team_member_tasks", now, write_csv(&header, &rows))
}

pub fn export_todos(todos: &[ToDoItem], now: Time) -> ExportFile {
    let header = [
        "Title",
        "Description",
        "Due Date",
        "Completion Status",
        "Created Date",
        "Modified Date",
    ];
    let rows: Vec<Vec<String>> = todos
        .iter()
        .map(|todo| {
            vec![
                todo.title.clone(),
                todo.description.clone().unwrap_or_default(),
                format_export_date(todo.due_date),
                if todo.completed { "Completed" } else { "Pending" }.to_string(),
                format_export_date(Some(todo.created_at)),
                format_export_date(Some(todo.modified_at)),
            ]
        })
        .collect();
    ExportFile::dated("todo_list", now, write_csv(&header, &rows))
}

/// Revenue drill-down rows in the order given.
pub fn export_revenue_details(
    items: &[RevenueTaskDetails],
    card: RevenueCardType,
    now: Time,
) -> ExportFile {
    let header = [
        "Task Name",
        "Client Name",
        "Bill",
        "Advance Received",
        "Outstanding Amount",
        "Payment Status",
    ];
    let rows: Vec<Vec<String>> = items
        .iter()
        .map(|item| {
            vec![
                item.task_name.clone(),
                item.client_name.clone(),
                item.bill.clone().unwrap_or_default(),
                amount_cell(item.advance_received),
                amount_cell(item.outstanding_amount),
                item.payment_status.label().to_string(),
            ]
        })
        .collect();
    ExportFile::dated(
        &format!("revenue_details_{}", card.as_str()),
        now,
        write_csv(&header, &rows),
    )
}

pub fn client_template() -> ExportFile {
    let samples = [
        ["ABC Enterprises Ltd", "27AABCU9603R1ZM", "AABCU9603R", "GST", "GST Return Filing", "Monthly"],
        ["XYZ Consultants Pvt Ltd", "29AACFX1234A1Z5", "AACFX1234A", "Audit", "Internal Audit", "Yearly"],
        ["Tech Solutions Inc", "", "AADCT5678B", "IT Notice", "Assessment Notice", "Quarterly"],
        ["Consulting Group", "", "AABCC9012F", "CA Certificate", "Certification", ""],
    ];
    let rows: Vec<Vec<&str>> = samples.iter().map(|row| row.to_vec()).collect();
    let mut contents = write_csv(&CLIENT_COLUMNS, &rows);
    contents.push_str("\n\n# Reference Information:\n");
    contents.push_str("# - Name of Client: Required field\n");
    contents.push_str("# - GSTIN: Optional, 15-character alphanumeric code\n");
    contents.push_str("# - PAN: Optional, 10-character alphanumeric code\n");
    contents.push_str(&format!(
        "# - Task Category: Optional ({})\n",
        type_labels()
    ));
    contents.push_str("# - Sub Category: Optional, any text\n");
    contents.push_str("# - Recurring of Task: Optional (Monthly, Quarterly, Yearly)\n");
    ExportFile::named("client_import_template.csv", contents)
}

/// Task template seeded with real names; existing clients and members are
/// listed as `#` reference lines that the importer skips.
pub fn task_template(clients: &[Client], members: &[TeamMember]) -> ExportFile {
    let client_name = clients
        .first()
        .map_or("ABC Enterprises Ltd", |client| client.name.as_str());
    let member_name = members
        .first()
        .map_or("John Doe", |member| member.name.as_str());
    let rows = vec![vec![
        client_name,
        "GST Filing for Q1",
        "GST",
        "GST Return Filing",
        "Pending",
        "Initial review completed",
        member_name,
        "2026-03-31",
        "2026-01-15",
        "50000",
        "25000",
        "Pending",
    ]];

    let mut contents = write_csv(&TASK_COLUMNS, &rows);
    contents.push('\n');
    if !clients.is_empty() || !members.is_empty() {
        contents.push_str("\n# Available Clients:\n");
        for client in clients {
            contents.push_str(&format!("# {}\n", client.name));
        }
        contents.push_str("\n# Available Team Members:\n");
        for member in members {
            contents.push_str(&format!(
                "# {} (Principal: {})\n",
                member.name, member.principal
            ));
        }
    }
    contents.push_str(&format!("\n# Task Types: {}\n", type_labels()));
    contents.push_str("# Status: Pending, In Progress, Completed, Docs Pending, Hold\n");
    contents.push_str("# Payment Status: Pending, Paid, Overdue\n");
    contents.push_str("# Due Date: Format YYYY-MM-DD (e.g., 2026-03-31)\n");
    contents.push_str("# Assignment Date: Format YYYY-MM-DD, optional manual assignment date\n");
    contents.push_str("# Bill: Numeric amount (e.g., 50000)\n");
    contents.push_str("# Advance Received: Numeric amount (e.g., 25000)\n");
    contents.push_str("# Note: Outstanding balance is Bill - Advance Received\n");
    ExportFile::named("task_import_template.csv", contents)
}

pub fn team_member_template() -> ExportFile {
    let rows: Vec<Vec<&str>> = ["John Doe", "Jane Smith", "Robert Johnson"]
        .iter()
        .map(|name| vec![*name])
        .collect();
    let mut contents = write_csv(&["Name"], &rows);
    contents.push_str("\n\n# Reference Information:\n");
    contents.push_str("# - Name: Required field, the member's display name\n");
    contents.push_str(&format!(
        "# - Maximum {MAX_TEAM_IMPORT_ROWS} team members per upload\n"
    ));
    contents.push_str("# - Principal IDs are generated automatically\n");
    ExportFile::named("team_member_import_template.csv", contents)
}

fn amount_cell(value: Option<u64>) -> String {
    match value {
        Some(amount) if amount > 0 => amount.to_string(),
        _ => String::new(),
    }
}

fn completion_cell(status: TaskStatus, completion_date: Option<Time>) -> String {
    if status == TaskStatus::Completed {
        format_export_date(completion_date)
    } else {
        String::new()
    }
}

fn type_labels() -> String {
    TaskType::ALL
        .iter()
        .map(|kind| kind.label())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::{amount_cell, export_todos, team_member_template};
    use crate::import::csv::parse_rows;
    use crate::import::team_import::parse_team_members;
    use crate::model::identity::Principal;
    use crate::model::todo::ToDoItem;

    const MARCH_31: i64 = 1_774_915_200_000_000_000;

    #[test]
    fn zero_amounts_render_blank() {
        assert_eq!(amount_cell(None), "");
        assert_eq!(amount_cell(Some(0)), "");
        assert_eq!(amount_cell(Some(1500)), "1500");
    }

    #[test]
    fn todo_export_is_dated() {
        let todo = ToDoItem {
            id: 1,
            title: "Call, then email".to_string(),
            owner: Principal::new("owner-1"),
            modified_at: MARCH_31,
            created_at: MARCH_31,
            completed: true,
            due_date: None,
            description: None,
        };
        let file = export_todos(&[todo], MARCH_31);

        assert_eq!(file.file_name, "todo_list_2026-03-31.csv");
        assert!(file
            .contents
            .ends_with("\"Call, then email\",,,Completed,31/03/2026,31/03/2026"));
    }

    #[test]
    fn team_template_reimports() {
        let template = team_member_template();
        let members = parse_team_members(&parse_rows(&template.contents)).unwrap();
        assert_eq!(members.len(), 3);
    }
}
