//! Client import: positional columns
//! `Name of Client, GSTIN, PAN, Task Category, Sub Category, Recurring of Task`.
//!
//! Only the name is required. Unknown or empty categories fall back to
//! `Other`, unknown or empty recurrences to none. Imported clients are
//! active with empty contact info.

use crate::import::{cell, commit_rows, data_start, optional_text, ImportError, ImportResult, PreviewRow};
use crate::model::client::Client;
use crate::model::enums::{Recurrence, TaskType};

pub const CLIENT_COLUMNS: [&str; 6] = [
    "Name of Client",
    "GSTIN",
    "PAN",
    "Task Category",
    "Sub Category",
    "Recurring of Task",
];

pub type ClientPreviewRow = PreviewRow<Client>;

pub fn preview_clients(rows: &[Vec<String>]) -> ImportResult<Vec<ClientPreviewRow>> {
    let start = data_start(rows, "name");
    let preview: Vec<ClientPreviewRow> = rows
        .iter()
        .enumerate()
        .skip(start)
        .filter(|(_, row)| row.iter().any(|value| !value.is_empty()))
        .map(|(index, row)| preview_row(index + 1, row))
        .collect();

    if preview.is_empty() {
        return Err(ImportError::NoRows);
    }
    Ok(preview)
}

pub fn commit_clients(rows: &[ClientPreviewRow]) -> Vec<Client> {
    commit_rows(rows)
}

fn preview_row(line: usize, row: &[String]) -> ClientPreviewRow {
    let name = cell(row, 0).trim();
    if name.is_empty() {
        return PreviewRow::invalid(
            line,
            row.to_vec(),
            format!("Missing required field \"Name of Client\" on row {line}"),
        );
    }

    let task_category = TaskType::parse_label(cell(row, 3)).unwrap_or(TaskType::Other);
    let mut client = Client::new(name, task_category);
    client.gstin = optional_text(cell(row, 1));
    client.pan = optional_text(cell(row, 2));
    client.sub_category = optional_text(cell(row, 4));
    client.recurring = Recurrence::parse_label(cell(row, 5)).unwrap_or_default();
    PreviewRow::valid(line, row.to_vec(), client)
}

#[cfg(test)]
mod tests {
    use super::preview_clients;
    use crate::import::csv::parse_rows;
    use crate::model::enums::{ClientStatus, Recurrence, TaskType};

    #[test]
    fn unknown_category_falls_back_to_other() {
        let rows = parse_rows("Name of Client,GSTIN\nTrading Co,,AABCT3456G,Bookkeeping,,Weekly\n");
        let preview = preview_clients(&rows).unwrap();

        assert_eq!(preview.len(), 1);
        let client = preview[0].record.clone().unwrap();
        assert_eq!(client.task_category, TaskType::Other);
        assert_eq!(client.recurring, Recurrence::None);
        assert_eq!(client.status, ClientStatus::Active);
        assert_eq!(client.pan.as_deref(), Some("AABCT3456G"));
        assert_eq!(client.gstin, None);
    }
}
