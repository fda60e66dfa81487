//! CSV import previews and export documents built on the facade.
//!
//! Previews never write; the matching `commit_*` call imports only the
//! error-free rows of a preview.

use crate::backend::Backend;
use crate::error::ApiResult;
use log::info;
use taskdesk_core::export::{
    client_template, export_public_tasks, export_revenue_details, export_tasks,
    export_tasks_by_assignee, export_todos, task_template, team_member_template, ExportFile,
};
use taskdesk_core::import::client_import::{commit_clients, preview_clients, ClientPreviewRow};
use taskdesk_core::import::csv::parse_rows;
use taskdesk_core::import::task_import::{commit_tasks, preview_tasks, TaskPreviewRow};
use taskdesk_core::import::team_import::parse_team_members;
use taskdesk_core::model::dto::PublicSearchFilter;
use taskdesk_core::service::client_service::ClientImportSummary;
use taskdesk_core::sort::{sort_rows, RevenueSortColumn};
use taskdesk_core::{RevenueCardType, SortDirection, TaskId, TeamMember};

impl Backend {
    pub fn preview_client_import(&self, text: &str) -> ApiResult<Vec<ClientPreviewRow>> {
        self.require_admin("preview_client_import")?;
        Ok(preview_clients(&parse_rows(text))?)
    }

    pub fn commit_client_import(&self, rows: &[ClientPreviewRow]) -> ApiResult<ClientImportSummary> {
        let clients = commit_clients(rows);
        info!(
            "event=import_commit module=api status=start kind=clients rows={} valid={}",
            rows.len(),
            clients.len()
        );
        self.bulk_import_clients(&clients)
    }

    /// Validates task rows against the current clients and team members.
    pub fn preview_task_import(&self, text: &str) -> ApiResult<Vec<TaskPreviewRow>> {
        self.require_admin("preview_task_import")?;
        let clients = self.get_clients()?;
        let members = self.get_all_team_members()?;
        Ok(preview_tasks(&parse_rows(text), &clients, &members)?)
    }

    pub fn commit_task_import(&self, rows: &[TaskPreviewRow]) -> ApiResult<Vec<TaskId>> {
        let tasks = commit_tasks(rows);
        info!(
            "event=import_commit module=api status=start kind=tasks rows={} valid={}",
            rows.len(),
            tasks.len()
        );
        self.bulk_import_tasks(&tasks)
    }

    /// Parses a team upload; any invalid row rejects the whole file.
    pub fn preview_team_import(&self, text: &str) -> ApiResult<Vec<TeamMember>> {
        self.require_admin("preview_team_import")?;
        Ok(parse_team_members(&parse_rows(text))?)
    }

    /// Task report of the selected ids, or of every task when `None`.
    pub fn export_tasks_csv(&self, selected: Option<&[TaskId]>) -> ApiResult<ExportFile> {
        let tasks = match selected {
            Some(ids) => self.get_selected_tasks_for_export(ids)?,
            None => self.get_all_tasks_for_export()?,
        };
        Ok(export_tasks(&tasks, self.now()))
    }

    pub fn export_todos_csv(&self) -> ApiResult<ExportFile> {
        Ok(export_todos(&self.get_todos_for_export()?, self.now()))
    }

    /// Revenue drill-down rows, largest outstanding amount first.
    pub fn export_revenue_csv(&self, card: RevenueCardType) -> ApiResult<ExportFile> {
        let mut items = self.get_revenue_modal_data(card)?.items;
        sort_rows(&mut items, RevenueSortColumn::OutstandingAmount, SortDirection::Desc);
        Ok(export_revenue_details(&items, card, self.now()))
    }

    pub fn export_public_tasks_csv(&self, filter: &PublicSearchFilter) -> ApiResult<ExportFile> {
        Ok(export_public_tasks(&self.public_search_tasks(filter)?, self.now()))
    }

    pub fn export_tasks_by_assignee_csv(&self, filter: &PublicSearchFilter) -> ApiResult<ExportFile> {
        Ok(export_tasks_by_assignee(
            &self.public_search_tasks_by_assignee(filter)?,
            self.now(),
        ))
    }

    pub fn client_import_template(&self) -> ExportFile {
        client_template()
    }

    /// Task template listing the current clients and team members.
    pub fn task_import_template(&self) -> ApiResult<ExportFile> {
        Ok(task_template(&self.get_clients()?, &self.get_all_team_members()?))
    }

    pub fn team_import_template(&self) -> ExportFile {
        team_member_template()
    }
}
