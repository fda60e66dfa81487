//! Task use-case service.
//!
//! # Responsibility
//! - Task CRUD, partial updates, listings, filters and exports.
//! - Keep derived fields consistent on every write.
//!
//! # Invariants
//! - Entering `completed` stamps `completion_date`; leaving it clears it.
//! - `outstanding_amount` is recomputed whenever bill or advance is written.
//! - Stored client names are canonical: resolved from `client_id` when that
//!   client exists, otherwise from the client name.

use crate::model::dto::DateSearchResult;
use crate::model::enums::{PaymentStatus, SortDirection, TaskStatus, TaskType};
use crate::model::identity::Principal;
use crate::model::task::{Task, TaskFilter, TaskId};
use crate::model::{Time, ValidationError};
use crate::repo::client_repo::ClientRepository;
use crate::repo::task_repo::{TaskListQuery, TaskRepository};
use crate::service::{ServiceError, ServiceResult};
use crate::sort::{sort_tasks, TaskSortColumn};
use crate::time::{now_nanos, same_day, Clock};
use log::info;

/// Task service facade over task and client repositories.
pub struct TaskService<T: TaskRepository, C: ClientRepository> {
    tasks: T,
    clients: C,
    clock: Clock,
}

impl<T: TaskRepository, C: ClientRepository> TaskService<T, C> {
    pub fn new(tasks: T, clients: C) -> Self {
        Self::with_clock(tasks, clients, now_nanos)
    }

    /// Uses `clock` for creation, assignment and completion stamps.
    pub fn with_clock(tasks: T, clients: C, clock: Clock) -> Self {
        Self {
            tasks,
            clients,
            clock,
        }
    }

    pub fn list_tasks(&self) -> ServiceResult<Vec<Task>> {
        Ok(self.tasks.list_tasks(&TaskListQuery::default())?)
    }

    pub fn get_task(&self, id: TaskId) -> ServiceResult<Task> {
        self.tasks
            .get_task(id)?
            .ok_or_else(|| ServiceError::not_found("task", id))
    }

    pub fn tasks_by_status(&self, status: TaskStatus) -> ServiceResult<Vec<Task>> {
        Ok(self.tasks.list_tasks(&TaskListQuery {
            status: Some(status),
            ..TaskListQuery::default()
        })?)
    }

    pub fn tasks_by_type(&self, task_type: TaskType) -> ServiceResult<Vec<Task>> {
        Ok(self.tasks.list_tasks(&TaskListQuery {
            task_type: Some(task_type),
            ..TaskListQuery::default()
        })?)
    }

    pub fn filter_tasks(&self, filter: &TaskFilter) -> ServiceResult<Vec<Task>> {
        let mut tasks = self.list_tasks()?;
        tasks.retain(|task| filter.matches(task));
        Ok(tasks)
    }

    pub fn filter_and_sort_by_client_name(
        &self,
        filter: &TaskFilter,
        ascending: bool,
    ) -> ServiceResult<Vec<Task>> {
        let mut tasks = self.filter_tasks(filter)?;
        let direction = if ascending {
            SortDirection::Asc
        } else {
            SortDirection::Desc
        };
        sort_tasks(&mut tasks, TaskSortColumn::ClientName, direction);
        Ok(tasks)
    }

    /// Tasks due or completed on the UTC day of `date`.
    pub fn search_tasks_by_date(&self, date: Time) -> ServiceResult<DateSearchResult> {
        self.filter_tasks_by_date(date, true, true)
    }

    /// Tasks whose selected date fields fall on the UTC day of `target`.
    ///
    /// With neither flag set nothing matches.
    pub fn filter_tasks_by_date(
        &self,
        target: Time,
        include_due_date: bool,
        include_completion_date: bool,
    ) -> ServiceResult<DateSearchResult> {
        let on_day = |value: Option<Time>| value.is_some_and(|value| same_day(value, target));
        let mut tasks = self.list_tasks()?;
        tasks.retain(|task| {
            (include_due_date && on_day(task.due_date))
                || (include_completion_date && on_day(task.completion_date))
        });
        Ok(DateSearchResult {
            tasks,
            date: target,
        })
    }

    pub fn create_task(&self, task: &Task) -> ServiceResult<TaskId> {
        let prepared = self.prepare_new(task)?;
        Ok(self.tasks.create_task(&prepared)?)
    }

    /// Inserts all tasks in one transaction.
    pub fn bulk_import_tasks(&self, tasks: &[Task]) -> ServiceResult<Vec<TaskId>> {
        let prepared = tasks
            .iter()
            .map(|task| self.prepare_new(task))
            .collect::<ServiceResult<Vec<_>>>()?;
        let ids = self.tasks.create_tasks(&prepared)?;
        info!(
            "event=tasks_import module=task status=ok count={}",
            ids.len()
        );
        Ok(ids)
    }

    /// Replaces task `id` with `task`, keeping its creation stamp.
    pub fn update_task(&self, id: TaskId, task: &Task) -> ServiceResult<()> {
        let prepared = self.prepare_replacement(id, task)?;
        Ok(self.tasks.update_task(&prepared)?)
    }

    /// Pairs `ids[i]` with `tasks[i]`; one transaction for the whole batch.
    pub fn update_tasks(&self, ids: &[TaskId], tasks: &[Task]) -> ServiceResult<()> {
        if ids.len() != tasks.len() {
            return Err(ValidationError::Mismatch(format!(
                "{} task ids but {} task records",
                ids.len(),
                tasks.len()
            ))
            .into());
        }
        let prepared = ids
            .iter()
            .zip(tasks)
            .map(|(id, task)| self.prepare_replacement(*id, task))
            .collect::<ServiceResult<Vec<_>>>()?;
        self.tasks.update_tasks(&prepared)?;
        info!(
            "event=tasks_update module=task status=ok count={}",
            prepared.len()
        );
        Ok(())
    }

    pub fn delete_task(&self, id: TaskId) -> ServiceResult<()> {
        Ok(self.tasks.delete_task(id)?)
    }

    pub fn delete_tasks(&self, ids: &[TaskId]) -> ServiceResult<()> {
        self.tasks.delete_tasks(ids)?;
        info!(
            "event=tasks_delete module=task status=ok count={}",
            ids.len()
        );
        Ok(())
    }

    pub fn update_task_status(&self, id: TaskId, status: TaskStatus) -> ServiceResult<()> {
        self.modify(id, |task, now| {
            apply_status(task, status, now);
            Ok(())
        })
    }

    pub fn update_task_comment(&self, id: TaskId, comment: Option<String>) -> ServiceResult<()> {
        self.modify(id, |task, _| {
            task.comment = comment;
            Ok(())
        })
    }

    pub fn update_task_bill(
        &self,
        id: TaskId,
        bill: Option<String>,
        advance_received: Option<u64>,
    ) -> ServiceResult<()> {
        self.modify(id, |task, _| {
            task.bill = bill;
            task.advance_received = advance_received;
            task.refresh_outstanding();
            Ok(())
        })
    }

    pub fn update_task_captains(&self, id: TaskId, captains: Vec<Principal>) -> ServiceResult<()> {
        self.modify(id, |task, _| {
            task.captains = captains;
            Ok(())
        })
    }

    /// Sets the payment status; bill and advance are only touched when given.
    pub fn update_payment_status(
        &self,
        id: TaskId,
        payment_status: PaymentStatus,
        advance_received: Option<u64>,
        bill: Option<String>,
    ) -> ServiceResult<()> {
        self.modify(id, |task, _| {
            task.payment_status = payment_status;
            if advance_received.is_some() {
                task.advance_received = advance_received;
            }
            if bill.is_some() {
                task.bill = bill;
            }
            task.refresh_outstanding();
            Ok(())
        })
    }

    /// Reassigns the task and stamps a fresh assignment date.
    pub fn assign_task(
        &self,
        id: TaskId,
        assigned_to: Principal,
        assigned_name: &str,
    ) -> ServiceResult<()> {
        self.modify(id, |task, now| {
            if assigned_name.trim().is_empty() {
                return Err(ValidationError::EmptyField("assignee name").into());
            }
            task.assigned_to = assigned_to;
            task.assigned_name = assigned_name.trim().to_string();
            task.assignment_date = Some(now);
            Ok(())
        })
    }

    pub fn all_tasks_for_export(&self) -> ServiceResult<Vec<Task>> {
        self.list_tasks()
    }

    pub fn tasks_for_export(&self) -> ServiceResult<Vec<Task>> {
        self.list_tasks()
    }

    /// Selected tasks in storage order; unknown ids are ignored.
    pub fn selected_tasks_for_export(&self, ids: &[TaskId]) -> ServiceResult<Vec<Task>> {
        Ok(self.tasks.list_tasks(&TaskListQuery {
            ids: Some(ids.to_vec()),
            ..TaskListQuery::default()
        })?)
    }

    fn modify(
        &self,
        id: TaskId,
        change: impl FnOnce(&mut Task, Time) -> ServiceResult<()>,
    ) -> ServiceResult<()> {
        let mut task = self.get_task(id)?;
        change(&mut task, (self.clock)())?;
        Ok(self.tasks.update_task(&task)?)
    }

    fn prepare_new(&self, task: &Task) -> ServiceResult<Task> {
        let now = (self.clock)();
        let mut prepared = task.clone();
        prepared.id = 0;
        prepared.created_at = now;
        if prepared.assignment_date.is_none() {
            prepared.assignment_date = Some(now);
        }
        if prepared.status == TaskStatus::Completed {
            prepared.completion_date.get_or_insert(now);
        } else {
            prepared.completion_date = None;
        }
        prepared.refresh_outstanding();
        self.resolve_client(&mut prepared)?;
        Ok(prepared)
    }

    fn prepare_replacement(&self, id: TaskId, task: &Task) -> ServiceResult<Task> {
        let existing = self.get_task(id)?;
        let mut prepared = task.clone();
        prepared.id = id;
        prepared.created_at = existing.created_at;
        prepared.completion_date = existing.completion_date;
        apply_status(&mut prepared, task.status, (self.clock)());
        if task.status == TaskStatus::Completed && task.completion_date.is_some() {
            prepared.completion_date = task.completion_date;
        }
        prepared.refresh_outstanding();
        self.resolve_client(&mut prepared)?;
        Ok(prepared)
    }

    fn resolve_client(&self, task: &mut Task) -> ServiceResult<()> {
        let client = match self.clients.get_client(task.client_id)? {
            Some(client) => Some(client),
            None => self.clients.find_client_by_name(&task.client_name)?,
        };
        match client {
            Some(client) => {
                task.client_id = client.id;
                task.client_name = client.name;
                Ok(())
            }
            None => Err(ServiceError::not_found("client", task.client_name.trim())),
        }
    }
}

/// Moves `task` to `status`, maintaining the completion stamp.
fn apply_status(task: &mut Task, status: TaskStatus, now: Time) {
    let was_completed = task.completion_date.is_some();
    task.status = status;
    if status == TaskStatus::Completed {
        if !was_completed {
            task.completion_date = Some(now);
        }
    } else {
        task.completion_date = None;
    }
}

#[cfg(test)]
mod tests {
    use super::apply_status;
    use crate::model::enums::{TaskStatus, TaskType};
    use crate::model::identity::{Principal, TeamMember};
    use crate::model::task::Task;

    fn sample() -> Task {
        let member = TeamMember::new(Principal::new("member-1"), "John Doe");
        Task::new("File GST", "Acme Ltd", TaskType::Gst, &member)
    }

    #[test]
    fn completing_stamps_once_and_reopening_clears() {
        let mut task = sample();
        apply_status(&mut task, TaskStatus::Completed, 10);
        assert_eq!(task.completion_date, Some(10));

        apply_status(&mut task, TaskStatus::Completed, 20);
        assert_eq!(task.completion_date, Some(10));

        apply_status(&mut task, TaskStatus::Hold, 30);
        assert_eq!(task.status, TaskStatus::Hold);
        assert_eq!(task.completion_date, None);
    }
}
