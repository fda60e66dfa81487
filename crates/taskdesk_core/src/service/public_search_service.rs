//! Unauthenticated search over redacted projections.
//!
//! # Contract
//! - The term is trimmed and matched as a case-insensitive substring.
//! - A blank term returns no rows, so the public page never dumps the
//!   whole workspace.

use crate::model::dto::{
    PublicClient, PublicSearchFilter, PublicTask, PublicTaskByAssignee, PublicTeamMember,
};
use crate::model::task::{contains_ignore_case, Task};
use crate::repo::client_repo::ClientRepository;
use crate::repo::task_repo::{TaskListQuery, TaskRepository};
use crate::repo::team_repo::TeamRepository;
use crate::service::ServiceResult;

pub struct PublicSearchService<T: TaskRepository, C: ClientRepository, M: TeamRepository> {
    tasks: T,
    clients: C,
    members: M,
}

impl<T: TaskRepository, C: ClientRepository, M: TeamRepository> PublicSearchService<T, C, M> {
    pub fn new(tasks: T, clients: C, members: M) -> Self {
        Self {
            tasks,
            clients,
            members,
        }
    }

    pub fn search_team_members(
        &self,
        filter: &PublicSearchFilter,
    ) -> ServiceResult<Vec<PublicTeamMember>> {
        let Some(term) = search_term(filter) else {
            return Ok(Vec::new());
        };
        Ok(self
            .members
            .list_members()?
            .iter()
            .filter(|member| contains_ignore_case(&member.name, term))
            .map(PublicTeamMember::from)
            .collect())
    }

    pub fn search_clients(&self, filter: &PublicSearchFilter) -> ServiceResult<Vec<PublicClient>> {
        let Some(term) = search_term(filter) else {
            return Ok(Vec::new());
        };
        Ok(self
            .clients
            .list_clients()?
            .iter()
            .filter(|client| contains_ignore_case(&client.name, term))
            .map(PublicClient::from)
            .collect())
    }

    /// Matches title, client, assignee, task type label or sub type.
    pub fn search_tasks(&self, filter: &PublicSearchFilter) -> ServiceResult<Vec<PublicTask>> {
        let Some(term) = search_term(filter) else {
            return Ok(Vec::new());
        };
        Ok(self
            .all_tasks()?
            .iter()
            .filter(|task| task_matches(task, term))
            .map(PublicTask::from)
            .collect())
    }

    pub fn search_tasks_by_assignee(
        &self,
        filter: &PublicSearchFilter,
    ) -> ServiceResult<Vec<PublicTaskByAssignee>> {
        let Some(term) = search_term(filter) else {
            return Ok(Vec::new());
        };
        Ok(self
            .all_tasks()?
            .iter()
            .filter(|task| contains_ignore_case(&task.assigned_name, term))
            .map(PublicTaskByAssignee::from)
            .collect())
    }

    fn all_tasks(&self) -> ServiceResult<Vec<Task>> {
        Ok(self.tasks.list_tasks(&TaskListQuery::default())?)
    }
}

fn search_term(filter: &PublicSearchFilter) -> Option<&str> {
    let term = filter.search_term.trim();
    (!term.is_empty()).then_some(term)
}

fn task_matches(task: &Task, term: &str) -> bool {
    contains_ignore_case(&task.title, term)
        || contains_ignore_case(&task.client_name, term)
        || contains_ignore_case(&task.assigned_name, term)
        || contains_ignore_case(task.task_type.label(), term)
        || task
            .sub_type
            .as_deref()
            .is_some_and(|sub_type| contains_ignore_case(sub_type, term))
}
