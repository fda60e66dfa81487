//! Personal to-do use-case service.
//!
//! # Invariants
//! - Every item belongs to exactly one owner.
//! - Reading, changing or deleting an item needs the caller to be its owner
//!   or an admin.

use crate::model::enums::{ToDoFilterType, UserRole};
use crate::model::identity::Principal;
use crate::model::todo::{ToDoAuthRequest, ToDoId, ToDoItem, ToDoItemCreate, ToDoItemUpdate};
use crate::repo::todo_repo::ToDoRepository;
use crate::service::{ServiceError, ServiceResult};
use crate::time::{now_nanos, same_day, Clock};
use log::warn;

/// Authenticated caller with its resolved role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub principal: Principal,
    pub role: UserRole,
}

impl Caller {
    pub fn new(principal: Principal, role: UserRole) -> Self {
        Self { principal, role }
    }

    fn may_act_for(&self, owner: &Principal) -> bool {
        self.role == UserRole::Admin || &self.principal == owner
    }
}

pub struct ToDoService<R: ToDoRepository> {
    repo: R,
    clock: Clock,
}

impl<R: ToDoRepository> ToDoService<R> {
    pub fn new(repo: R) -> Self {
        Self::with_clock(repo, now_nanos)
    }

    pub fn with_clock(repo: R, clock: Clock) -> Self {
        Self { repo, clock }
    }

    /// Adds an item owned by the caller.
    pub fn add_todo(&self, caller: &Caller, item: &ToDoItemCreate) -> ServiceResult<ToDoId> {
        if caller.principal.is_anonymous() {
            return Err(ServiceError::Unauthorized(
                "anonymous callers cannot own to-do items".to_string(),
            ));
        }
        Ok(self
            .repo
            .create_todo(&caller.principal, item, (self.clock)())?)
    }

    pub fn user_todos(&self, caller: &Caller, user: &Principal) -> ServiceResult<Vec<ToDoItem>> {
        self.ensure_access(caller, user, "get_user_todos")?;
        Ok(self.repo.list_todos_by_owner(user)?)
    }

    /// `Today` keeps items due on the current UTC day.
    pub fn filter_todos_by_user(
        &self,
        caller: &Caller,
        user: &Principal,
        filter: ToDoFilterType,
    ) -> ServiceResult<Vec<ToDoItem>> {
        let mut items = self.user_todos(caller, user)?;
        if filter == ToDoFilterType::Today {
            let now = (self.clock)();
            items.retain(|item| item.due_date.is_some_and(|due| same_day(due, now)));
        }
        Ok(items)
    }

    pub fn update_todo(
        &self,
        caller: &Caller,
        request: &ToDoAuthRequest,
        update: &ToDoItemUpdate,
    ) -> ServiceResult<()> {
        self.authorize(caller, request, "update_todo")?;
        Ok(self.repo.update_todo(request.todo_id, update, (self.clock)())?)
    }

    pub fn delete_todo(&self, caller: &Caller, request: &ToDoAuthRequest) -> ServiceResult<()> {
        self.authorize(caller, request, "delete_todo")?;
        Ok(self.repo.delete_todo(request.todo_id)?)
    }

    /// The caller's own items.
    pub fn todos_for_export(&self, caller: &Caller) -> ServiceResult<Vec<ToDoItem>> {
        Ok(self.repo.list_todos_by_owner(&caller.principal)?)
    }

    fn authorize(
        &self,
        caller: &Caller,
        request: &ToDoAuthRequest,
        operation: &str,
    ) -> ServiceResult<()> {
        let item = self
            .repo
            .get_todo(request.todo_id)?
            .ok_or_else(|| ServiceError::not_found("todo", request.todo_id))?;
        self.ensure_access(caller, &item.owner, operation)?;
        if item.owner != request.owner {
            return Err(ServiceError::InvalidInput(format!(
                "to-do {} is not owned by the named owner",
                request.todo_id
            )));
        }
        Ok(())
    }

    fn ensure_access(&self, caller: &Caller, owner: &Principal, operation: &str) -> ServiceResult<()> {
        if caller.may_act_for(owner) {
            return Ok(());
        }
        warn!("event=access_denied module=todo status=error operation={operation} required=owner");
        Err(ServiceError::Unauthorized(format!(
            "{operation} requires the item owner or an admin"
        )))
    }
}
