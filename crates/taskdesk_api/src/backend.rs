//! Caller-scoped use-case facade, one method per remote operation.
//!
//! # Responsibility
//! - Own the SQLite connection and the authenticated caller principal.
//! - Gate every operation by role before handing it to a core service.
//!
//! # Invariants
//! - Methods never panic; failures come back as `ApiError`.
//! - Public search methods need no role.
//! - Admin-only: role assignment, client creation/import/bulk edit/delete,
//!   team member creation/import, task bulk import/edit/delete.
//! - Task comment edits and single task deletion need the assignee or an
//!   admin; every other task and client operation needs a user role.

use crate::error::{ApiError, ApiResult};
use log::{info, warn};
use rusqlite::Connection;
use std::path::Path;
use taskdesk_core::model::dto::{
    DashboardTasksRequest, DashboardTasksResponse, DateSearchResult, DueDateCountResponse,
    DueDateDayType, DueDateModalResponse, PublicClient, PublicSearchFilter, PublicTask,
    PublicTaskByAssignee, PublicTeamMember, RevenueModalResponse, RevenueResponse,
};
use taskdesk_core::repo::client_repo::SqliteClientRepository;
use taskdesk_core::repo::profile_repo::SqliteProfileRepository;
use taskdesk_core::repo::task_repo::SqliteTaskRepository;
use taskdesk_core::repo::team_repo::SqliteTeamRepository;
use taskdesk_core::repo::todo_repo::SqliteToDoRepository;
use taskdesk_core::service::client_service::{ClientImportSummary, ClientService};
use taskdesk_core::service::dashboard_service::DashboardService;
use taskdesk_core::service::profile_service::ProfileService;
use taskdesk_core::service::public_search_service::PublicSearchService;
use taskdesk_core::service::task_service::TaskService;
use taskdesk_core::service::team_service::TeamService;
use taskdesk_core::service::todo_service::{Caller, ToDoService};
use taskdesk_core::time::{now_nanos, Clock};
use taskdesk_core::{
    init_logging, open_db, open_db_in_memory, AppConfig, Client, ClientId, PaymentStatus,
    Principal, RevenueCardType, Task, TaskFilter, TaskId, TaskStatus, TaskType, TeamMember,
    Time, ToDoAuthRequest, ToDoFilterType, ToDoId, ToDoItem, ToDoItemCreate, ToDoItemUpdate,
    UserProfile, UserRole,
};

type Clients<'conn> = ClientService<SqliteClientRepository<'conn>>;
type Tasks<'conn> = TaskService<SqliteTaskRepository<'conn>, SqliteClientRepository<'conn>>;

/// Workspace handle acting on behalf of one caller.
pub struct Backend {
    conn: Connection,
    caller: Principal,
    clock: Clock,
}

impl Backend {
    /// Opens (and migrates) the database file at `path`.
    pub fn open(path: impl AsRef<Path>, caller: Principal) -> ApiResult<Self> {
        Ok(Self::from_connection(open_db(path)?, caller))
    }

    pub fn open_in_memory(caller: Principal) -> ApiResult<Self> {
        Ok(Self::from_connection(open_db_in_memory()?, caller))
    }

    /// Starts file logging when `config.log_dir` is set, then opens
    /// `config.db_path`.
    pub fn from_config(config: &AppConfig, caller: Principal) -> ApiResult<Self> {
        if let Some(log_dir) = &config.log_dir {
            init_logging(&config.log_level, log_dir)?;
        }
        let backend = Self::open(&config.db_path, caller)?;
        info!("event=backend_open module=api status=ok");
        Ok(backend)
    }

    pub fn from_connection(conn: Connection, caller: Principal) -> Self {
        Self {
            conn,
            caller,
            clock: now_nanos,
        }
    }

    /// Replaces the wall clock used for timestamps and day boundaries.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn caller(&self) -> &Principal {
        &self.caller
    }

    /// Switches the acting principal without reopening the database.
    pub fn set_caller(&mut self, caller: Principal) {
        self.caller = caller;
    }

    pub(crate) fn now(&self) -> Time {
        (self.clock)()
    }

    // Profiles and roles.

    pub fn get_caller_user_profile(&self) -> ApiResult<Option<UserProfile>> {
        Ok(self.profiles().get_profile(&self.caller)?)
    }

    pub fn save_caller_user_profile(&self, profile: &UserProfile) -> ApiResult<()> {
        Ok(self.profiles().save_caller_profile(&self.caller, profile)?)
    }

    /// Profile of `user`; callers may read their own, admins anyone's.
    pub fn get_user_profile(&self, user: &Principal) -> ApiResult<Option<UserProfile>> {
        if user != &self.caller {
            self.require_admin("get_user_profile")?;
        }
        Ok(self.profiles().get_profile(user)?)
    }

    pub fn assign_caller_user_role(&self, user: &Principal, role: UserRole) -> ApiResult<()> {
        Ok(self.profiles().assign_role(&self.caller, user, role)?)
    }

    pub fn get_caller_user_role(&self) -> ApiResult<UserRole> {
        Ok(self.profiles().role_of(&self.caller)?)
    }

    pub fn is_caller_admin(&self) -> ApiResult<bool> {
        Ok(self.profiles().is_admin(&self.caller)?)
    }

    // Clients.

    pub fn get_clients(&self) -> ApiResult<Vec<Client>> {
        self.require_user("get_clients")?;
        Ok(self.clients().list_clients()?)
    }

    pub fn search_clients(&self, search_term: &str) -> ApiResult<Vec<Client>> {
        self.require_user("search_clients")?;
        Ok(self.clients().search_clients(search_term)?)
    }

    pub fn add_clients(&self, new_clients: &[Client]) -> ApiResult<Vec<ClientId>> {
        self.require_admin("add_clients")?;
        Ok(self.clients().add_clients(new_clients)?)
    }

    /// Adds clients whose names are not taken yet; duplicates are reported
    /// back instead of failing the batch.
    pub fn bulk_import_clients(&self, clients: &[Client]) -> ApiResult<ClientImportSummary> {
        self.require_admin("bulk_import_clients")?;
        Ok(self.clients().bulk_import_clients(clients)?)
    }

    pub fn update_client(&self, client_id: ClientId, updated: &Client) -> ApiResult<()> {
        self.require_user("update_client")?;
        Ok(self.clients().update_client(client_id, updated)?)
    }

    pub fn update_clients(&self, client_ids: &[ClientId], updated: &[Client]) -> ApiResult<()> {
        self.require_admin("update_clients")?;
        Ok(self.clients().update_clients(client_ids, updated)?)
    }

    pub fn delete_client(&self, client_id: ClientId) -> ApiResult<()> {
        self.require_admin("delete_client")?;
        Ok(self.clients().delete_client(client_id)?)
    }

    pub fn delete_clients(&self, client_ids: &[ClientId]) -> ApiResult<()> {
        self.require_admin("delete_clients")?;
        Ok(self.clients().delete_clients(client_ids)?)
    }

    // Tasks.

    pub fn get_tasks(&self) -> ApiResult<Vec<Task>> {
        self.require_user("get_tasks")?;
        Ok(self.tasks().list_tasks()?)
    }

    pub fn get_tasks_by_status(&self, status: TaskStatus) -> ApiResult<Vec<Task>> {
        self.require_user("get_tasks_by_status")?;
        Ok(self.tasks().tasks_by_status(status)?)
    }

    pub fn get_tasks_by_type(&self, task_type: TaskType) -> ApiResult<Vec<Task>> {
        self.require_user("get_tasks_by_type")?;
        Ok(self.tasks().tasks_by_type(task_type)?)
    }

    pub fn filter_tasks(&self, filter: &TaskFilter) -> ApiResult<Vec<Task>> {
        self.require_user("filter_tasks")?;
        Ok(self.tasks().filter_tasks(filter)?)
    }

    pub fn filter_and_sort_by_client_name(
        &self,
        filter: &TaskFilter,
        ascending: bool,
    ) -> ApiResult<Vec<Task>> {
        self.require_user("filter_and_sort_by_client_name")?;
        Ok(self.tasks().filter_and_sort_by_client_name(filter, ascending)?)
    }

    pub fn search_tasks_by_date(&self, date: Time) -> ApiResult<DateSearchResult> {
        self.require_user("search_tasks_by_date")?;
        Ok(self.tasks().search_tasks_by_date(date)?)
    }

    pub fn filter_tasks_by_date(
        &self,
        target_date: Time,
        include_due_date: bool,
        include_completion_date: bool,
    ) -> ApiResult<DateSearchResult> {
        self.require_user("filter_tasks_by_date")?;
        Ok(self
            .tasks()
            .filter_tasks_by_date(target_date, include_due_date, include_completion_date)?)
    }

    pub fn create_task(&self, task: &Task) -> ApiResult<TaskId> {
        self.require_user("create_task")?;
        Ok(self.tasks().create_task(task)?)
    }

    pub fn bulk_import_tasks(&self, tasks: &[Task]) -> ApiResult<Vec<TaskId>> {
        self.require_admin("bulk_import_tasks")?;
        Ok(self.tasks().bulk_import_tasks(tasks)?)
    }

    pub fn update_task(&self, task_id: TaskId, updated: &Task) -> ApiResult<()> {
        self.require_user("update_task")?;
        Ok(self.tasks().update_task(task_id, updated)?)
    }

    pub fn update_tasks(&self, task_ids: &[TaskId], updated: &[Task]) -> ApiResult<()> {
        self.require_admin("update_tasks")?;
        Ok(self.tasks().update_tasks(task_ids, updated)?)
    }

    pub fn delete_task(&self, task_id: TaskId) -> ApiResult<()> {
        self.require_assignee_or_admin(task_id, "delete_task")?;
        Ok(self.tasks().delete_task(task_id)?)
    }

    pub fn delete_tasks(&self, task_ids: &[TaskId]) -> ApiResult<()> {
        self.require_admin("delete_tasks")?;
        Ok(self.tasks().delete_tasks(task_ids)?)
    }

    pub fn update_task_status(&self, task_id: TaskId, status: TaskStatus) -> ApiResult<()> {
        self.require_user("update_task_status")?;
        Ok(self.tasks().update_task_status(task_id, status)?)
    }

    pub fn update_task_comment(&self, task_id: TaskId, comment: Option<String>) -> ApiResult<()> {
        self.require_assignee_or_admin(task_id, "update_task_comment")?;
        Ok(self.tasks().update_task_comment(task_id, comment)?)
    }

    pub fn update_task_bill(
        &self,
        task_id: TaskId,
        bill: Option<String>,
        advance_received: Option<u64>,
    ) -> ApiResult<()> {
        self.require_user("update_task_bill")?;
        Ok(self.tasks().update_task_bill(task_id, bill, advance_received)?)
    }

    pub fn update_task_captains(&self, task_id: TaskId, captains: Vec<Principal>) -> ApiResult<()> {
        self.require_user("update_task_captains")?;
        Ok(self.tasks().update_task_captains(task_id, captains)?)
    }

    pub fn update_payment_status(
        &self,
        task_id: TaskId,
        payment_status: PaymentStatus,
        advance_received: Option<u64>,
        bill: Option<String>,
    ) -> ApiResult<()> {
        self.require_user("update_payment_status")?;
        Ok(self
            .tasks()
            .update_payment_status(task_id, payment_status, advance_received, bill)?)
    }

    pub fn assign_task(
        &self,
        task_id: TaskId,
        assigned_to: Principal,
        assigned_name: &str,
    ) -> ApiResult<()> {
        self.require_user("assign_task")?;
        Ok(self.tasks().assign_task(task_id, assigned_to, assigned_name)?)
    }

    pub fn get_all_tasks_for_export(&self) -> ApiResult<Vec<Task>> {
        self.require_user("get_all_tasks_for_export")?;
        Ok(self.tasks().all_tasks_for_export()?)
    }

    pub fn get_tasks_for_export(&self) -> ApiResult<Vec<Task>> {
        self.require_user("get_tasks_for_export")?;
        Ok(self.tasks().tasks_for_export()?)
    }

    pub fn get_selected_tasks_for_export(&self, task_ids: &[TaskId]) -> ApiResult<Vec<Task>> {
        self.require_user("get_selected_tasks_for_export")?;
        Ok(self.tasks().selected_tasks_for_export(task_ids)?)
    }

    // Dashboard.

    pub fn get_dashboard_tasks(
        &self,
        request: &DashboardTasksRequest,
    ) -> ApiResult<DashboardTasksResponse> {
        self.require_user("get_dashboard_tasks")?;
        Ok(self.dashboard().dashboard_tasks(request)?)
    }

    pub fn get_revenue_cards_data(&self) -> ApiResult<RevenueResponse> {
        self.require_user("get_revenue_cards_data")?;
        Ok(self.dashboard().revenue_cards()?)
    }

    pub fn get_revenue_modal_data(&self, card: RevenueCardType) -> ApiResult<RevenueModalResponse> {
        self.require_user("get_revenue_modal_data")?;
        Ok(self.dashboard().revenue_modal(card)?)
    }

    /// Counts for the due-date cards; `custom_date` fills the custom card.
    pub fn get_due_date_card_counts(
        &self,
        custom_date: Option<Time>,
    ) -> ApiResult<DueDateCountResponse> {
        self.require_user("get_due_date_card_counts")?;
        Ok(self.dashboard().due_date_counts(custom_date)?)
    }

    pub fn get_due_date_modal_data(
        &self,
        day_type: Option<DueDateDayType>,
        custom_date: Option<Time>,
    ) -> ApiResult<Option<DueDateModalResponse>> {
        self.require_user("get_due_date_modal_data")?;
        Ok(self.dashboard().due_date_modal(day_type, custom_date)?)
    }

    // Team.

    pub fn get_all_team_members(&self) -> ApiResult<Vec<TeamMember>> {
        self.require_user("get_all_team_members")?;
        Ok(self.team().list_members()?)
    }

    pub fn create_team_member(&self, name: &str, principal: Principal) -> ApiResult<()> {
        self.require_admin("create_team_member")?;
        Ok(self.team().create_member(name, principal)?)
    }

    pub fn bulk_import_team_members(&self, members: &[TeamMember]) -> ApiResult<()> {
        self.require_admin("bulk_import_team_members")?;
        Ok(self.team().bulk_import_members(members)?)
    }

    // To-dos.

    pub fn add_todo_item(&self, item: &ToDoItemCreate) -> ApiResult<ToDoId> {
        let caller = self.todo_caller("add_todo_item")?;
        Ok(self.todos().add_todo(&caller, item)?)
    }

    pub fn get_user_todos(&self, user: &Principal) -> ApiResult<Vec<ToDoItem>> {
        let caller = self.todo_caller("get_user_todos")?;
        Ok(self.todos().user_todos(&caller, user)?)
    }

    pub fn filter_todos_by_user(
        &self,
        user: &Principal,
        filter: ToDoFilterType,
    ) -> ApiResult<Vec<ToDoItem>> {
        let caller = self.todo_caller("filter_todos_by_user")?;
        Ok(self.todos().filter_todos_by_user(&caller, user, filter)?)
    }

    pub fn update_todo_item(
        &self,
        request: &ToDoAuthRequest,
        update: &ToDoItemUpdate,
    ) -> ApiResult<()> {
        let caller = self.todo_caller("update_todo_item")?;
        Ok(self.todos().update_todo(&caller, request, update)?)
    }

    pub fn delete_todo_item(&self, request: &ToDoAuthRequest) -> ApiResult<()> {
        let caller = self.todo_caller("delete_todo_item")?;
        Ok(self.todos().delete_todo(&caller, request)?)
    }

    pub fn get_todos_for_export(&self) -> ApiResult<Vec<ToDoItem>> {
        let caller = self.todo_caller("get_todos_for_export")?;
        Ok(self.todos().todos_for_export(&caller)?)
    }

    // Public search; no role required.

    pub fn public_search_team_members(
        &self,
        filter: &PublicSearchFilter,
    ) -> ApiResult<Vec<PublicTeamMember>> {
        Ok(self.public_search().search_team_members(filter)?)
    }

    pub fn public_search_clients(&self, filter: &PublicSearchFilter) -> ApiResult<Vec<PublicClient>> {
        Ok(self.public_search().search_clients(filter)?)
    }

    pub fn public_search_tasks(&self, filter: &PublicSearchFilter) -> ApiResult<Vec<PublicTask>> {
        Ok(self.public_search().search_tasks(filter)?)
    }

    pub fn public_search_tasks_by_assignee(
        &self,
        filter: &PublicSearchFilter,
    ) -> ApiResult<Vec<PublicTaskByAssignee>> {
        Ok(self.public_search().search_tasks_by_assignee(filter)?)
    }

    fn profiles(&self) -> ProfileService<SqliteProfileRepository<'_>> {
        ProfileService::new(SqliteProfileRepository::new(&self.conn))
    }

    fn clients(&self) -> Clients<'_> {
        ClientService::new(SqliteClientRepository::new(&self.conn))
    }

    fn tasks(&self) -> Tasks<'_> {
        TaskService::with_clock(
            SqliteTaskRepository::new(&self.conn),
            SqliteClientRepository::new(&self.conn),
            self.clock,
        )
    }

    fn dashboard(&self) -> DashboardService<SqliteTaskRepository<'_>> {
        DashboardService::with_clock(SqliteTaskRepository::new(&self.conn), self.clock)
    }

    fn team(&self) -> TeamService<SqliteTeamRepository<'_>> {
        TeamService::new(SqliteTeamRepository::new(&self.conn))
    }

    fn todos(&self) -> ToDoService<SqliteToDoRepository<'_>> {
        ToDoService::with_clock(SqliteToDoRepository::new(&self.conn), self.clock)
    }

    fn public_search(
        &self,
    ) -> PublicSearchService<
        SqliteTaskRepository<'_>,
        SqliteClientRepository<'_>,
        SqliteTeamRepository<'_>,
    > {
        PublicSearchService::new(
            SqliteTaskRepository::new(&self.conn),
            SqliteClientRepository::new(&self.conn),
            SqliteTeamRepository::new(&self.conn),
        )
    }

    pub(crate) fn require_user(&self, operation: &str) -> ApiResult<()> {
        Ok(self.profiles().require_write(&self.caller, operation)?)
    }

    pub(crate) fn require_admin(&self, operation: &str) -> ApiResult<()> {
        Ok(self.profiles().require_admin(&self.caller, operation)?)
    }

    fn require_assignee_or_admin(&self, task_id: TaskId, operation: &str) -> ApiResult<()> {
        self.require_user(operation)?;
        let task = self.tasks().get_task(task_id)?;
        if task.assigned_to == self.caller || self.profiles().is_admin(&self.caller)? {
            return Ok(());
        }
        warn!("event=access_denied module=api status=error operation={operation} required=assignee");
        Err(ApiError::Unauthorized(format!(
            "{operation} requires the task assignee or an admin"
        )))
    }

    fn todo_caller(&self, operation: &str) -> ApiResult<Caller> {
        self.require_user(operation)?;
        let role = self.profiles().role_of(&self.caller)?;
        Ok(Caller::new(self.caller.clone(), role))
    }
}
