//! Request/response shapes for dashboards, date search and public search.
//!
//! Public projections deliberately omit ids, principals and billing amounts.

use serde::{Deserialize, Serialize};

use super::client::Client;
use super::enums::{ClientStatus, PaymentStatus, SortDirection, TaskStatus, TaskType};
use super::identity::TeamMember;
use super::task::Task;
use super::Time;

/// Tasks whose due or completion date falls on `date` (UTC day).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateSearchResult {
    pub tasks: Vec<Task>,
    pub date: Time,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardTasksRequest {
    pub completion_date_sort_direction: SortDirection,
    pub due_date_sort_direction: SortDirection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardTasksResponse {
    pub completion_date_sorted: Vec<Task>,
    pub due_date_sorted: Vec<Task>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueResponse {
    pub total_collected: u64,
    pub total_outstanding: u64,
    pub total_revenue: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueTaskDetails {
    pub payment_status: PaymentStatus,
    pub client_name: String,
    #[serde(default)]
    pub bill: Option<String>,
    #[serde(default)]
    pub advance_received: Option<u64>,
    pub task_name: String,
    #[serde(default)]
    pub outstanding_amount: Option<u64>,
}

impl From<&Task> for RevenueTaskDetails {
    fn from(task: &Task) -> Self {
        Self {
            payment_status: task.payment_status,
            client_name: task.client_name.clone(),
            bill: task.bill.clone(),
            advance_received: task.advance_received,
            task_name: task.title.clone(),
            outstanding_amount: task.outstanding_amount,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueModalResponse {
    pub total_amount: u64,
    pub items: Vec<RevenueTaskDetails>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DueDateCountResponse {
    pub due_today_count: u64,
    pub due_tomorrow_count: u64,
    pub custom_date_count: u64,
    pub any_date_count: u64,
}

/// Drill-down selector for the due-date cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DueDateDayType {
    DueToday,
    DueTomorrow,
    AnyDate,
    CustomDate(Time),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DueDateTaskDetails {
    pub status: TaskStatus,
    pub assignee: String,
    pub payment_status: PaymentStatus,
    pub client_name: String,
    #[serde(default)]
    pub due_date: Option<Time>,
    pub task_title: String,
    #[serde(default)]
    pub comments: Option<String>,
}

impl From<&Task> for DueDateTaskDetails {
    fn from(task: &Task) -> Self {
        Self {
            status: task.status,
            assignee: task.assigned_name.clone(),
            payment_status: task.payment_status,
            client_name: task.client_name.clone(),
            due_date: task.due_date,
            task_title: task.title.clone(),
            comments: task.comment.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DueDateModalResponse {
    pub task_count: u64,
    pub items: Vec<DueDateTaskDetails>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicSearchFilter {
    pub search_term: String,
}

impl PublicSearchFilter {
    pub fn new(search_term: impl Into<String>) -> Self {
        Self {
            search_term: search_term.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicTeamMember {
    pub name: String,
}

impl From<&TeamMember> for PublicTeamMember {
    fn from(member: &TeamMember) -> Self {
        Self {
            name: member.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicClient {
    pub status: ClientStatus,
    pub name: String,
}

impl From<&Client> for PublicClient {
    fn from(client: &Client) -> Self {
        Self {
            status: client.status,
            name: client.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicTask {
    pub status: TaskStatus,
    pub title: String,
    pub payment_status: PaymentStatus,
    #[serde(default)]
    pub sub_type: Option<String>,
    #[serde(default)]
    pub completion_date: Option<Time>,
    pub client_name: String,
    #[serde(default)]
    pub due_date: Option<Time>,
    pub task_type: TaskType,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub assigned_date: Option<Time>,
    pub assigned_name: String,
    pub task_sub_type: TaskType,
}

impl From<&Task> for PublicTask {
    fn from(task: &Task) -> Self {
        Self {
            status: task.status,
            title: task.title.clone(),
            payment_status: task.payment_status,
            sub_type: task.sub_type.clone(),
            completion_date: task.completion_date,
            client_name: task.client_name.clone(),
            due_date: task.due_date,
            task_type: task.task_type,
            comment: task.comment.clone(),
            assigned_date: task.effective_assignment_date(),
            assigned_name: task.assigned_name.clone(),
            task_sub_type: task.task_type,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicTaskByAssignee {
    pub status: TaskStatus,
    pub title: String,
    pub payment_status: PaymentStatus,
    #[serde(default)]
    pub completion_date: Option<Time>,
    pub client_name: String,
    #[serde(default)]
    pub due_date: Option<Time>,
    pub task_status: TaskStatus,
    pub task_type: TaskType,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub assigned_date: Option<Time>,
    pub assigned_name: String,
    pub task_sub_type: TaskType,
}

impl From<&Task> for PublicTaskByAssignee {
    fn from(task: &Task) -> Self {
        Self {
            status: task.status,
            title: task.title.clone(),
            payment_status: task.payment_status,
            completion_date: task.completion_date,
            client_name: task.client_name.clone(),
            due_date: task.due_date,
            task_status: task.status,
            task_type: task.task_type,
            comment: task.comment.clone(),
            assigned_date: task.effective_assignment_date(),
            assigned_name: task.assigned_name.clone(),
            task_sub_type: task.task_type,
        }
    }
}
