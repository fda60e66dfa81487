//! Personal to-do items, always scoped to an owning principal.

use serde::{Deserialize, Serialize};

use super::identity::Principal;
use super::{require_text, Time, ValidationError};

pub type ToDoId = u32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToDoItem {
    pub id: ToDoId,
    pub title: String,
    pub owner: Principal,
    pub modified_at: Time,
    pub created_at: Time,
    pub completed: bool,
    #[serde(default)]
    pub due_date: Option<Time>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToDoItemCreate {
    pub title: String,
    #[serde(default)]
    pub due_date: Option<Time>,
    #[serde(default)]
    pub description: Option<String>,
}

impl ToDoItemCreate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text(&self.title, "to-do title")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToDoItemUpdate {
    pub title: String,
    pub completed: bool,
    #[serde(default)]
    pub due_date: Option<Time>,
    #[serde(default)]
    pub description: Option<String>,
}

impl ToDoItemUpdate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text(&self.title, "to-do title")
    }
}

/// Names the to-do a caller wants to touch and the owner it claims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToDoAuthRequest {
    pub owner: Principal,
    pub todo_id: ToDoId,
}
