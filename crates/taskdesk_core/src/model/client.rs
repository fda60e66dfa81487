//! Client record.

use serde::{Deserialize, Serialize};

use super::enums::{ClientStatus, Recurrence, TaskType};
use super::{require_text, ValidationError};

pub type ClientId = u32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: ClientId,
    #[serde(default)]
    pub pan: Option<String>,
    pub status: ClientStatus,
    #[serde(default)]
    pub sub_category: Option<String>,
    pub contact_info: String,
    pub name: String,
    pub recurring: Recurrence,
    #[serde(default)]
    pub gstin: Option<String>,
    pub task_category: TaskType,
}

impl Client {
    /// Creates an unsaved active client (`id = 0`).
    pub fn new(name: impl Into<String>, task_category: TaskType) -> Self {
        Self {
            id: 0,
            pan: None,
            status: ClientStatus::Active,
            sub_category: None,
            contact_info: String::new(),
            name: name.into(),
            recurring: Recurrence::None,
            gstin: None,
            task_category,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text(&self.name, "client name")
    }
}
