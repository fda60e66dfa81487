//! Enumerated domain values with wire names, display labels and label parsing.
//!
//! # Invariants
//! - `as_str` returns the camelCase wire name, which is also the stored value.
//! - `parse_label` is case-insensitive and ignores all whitespace, so
//!   `" In  Progress "`, `in progress` and `inprogress` are the same input.

use serde::{Deserialize, Serialize};

/// Lowercases and strips whitespace so labels compare loosely.
pub fn normalize_label(value: &str) -> String {
    value
        .chars()
        .filter(|ch| !ch.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Work status of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskStatus {
    Pending,
    Hold,
    Completed,
    InProgress,
    DocsPending,
}

impl TaskStatus {
    /// Display and sort order: pending < in progress < docs pending < hold < completed.
    pub const ORDERED: [TaskStatus; 5] = [
        TaskStatus::Pending,
        TaskStatus::InProgress,
        TaskStatus::DocsPending,
        TaskStatus::Hold,
        TaskStatus::Completed,
    ];

    /// Position in the fixed domain order.
    pub fn rank(self) -> u8 {
        match self {
            Self::Pending => 0,
            Self::InProgress => 1,
            Self::DocsPending => 2,
            Self::Hold => 3,
            Self::Completed => 4,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Hold => "hold",
            Self::Completed => "completed",
            Self::InProgress => "inProgress",
            Self::DocsPending => "docsPending",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "hold" => Some(Self::Hold),
            "completed" => Some(Self::Completed),
            "inProgress" => Some(Self::InProgress),
            "docsPending" => Some(Self::DocsPending),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Hold => "Hold",
            Self::Completed => "Completed",
            Self::InProgress => "In Progress",
            Self::DocsPending => "Docs Pending",
        }
    }

    pub fn parse_label(value: &str) -> Option<Self> {
        match normalize_label(value).as_str() {
            "pending" => Some(Self::Pending),
            "hold" | "onhold" => Some(Self::Hold),
            "completed" => Some(Self::Completed),
            "inprogress" => Some(Self::InProgress),
            "docspending" => Some(Self::DocsPending),
            _ => None,
        }
    }
}

/// Billing state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Overdue,
}

impl PaymentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Overdue => "overdue",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "paid" => Some(Self::Paid),
            "overdue" => Some(Self::Overdue),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Paid => "Paid",
            Self::Overdue => "Overdue",
        }
    }

    pub fn parse_label(value: &str) -> Option<Self> {
        match normalize_label(value).as_str() {
            "pending" => Some(Self::Pending),
            "paid" => Some(Self::Paid),
            "overdue" => Some(Self::Overdue),
            _ => None,
        }
    }
}

/// Recurrence cadence shared by clients and tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Recurrence {
    #[default]
    None,
    Quarterly,
    Monthly,
    Yearly,
}

impl Recurrence {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Quarterly => "quarterly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "none" => Some(Self::None),
            "quarterly" => Some(Self::Quarterly),
            "monthly" => Some(Self::Monthly),
            "yearly" => Some(Self::Yearly),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Quarterly => "Quarterly",
            Self::Monthly => "Monthly",
            Self::Yearly => "Yearly",
        }
    }

    pub fn parse_label(value: &str) -> Option<Self> {
        match normalize_label(value).as_str() {
            "none" | "" => Some(Self::None),
            "quarterly" => Some(Self::Quarterly),
            "monthly" => Some(Self::Monthly),
            "yearly" | "annual" | "annually" => Some(Self::Yearly),
            _ => None,
        }
    }
}

/// Category of work, used both for tasks and as a client's main category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskType {
    #[serde(rename = "GST")]
    Gst,
    #[serde(rename = "TDS")]
    Tds,
    #[serde(rename = "ITNotice")]
    ItNotice,
    Accounts,
    Audit,
    Other,
    FormFiling,
    #[serde(rename = "CACertificate")]
    CaCertificate,
}

impl TaskType {
    /// Order used by dashboard category cards.
    pub const ALL: [TaskType; 8] = [
        TaskType::Gst,
        TaskType::Audit,
        TaskType::ItNotice,
        TaskType::Tds,
        TaskType::Accounts,
        TaskType::FormFiling,
        TaskType::CaCertificate,
        TaskType::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Gst => "GST",
            Self::Tds => "TDS",
            Self::ItNotice => "ITNotice",
            Self::Accounts => "Accounts",
            Self::Audit => "Audit",
            Self::Other => "Other",
            Self::FormFiling => "FormFiling",
            Self::CaCertificate => "CACertificate",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == value)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Gst => "GST",
            Self::Tds => "TDS",
            Self::ItNotice => "IT Notice",
            Self::Accounts => "Accounts",
            Self::Audit => "Audit",
            Self::Other => "Other",
            Self::FormFiling => "Form Filing",
            Self::CaCertificate => "CA Certificate",
        }
    }

    pub fn parse_label(value: &str) -> Option<Self> {
        match normalize_label(value).as_str() {
            "gst" => Some(Self::Gst),
            "tds" => Some(Self::Tds),
            "itnotice" => Some(Self::ItNotice),
            "accounts" => Some(Self::Accounts),
            "audit" => Some(Self::Audit),
            "other" | "others" => Some(Self::Other),
            "formfiling" => Some(Self::FormFiling),
            "cacertificate" => Some(Self::CaCertificate),
            _ => None,
        }
    }
}

/// Whether a client is currently served.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ClientStatus {
    #[default]
    Active,
    Inactive,
}

impl ClientStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "active" => Some(Self::Active),
            "inactive" => Some(Self::Inactive),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
        }
    }
}

/// Access level of a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UserRole {
    Admin,
    User,
    Guest,
}

impl UserRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
            Self::Guest => "guest",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "admin" => Some(Self::Admin),
            "user" => Some(Self::User),
            "guest" => Some(Self::Guest),
            _ => None,
        }
    }

    /// Admins and users may change workspace data; guests only read.
    pub fn can_write(self) -> bool {
        matches!(self, Self::Admin | Self::User)
    }
}

/// Direction used by server-side sorted listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// To-do list filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ToDoFilterType {
    All,
    Today,
}

/// Revenue dashboard card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RevenueCardType {
    TotalCollected,
    TotalOutstanding,
    TotalRevenue,
}

impl RevenueCardType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TotalCollected => "totalCollected",
            Self::TotalOutstanding => "totalOutstanding",
            Self::TotalRevenue => "totalRevenue",
        }
    }
}
