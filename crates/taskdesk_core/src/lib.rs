//! Core domain logic for TaskDesk, the client and task register of a
//! tax and accounting practice.
//! This crate owns every business rule; facades only translate calls.

pub mod config;
pub mod db;
pub mod export;
pub mod import;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod sort;
pub mod time;

pub use config::AppConfig;
pub use db::{open_db, open_db_in_memory, DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::client::{Client, ClientId};
pub use model::enums::{
    ClientStatus, PaymentStatus, Recurrence, RevenueCardType, SortDirection, TaskStatus,
    TaskType, ToDoFilterType, UserRole,
};
pub use model::identity::{Principal, TeamMember, UserProfile};
pub use model::task::{Task, TaskFilter, TaskId};
pub use model::todo::{ToDoAuthRequest, ToDoId, ToDoItem, ToDoItemCreate, ToDoItemUpdate};
pub use model::{Time, ValidationError};
pub use repo::{RepoError, RepoResult};
pub use service::{ServiceError, ServiceResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
