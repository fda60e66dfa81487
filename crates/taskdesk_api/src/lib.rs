//! Use-case facade over `taskdesk_core`.
//!
//! # Responsibility
//! - Expose every remote operation of the workspace as a method on
//!   [`Backend`], acting for one authenticated caller.
//! - Translate core failures into [`ApiError`] messages.
//!
//! # Invariants
//! - Exported calls never panic.
//! - Identity mechanics stay outside: the caller principal is trusted.

mod backend;
mod error;
mod files;

pub use backend::Backend;
pub use error::{ApiError, ApiResult};

/// Health-check passthrough for smoke tests.
pub fn ping() -> &'static str {
    taskdesk_core::ping()
}

pub fn core_version() -> &'static str {
    taskdesk_core::core_version()
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping, Backend};
    use taskdesk_core::{Principal, UserProfile, UserRole};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn fresh_workspace_caller_starts_as_guest() {
        let backend = Backend::open_in_memory(Principal::new("first")).unwrap();
        assert_eq!(backend.get_caller_user_role().unwrap(), UserRole::Guest);
        assert!(backend.get_clients().is_err());

        backend
            .save_caller_user_profile(&UserProfile {
                name: "First".to_string(),
                role: String::new(),
            })
            .unwrap();
        assert!(backend.is_caller_admin().unwrap());
        assert!(backend.get_clients().unwrap().is_empty());
    }
}
