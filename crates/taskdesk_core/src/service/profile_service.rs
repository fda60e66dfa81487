//! Profile and role use-case service.
//!
//! # Responsibility
//! - Save and read user profiles.
//! - Resolve caller roles and gate write/admin operations.
//!
//! # Invariants
//! - A principal without an assigned role is a guest.
//! - The first principal to save a profile while no admin exists becomes
//!   admin, so a fresh workspace is never locked out.
//! - Anonymous callers are always guests and can never be promoted.

use crate::model::enums::UserRole;
use crate::model::identity::{Principal, UserProfile};
use crate::repo::profile_repo::ProfileRepository;
use crate::service::{ServiceError, ServiceResult};
use log::{info, warn};

/// Use-case service for profiles and access checks.
pub struct ProfileService<R: ProfileRepository> {
    repo: R,
}

impl<R: ProfileRepository> ProfileService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn get_profile(&self, principal: &Principal) -> ServiceResult<Option<UserProfile>> {
        Ok(self.repo.get_profile(principal)?)
    }

    /// Saves the caller's own profile.
    ///
    /// # Contract
    /// - Anonymous callers are rejected.
    /// - Promotes the caller to admin when no admin exists yet; the stored
    ///   profile role mirrors the effective role in that case.
    pub fn save_caller_profile(
        &self,
        caller: &Principal,
        profile: &UserProfile,
    ) -> ServiceResult<()> {
        if caller.is_anonymous() {
            return Err(ServiceError::Unauthorized(
                "anonymous callers cannot save a profile".to_string(),
            ));
        }

        let mut stored = profile.clone();
        if !self.repo.has_admin()? {
            self.repo.set_role(caller, UserRole::Admin)?;
            stored.role = UserRole::Admin.as_str().to_string();
            info!("event=role_bootstrap module=profile status=ok role=admin");
        } else if self.repo.get_role(caller)?.is_none() {
            self.repo.set_role(caller, UserRole::User)?;
        }
        self.repo.save_profile(caller, &stored)?;
        Ok(())
    }

    /// Effective role of a principal; unassigned principals are guests.
    pub fn role_of(&self, principal: &Principal) -> ServiceResult<UserRole> {
        if principal.is_anonymous() {
            return Ok(UserRole::Guest);
        }
        Ok(self.repo.get_role(principal)?.unwrap_or(UserRole::Guest))
    }

    pub fn is_admin(&self, principal: &Principal) -> ServiceResult<bool> {
        Ok(self.role_of(principal)? == UserRole::Admin)
    }

    /// Assigns `role` to `user`; only admins may do this.
    pub fn assign_role(
        &self,
        caller: &Principal,
        user: &Principal,
        role: UserRole,
    ) -> ServiceResult<()> {
        self.require_admin(caller, "assign_role")?;
        if user.is_anonymous() {
            return Err(ServiceError::InvalidInput(
                "cannot assign a role to the anonymous principal".to_string(),
            ));
        }
        self.repo.set_role(user, role)?;
        info!(
            "event=role_assign module=profile status=ok role={}",
            role.as_str()
        );
        Ok(())
    }

    /// Fails unless the caller may change workspace data.
    pub fn require_write(&self, caller: &Principal, operation: &str) -> ServiceResult<()> {
        if self.role_of(caller)?.can_write() {
            return Ok(());
        }
        warn!("event=access_denied module=profile status=error operation={operation} required=user");
        Err(ServiceError::Unauthorized(format!(
            "{operation} requires a user or admin role"
        )))
    }

    /// Fails unless the caller is an admin.
    pub fn require_admin(&self, caller: &Principal, operation: &str) -> ServiceResult<()> {
        if self.is_admin(caller)? {
            return Ok(());
        }
        warn!("event=access_denied module=profile status=error operation={operation} required=admin");
        Err(ServiceError::Unauthorized(format!(
            "{operation} requires the admin role"
        )))
    }
}
