//! Team member use-case service.

use crate::model::identity::{Principal, TeamMember};
use crate::repo::team_repo::TeamRepository;
use crate::service::ServiceResult;
use log::info;

pub struct TeamService<R: TeamRepository> {
    repo: R,
}

impl<R: TeamRepository> TeamService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// All members ordered by name.
    pub fn list_members(&self) -> ServiceResult<Vec<TeamMember>> {
        Ok(self.repo.list_members()?)
    }

    /// Creates or renames the member keyed by `principal`.
    pub fn create_member(&self, name: &str, principal: Principal) -> ServiceResult<()> {
        let member = TeamMember::new(principal, name.trim());
        member.validate()?;
        self.repo.upsert_member(&member)?;
        Ok(())
    }

    pub fn bulk_import_members(&self, members: &[TeamMember]) -> ServiceResult<()> {
        for member in members {
            member.validate()?;
        }
        self.repo.upsert_members(members)?;
        info!(
            "event=team_import module=team status=ok count={}",
            members.len()
        );
        Ok(())
    }
}
