//! Team member repository contract and SQLite implementation.

use crate::model::identity::{Principal, TeamMember};
use crate::repo::RepoResult;
use rusqlite::{params, Connection, OptionalExtension, Row};

/// Repository interface for team membership.
pub trait TeamRepository {
    /// Inserts or renames the member keyed by principal.
    fn upsert_member(&self, member: &TeamMember) -> RepoResult<()>;
    /// Upserts all members in one transaction.
    fn upsert_members(&self, members: &[TeamMember]) -> RepoResult<()>;
    fn get_member(&self, principal: &Principal) -> RepoResult<Option<TeamMember>>;
    /// Case-insensitive lookup on the trimmed name.
    fn find_member_by_name(&self, name: &str) -> RepoResult<Option<TeamMember>>;
    /// All members ordered by name.
    fn list_members(&self) -> RepoResult<Vec<TeamMember>>;
}

/// SQLite-backed team repository.
pub struct SqliteTeamRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTeamRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn upsert(&self, member: &TeamMember) -> RepoResult<()> {
        member.validate()?;
        self.conn.execute(
            "INSERT INTO team_members (principal, name)
             VALUES (?1, ?2)
             ON CONFLICT (principal) DO UPDATE SET name = excluded.name;",
            params![member.principal.as_str(), member.name.trim()],
        )?;
        Ok(())
    }
}

impl TeamRepository for SqliteTeamRepository<'_> {
    fn upsert_member(&self, member: &TeamMember) -> RepoResult<()> {
        self.upsert(member)
    }

    fn upsert_members(&self, members: &[TeamMember]) -> RepoResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        for member in members {
            self.upsert(member)?;
        }
        tx.commit()?;
        Ok(())
    }

    fn get_member(&self, principal: &Principal) -> RepoResult<Option<TeamMember>> {
        let member = self
            .conn
            .query_row(
                "SELECT principal, name FROM team_members WHERE principal = ?1;",
                [principal.as_str()],
                member_from_row,
            )
            .optional()?;
        Ok(member)
    }

    fn find_member_by_name(&self, name: &str) -> RepoResult<Option<TeamMember>> {
        let member = self
            .conn
            .query_row(
                "SELECT principal, name
                 FROM team_members
                 WHERE name = ?1 COLLATE NOCASE
                 ORDER BY principal ASC
                 LIMIT 1;",
                [name.trim()],
                member_from_row,
            )
            .optional()?;
        Ok(member)
    }

    fn list_members(&self) -> RepoResult<Vec<TeamMember>> {
        let mut stmt = self.conn.prepare(
            "SELECT principal, name FROM team_members ORDER BY name COLLATE NOCASE ASC, principal ASC;",
        )?;
        let members = stmt
            .query_map([], member_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(members)
    }
}

fn member_from_row(row: &Row<'_>) -> rusqlite::Result<TeamMember> {
    Ok(TeamMember::new(
        Principal::new(row.get::<_, String>(0)?),
        row.get::<_, String>(1)?,
    ))
}
