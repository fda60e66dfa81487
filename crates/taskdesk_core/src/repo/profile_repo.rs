//! User profile and role persistence.

use crate::model::enums::UserRole;
use crate::model::identity::{Principal, UserProfile};
use crate::repo::{decode_enum, RepoResult};
use rusqlite::{params, Connection, OptionalExtension};

/// Repository interface for profiles and role assignments.
pub trait ProfileRepository {
    fn get_profile(&self, principal: &Principal) -> RepoResult<Option<UserProfile>>;
    fn save_profile(&self, principal: &Principal, profile: &UserProfile) -> RepoResult<()>;
    /// Explicitly assigned role, `None` when never assigned.
    fn get_role(&self, principal: &Principal) -> RepoResult<Option<UserRole>>;
    fn set_role(&self, principal: &Principal, role: UserRole) -> RepoResult<()>;
    fn has_admin(&self) -> RepoResult<bool>;
}

/// SQLite-backed profile repository.
pub struct SqliteProfileRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteProfileRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ProfileRepository for SqliteProfileRepository<'_> {
    fn get_profile(&self, principal: &Principal) -> RepoResult<Option<UserProfile>> {
        let profile = self
            .conn
            .query_row(
                "SELECT name, role FROM user_profiles WHERE principal = ?1;",
                [principal.as_str()],
                |row| {
                    Ok(UserProfile {
                        name: row.get(0)?,
                        role: row.get(1)?,
                    })
                },
            )
            .optional()?;
        Ok(profile)
    }

    fn save_profile(&self, principal: &Principal, profile: &UserProfile) -> RepoResult<()> {
        profile.validate()?;
        self.conn.execute(
            "INSERT INTO user_profiles (principal, name, role)
             VALUES (?1, ?2, ?3)
             ON CONFLICT (principal) DO UPDATE SET name = excluded.name, role = excluded.role;",
            params![principal.as_str(), profile.name.trim(), profile.role.trim()],
        )?;
        Ok(())
    }

    fn get_role(&self, principal: &Principal) -> RepoResult<Option<UserRole>> {
        let stored = self
            .conn
            .query_row(
                "SELECT role FROM user_roles WHERE principal = ?1;",
                [principal.as_str()],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        stored
            .map(|value| decode_enum(&value, "user_roles.role", UserRole::parse))
            .transpose()
    }

    fn set_role(&self, principal: &Principal, role: UserRole) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO user_roles (principal, role)
             VALUES (?1, ?2)
             ON CONFLICT (principal) DO UPDATE SET role = excluded.role;",
            params![principal.as_str(), role.as_str()],
        )?;
        Ok(())
    }

    fn has_admin(&self) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM user_roles WHERE role = 'admin');",
            [],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }
}
