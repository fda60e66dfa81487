//! Client repository contract and SQLite implementation.
//!
//! # Invariants
//! - An update rewrites `tasks.client_name` for the client's tasks in the
//!   same transaction, so task rows never show a stale client name.
//! - Batch updates and deletes are all-or-nothing.

use crate::model::client::{Client, ClientId};
use crate::model::enums::{ClientStatus, Recurrence, TaskType};
use crate::repo::{decode_enum, decode_id, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

const CLIENT_SELECT_SQL: &str = "SELECT
    id,
    name,
    contact_info,
    status,
    recurring,
    task_category,
    sub_category,
    gstin,
    pan
FROM clients";

/// Repository interface for client CRUD operations.
pub trait ClientRepository {
    fn create_client(&self, client: &Client) -> RepoResult<ClientId>;
    /// Inserts all clients in one transaction; nothing is written on failure.
    fn create_clients(&self, clients: &[Client]) -> RepoResult<Vec<ClientId>>;
    /// Returns the number of tasks whose client name was rewritten.
    fn update_client(&self, client: &Client) -> RepoResult<usize>;
    /// Updates all clients in one transaction; any missing id aborts the batch.
    fn update_clients(&self, clients: &[Client]) -> RepoResult<usize>;
    fn get_client(&self, id: ClientId) -> RepoResult<Option<Client>>;
    /// Case-insensitive lookup on the trimmed name.
    fn find_client_by_name(&self, name: &str) -> RepoResult<Option<Client>>;
    /// All clients ordered by name, then id.
    fn list_clients(&self) -> RepoResult<Vec<Client>>;
    fn delete_client(&self, id: ClientId) -> RepoResult<()>;
    /// Deletes all ids in one transaction; any missing id aborts the batch.
    fn delete_clients(&self, ids: &[ClientId]) -> RepoResult<()>;
}

/// SQLite-backed client repository.
pub struct SqliteClientRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteClientRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn insert(&self, client: &Client) -> RepoResult<ClientId> {
        client.validate()?;
        self.conn.execute(
            "INSERT INTO clients (
                name,
                contact_info,
                status,
                recurring,
                task_category,
                sub_category,
                gstin,
                pan
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8);",
            params![
                client.name.trim(),
                client.contact_info.as_str(),
                client.status.as_str(),
                client.recurring.as_str(),
                client.task_category.as_str(),
                client.sub_category.as_deref(),
                client.gstin.as_deref(),
                client.pan.as_deref(),
            ],
        )?;
        decode_id(self.conn.last_insert_rowid(), "clients.id")
    }

    fn update(&self, client: &Client) -> RepoResult<usize> {
        client.validate()?;
        let changed = self.conn.execute(
            "UPDATE clients
             SET
                name = ?1,
                contact_info = ?2,
                status = ?3,
                recurring = ?4,
                task_category = ?5,
                sub_category = ?6,
                gstin = ?7,
                pan = ?8
             WHERE id = ?9;",
            params![
                client.name.trim(),
                client.contact_info.as_str(),
                client.status.as_str(),
                client.recurring.as_str(),
                client.task_category.as_str(),
                client.sub_category.as_deref(),
                client.gstin.as_deref(),
                client.pan.as_deref(),
                client.id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::not_found("client", client.id));
        }
        let renamed = self.conn.execute(
            "UPDATE tasks SET client_name = ?1 WHERE client_id = ?2 AND client_name <> ?1;",
            params![client.name.trim(), client.id],
        )?;
        Ok(renamed)
    }

    fn delete(&self, id: ClientId) -> RepoResult<()> {
        let changed = self.conn.execute("DELETE FROM clients WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::not_found("client", id));
        }
        Ok(())
    }
}

impl ClientRepository for SqliteClientRepository<'_> {
    fn create_client(&self, client: &Client) -> RepoResult<ClientId> {
        self.insert(client)
    }

    fn create_clients(&self, clients: &[Client]) -> RepoResult<Vec<ClientId>> {
        let tx = self.conn.unchecked_transaction()?;
        let ids = clients
            .iter()
            .map(|client| self.insert(client))
            .collect::<RepoResult<Vec<_>>>()?;
        tx.commit()?;
        Ok(ids)
    }

    fn update_client(&self, client: &Client) -> RepoResult<usize> {
        let tx = self.conn.unchecked_transaction()?;
        let renamed = self.update(client)?;
        tx.commit()?;
        Ok(renamed)
    }

    fn update_clients(&self, clients: &[Client]) -> RepoResult<usize> {
        let tx = self.conn.unchecked_transaction()?;
        let mut renamed = 0;
        for client in clients {
            renamed += self.update(client)?;
        }
        tx.commit()?;
        Ok(renamed)
    }

    fn get_client(&self, id: ClientId) -> RepoResult<Option<Client>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CLIENT_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_client_row(row)?));
        }
        Ok(None)
    }

    fn find_client_by_name(&self, name: &str) -> RepoResult<Option<Client>> {
        let mut stmt = self.conn.prepare(&format!(
            "{CLIENT_SELECT_SQL}
             WHERE name = ?1 COLLATE NOCASE
             ORDER BY id ASC
             LIMIT 1;"
        ))?;
        let mut rows = stmt.query([name.trim()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_client_row(row)?));
        }
        Ok(None)
    }

    fn list_clients(&self) -> RepoResult<Vec<Client>> {
        let mut stmt = self.conn.prepare(&format!(
            "{CLIENT_SELECT_SQL} ORDER BY name COLLATE NOCASE ASC, id ASC;"
        ))?;
        let mut rows = stmt.query([])?;
        let mut clients = Vec::new();
        while let Some(row) = rows.next()? {
            clients.push(parse_client_row(row)?);
        }
        Ok(clients)
    }

    fn delete_client(&self, id: ClientId) -> RepoResult<()> {
        self.delete(id)
    }

    fn delete_clients(&self, ids: &[ClientId]) -> RepoResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        for id in ids {
            self.delete(*id)?;
        }
        tx.commit()?;
        Ok(())
    }
}

fn parse_client_row(row: &Row<'_>) -> RepoResult<Client> {
    let status: String = row.get("status")?;
    let recurring: String = row.get("recurring")?;
    let category: String = row.get("task_category")?;

    Ok(Client {
        id: decode_id(row.get("id")?, "clients.id")?,
        name: row.get("name")?,
        contact_info: row.get("contact_info")?,
        status: decode_enum(&status, "clients.status", ClientStatus::parse)?,
        recurring: decode_enum(&recurring, "clients.recurring", Recurrence::parse)?,
        task_category: decode_enum(&category, "clients.task_category", TaskType::parse)?,
        sub_category: row.get("sub_category")?,
        gstin: row.get("gstin")?,
        pan: row.get("pan")?,
    })
}
