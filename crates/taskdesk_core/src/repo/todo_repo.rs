//! To-do repository contract and SQLite implementation.

use crate::model::identity::Principal;
use crate::model::todo::{ToDoId, ToDoItem, ToDoItemCreate, ToDoItemUpdate};
use crate::model::Time;
use crate::repo::{bool_to_int, decode_id, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

const TODO_SELECT_SQL: &str = "SELECT
    id,
    owner,
    title,
    description,
    due_date,
    completed,
    created_at,
    modified_at
FROM todos";

/// Repository interface for owner-scoped to-do items.
pub trait ToDoRepository {
    fn create_todo(&self, owner: &Principal, item: &ToDoItemCreate, now: Time) -> RepoResult<ToDoId>;
    fn get_todo(&self, id: ToDoId) -> RepoResult<Option<ToDoItem>>;
    /// Items of one owner ordered by creation time.
    fn list_todos_by_owner(&self, owner: &Principal) -> RepoResult<Vec<ToDoItem>>;
    fn update_todo(&self, id: ToDoId, update: &ToDoItemUpdate, now: Time) -> RepoResult<()>;
    fn delete_todo(&self, id: ToDoId) -> RepoResult<()>;
}

/// SQLite-backed to-do repository.
pub struct SqliteToDoRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteToDoRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ToDoRepository for SqliteToDoRepository<'_> {
    fn create_todo(&self, owner: &Principal, item: &ToDoItemCreate, now: Time) -> RepoResult<ToDoId> {
        item.validate()?;
        self.conn.execute(
            "INSERT INTO todos (owner, title, description, due_date, completed, created_at, modified_at)
             VALUES (?1, ?2, ?3, ?4, 0, ?5, ?5);",
            params![
                owner.as_str(),
                item.title.trim(),
                item.description.as_deref(),
                item.due_date,
                now,
            ],
        )?;
        decode_id(self.conn.last_insert_rowid(), "todos.id")
    }

    fn get_todo(&self, id: ToDoId) -> RepoResult<Option<ToDoItem>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TODO_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_todo_row(row)?));
        }
        Ok(None)
    }

    fn list_todos_by_owner(&self, owner: &Principal) -> RepoResult<Vec<ToDoItem>> {
        let mut stmt = self.conn.prepare(&format!(
            "{TODO_SELECT_SQL} WHERE owner = ?1 ORDER BY created_at ASC, id ASC;"
        ))?;
        let mut rows = stmt.query([owner.as_str()])?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(parse_todo_row(row)?);
        }
        Ok(items)
    }

    fn update_todo(&self, id: ToDoId, update: &ToDoItemUpdate, now: Time) -> RepoResult<()> {
        update.validate()?;
        let changed = self.conn.execute(
            "UPDATE todos
             SET
                title = ?1,
                description = ?2,
                due_date = ?3,
                completed = ?4,
                modified_at = ?5
             WHERE id = ?6;",
            params![
                update.title.trim(),
                update.description.as_deref(),
                update.due_date,
                bool_to_int(update.completed),
                now,
                id,
            ],
        )?;
        if changed == 0 {
            return Err(RepoError::not_found("to-do", id));
        }
        Ok(())
    }

    fn delete_todo(&self, id: ToDoId) -> RepoResult<()> {
        let changed = self.conn.execute("DELETE FROM todos WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::not_found("to-do", id));
        }
        Ok(())
    }
}

fn parse_todo_row(row: &Row<'_>) -> RepoResult<ToDoItem> {
    let completed = match row.get::<_, i64>("completed")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid completed value `{other}` in todos.completed"
            )));
        }
    };

    Ok(ToDoItem {
        id: decode_id(row.get("id")?, "todos.id")?,
        owner: Principal::new(row.get::<_, String>("owner")?),
        title: row.get("title")?,
        description: row.get("description")?,
        due_date: row.get("due_date")?,
        completed,
        created_at: row.get("created_at")?,
        modified_at: row.get("modified_at")?,
    })
}
