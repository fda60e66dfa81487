//! Task repository contract and SQLite implementation.
//!
//! # Invariants
//! - Captains are stored in `task_captains` keyed by position and are always
//!   replaced as a whole set together with the task row.
//! - Listing order is `created_at ASC, id ASC` unless a caller re-sorts.

use crate::model::enums::{PaymentStatus, Recurrence, TaskStatus, TaskType};
use crate::model::identity::Principal;
use crate::model::task::{Task, TaskId};
use crate::repo::{decode_amount, decode_enum, decode_id, encode_amount, RepoError, RepoResult};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const TASK_SELECT_SQL: &str = "SELECT
    id,
    title,
    client_id,
    client_name,
    task_type,
    sub_type,
    status,
    payment_status,
    recurring,
    assigned_to,
    assigned_name,
    comment,
    bill,
    advance_received,
    outstanding_amount,
    due_date,
    assignment_date,
    manual_assignment_date,
    completion_date,
    created_at
FROM tasks";

/// Query options for listing tasks. Absent fields do not constrain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskListQuery {
    pub status: Option<TaskStatus>,
    pub task_type: Option<TaskType>,
    /// Restricts the result to these ids; an empty list matches nothing.
    pub ids: Option<Vec<TaskId>>,
}

/// Repository interface for task persistence.
pub trait TaskRepository {
    fn create_task(&self, task: &Task) -> RepoResult<TaskId>;
    /// Inserts all tasks in one transaction; nothing is written on failure.
    fn create_tasks(&self, tasks: &[Task]) -> RepoResult<Vec<TaskId>>;
    fn update_task(&self, task: &Task) -> RepoResult<()>;
    /// Updates all tasks in one transaction; any missing id aborts the batch.
    fn update_tasks(&self, tasks: &[Task]) -> RepoResult<()>;
    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>>;
    fn list_tasks(&self, query: &TaskListQuery) -> RepoResult<Vec<Task>>;
    fn delete_task(&self, id: TaskId) -> RepoResult<()>;
    /// Deletes all ids in one transaction; any missing id aborts the batch.
    fn delete_tasks(&self, ids: &[TaskId]) -> RepoResult<()>;
}

/// SQLite-backed task repository.
pub struct SqliteTaskRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaskRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn insert(&self, task: &Task) -> RepoResult<TaskId> {
        task.validate()?;
        let advance_received = encode_amount(task.advance_received, "advance received")?;
        let outstanding_amount = encode_amount(task.outstanding_amount, "outstanding amount")?;
        self.conn.execute(
            "INSERT INTO tasks (
                title,
                client_id,
                client_name,
                task_type,
                sub_type,
                status,
                payment_status,
                recurring,
                assigned_to,
                assigned_name,
                comment,
                bill,
                advance_received,
                outstanding_amount,
                due_date,
                assignment_date,
                manual_assignment_date,
                completion_date,
                created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19);",
            params![
                task.title.trim(),
                task.client_id,
                task.client_name.trim(),
                task.task_type.as_str(),
                task.sub_type.as_deref(),
                task.status.as_str(),
                task.payment_status.as_str(),
                task.recurring.as_str(),
                task.assigned_to.as_str(),
                task.assigned_name.as_str(),
                task.comment.as_deref(),
                task.bill.as_deref(),
                advance_received,
                outstanding_amount,
                task.due_date,
                task.assignment_date,
                task.manual_assignment_date,
                task.completion_date,
                task.created_at,
            ],
        )?;
        let id = decode_id(self.conn.last_insert_rowid(), "tasks.id")?;
        self.replace_captains(id, &task.captains)?;
        Ok(id)
    }

    fn update(&self, task: &Task) -> RepoResult<()> {
        task.validate()?;
        let advance_received = encode_amount(task.advance_received, "advance received")?;
        let outstanding_amount = encode_amount(task.outstanding_amount, "outstanding amount")?;
        let changed = self.conn.execute(
            "UPDATE tasks
             SET
                title = ?1,
                client_id = ?2,
                client_name = ?3,
                task_type = ?4,
                sub_type = ?5,
                status = ?6,
                payment_status = ?7,
                recurring = ?8,
                assigned_to = ?9,
                assigned_name = ?10,
                comment = ?11,
                bill = ?12,
                advance_received = ?13,
                outstanding_amount = ?14,
                due_date = ?15,
                assignment_date = ?16,
                manual_assignment_date = ?17,
                completion_date = ?18
             WHERE id = ?19;",
            params![
                task.title.trim(),
                task.client_id,
                task.client_name.trim(),
                task.task_type.as_str(),
                task.sub_type.as_deref(),
                task.status.as_str(),
                task.payment_status.as_str(),
                task.recurring.as_str(),
                task.assigned_to.as_str(),
                task.assigned_name.as_str(),
                task.comment.as_deref(),
                task.bill.as_deref(),
                advance_received,
                outstanding_amount,
                task.due_date,
                task.assignment_date,
                task.manual_assignment_date,
                task.completion_date,
                task.id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::not_found("task", task.id));
        }
        self.replace_captains(task.id, &task.captains)
    }

    fn delete(&self, id: TaskId) -> RepoResult<()> {
        let changed = self.conn.execute("DELETE FROM tasks WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::not_found("task", id));
        }
        Ok(())
    }

    fn replace_captains(&self, task_id: TaskId, captains: &[Principal]) -> RepoResult<()> {
        self.conn
            .execute("DELETE FROM task_captains WHERE task_id = ?1;", [task_id])?;
        let mut stmt = self.conn.prepare(
            "INSERT INTO task_captains (task_id, position, principal) VALUES (?1, ?2, ?3);",
        )?;
        for (position, captain) in captains.iter().enumerate() {
            stmt.execute(params![task_id, position as i64, captain.as_str()])?;
        }
        Ok(())
    }

    fn load_captains(&self, task_id: TaskId) -> RepoResult<Vec<Principal>> {
        let mut stmt = self.conn.prepare(
            "SELECT principal FROM task_captains WHERE task_id = ?1 ORDER BY position ASC;",
        )?;
        let captains = stmt
            .query_map([task_id], |row| row.get::<_, String>(0))?
            .map(|value| value.map(Principal::new))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(captains)
    }

    fn with_captains(&self, mut task: Task) -> RepoResult<Task> {
        task.captains = self.load_captains(task.id)?;
        Ok(task)
    }
}

impl TaskRepository for SqliteTaskRepository<'_> {
    fn create_task(&self, task: &Task) -> RepoResult<TaskId> {
        let tx = self.conn.unchecked_transaction()?;
        let id = self.insert(task)?;
        tx.commit()?;
        Ok(id)
    }

    fn create_tasks(&self, tasks: &[Task]) -> RepoResult<Vec<TaskId>> {
        let tx = self.conn.unchecked_transaction()?;
        let ids = tasks
            .iter()
            .map(|task| self.insert(task))
            .collect::<RepoResult<Vec<_>>>()?;
        tx.commit()?;
        Ok(ids)
    }

    fn update_task(&self, task: &Task) -> RepoResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        self.update(task)?;
        tx.commit()?;
        Ok(())
    }

    fn update_tasks(&self, tasks: &[Task]) -> RepoResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        for task in tasks {
            self.update(task)?;
        }
        tx.commit()?;
        Ok(())
    }

    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TASK_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        let task = match rows.next()? {
            Some(row) => parse_task_row(row)?,
            None => return Ok(None),
        };
        Ok(Some(self.with_captains(task)?))
    }

    fn list_tasks(&self, query: &TaskListQuery) -> RepoResult<Vec<Task>> {
        if query.ids.as_ref().is_some_and(Vec::is_empty) {
            return Ok(Vec::new());
        }

        let mut sql = format!("{TASK_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(status) = query.status {
            sql.push_str(" AND status = ?");
            bind_values.push(Value::Text(status.as_str().to_string()));
        }
        if let Some(kind) = query.task_type {
            sql.push_str(" AND task_type = ?");
            bind_values.push(Value::Text(kind.as_str().to_string()));
        }
        if let Some(ids) = &query.ids {
            let placeholders = vec!["?"; ids.len()].join(", ");
            sql.push_str(&format!(" AND id IN ({placeholders})"));
            bind_values.extend(ids.iter().map(|id| Value::Integer(i64::from(*id))));
        }
        sql.push_str(" ORDER BY created_at ASC, id ASC");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut tasks = Vec::new();
        while let Some(row) = rows.next()? {
            tasks.push(parse_task_row(row)?);
        }
        drop(rows);

        tasks
            .into_iter()
            .map(|task| self.with_captains(task))
            .collect()
    }

    fn delete_task(&self, id: TaskId) -> RepoResult<()> {
        self.delete(id)
    }

    fn delete_tasks(&self, ids: &[TaskId]) -> RepoResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        for id in ids {
            self.delete(*id)?;
        }
        tx.commit()?;
        Ok(())
    }
}

fn parse_task_row(row: &Row<'_>) -> RepoResult<Task> {
    let task_type: String = row.get("task_type")?;
    let status: String = row.get("status")?;
    let payment_status: String = row.get("payment_status")?;
    let recurring: String = row.get("recurring")?;
    let client_id: i64 = row.get("client_id")?;

    Ok(Task {
        id: decode_id(row.get("id")?, "tasks.id")?,
        title: row.get("title")?,
        client_id: decode_id(client_id, "tasks.client_id")?,
        client_name: row.get("client_name")?,
        task_type: decode_enum(&task_type, "tasks.task_type", TaskType::parse)?,
        sub_type: row.get("sub_type")?,
        status: decode_enum(&status, "tasks.status", TaskStatus::parse)?,
        payment_status: decode_enum(&payment_status, "tasks.payment_status", PaymentStatus::parse)?,
        recurring: decode_enum(&recurring, "tasks.recurring", Recurrence::parse)?,
        assigned_to: Principal::new(row.get::<_, String>("assigned_to")?),
        assigned_name: row.get("assigned_name")?,
        comment: row.get("comment")?,
        bill: row.get("bill")?,
        advance_received: decode_amount(row.get("advance_received")?, "tasks.advance_received")?,
        outstanding_amount: decode_amount(
            row.get("outstanding_amount")?,
            "tasks.outstanding_amount",
        )?,
        due_date: row.get("due_date")?,
        assignment_date: row.get("assignment_date")?,
        manual_assignment_date: row.get("manual_assignment_date")?,
        completion_date: row.get("completion_date")?,
        created_at: row.get("created_at")?,
        captains: Vec::new(),
    })
}
