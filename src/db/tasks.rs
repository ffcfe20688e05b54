//! Task repository.
//!
//! Creation validates at write time instead of persisting inconsistent
//! rows: dates must be ordered and the assignee must be an approved account
//! in the task's department. Listings that join display fields use LEFT
//! joins uniformly, so rows with unresolvable references are retained with
//! empty fields rather than dropped.

use crate::db::db::Db;
use crate::libs::messages::Message;
use crate::libs::session::Session;
use crate::libs::task::{NewTask, Priority, Task, TaskRow, TaskStatus, TaskUpdate};
use crate::{msg_bail_anyhow, msg_debug};
use anyhow::Result;
use rusqlite::{params, OptionalExtension, Row};
use std::collections::HashMap;
use std::str::FromStr;

// New tasks always enter the board in 'To Do'.
const INSERT_TASK: &str = "INSERT INTO tasks (title, description, priority, status, start_date, due_date, assigned_to, created_by, department_id)
    VALUES (?1, ?2, ?3, 'To Do', ?4, ?5, ?6, ?7, ?8)";
const SELECT_ALL_TASKS: &str = "
    SELECT t.id, t.title, t.description, t.priority, t.status, t.start_date, t.due_date,
           u.username, d.name
    FROM tasks t
    LEFT JOIN users u ON t.assigned_to = u.id
    LEFT JOIN departments d ON t.department_id = d.id
    ORDER BY t.id
";
const SELECT_TASKS_FOR_USER: &str = "
    SELECT id, title, description, priority, status, start_date, due_date,
           assigned_to, created_by, department_id, created_at
    FROM tasks
    WHERE assigned_to = ?1
    ORDER BY id
";
const UPDATE_TASK: &str = "UPDATE tasks SET status = ?2, priority = ?3 WHERE id = ?1";
const SELECT_SUMMARY: &str = "SELECT status, COUNT(*) FROM tasks GROUP BY status";
const SELECT_SUMMARY_FOR_DEPARTMENT: &str = "SELECT status, COUNT(*) FROM tasks WHERE department_id = ?1 GROUP BY status";
const SELECT_ASSIGNEE: &str = "SELECT approved, department_id FROM users WHERE id = ?1";
const SELECT_DEPARTMENT_EXISTS: &str = "SELECT id FROM departments WHERE id = ?1";

/// Task repository backed by the `tasks` table.
pub struct Tasks {
    db: Db,
}

impl Tasks {
    pub fn new() -> Result<Self> {
        let db = Db::new()?;
        Ok(Self { db })
    }

    pub fn with_db(db: Db) -> Self {
        Self { db }
    }

    /// Creates a task; admin or manager only.
    ///
    /// Status is forced to `To Do` and `created_by` is taken from the
    /// session. Rejected before touching the table: empty title, a due date
    /// before the start date, an unknown department, and an assignee that is
    /// missing, unapproved, or assigned to a different department. Returns
    /// the new task id.
    pub fn create(&mut self, session: &Session, task: &NewTask) -> Result<i64> {
        session.require_manager()?;

        if task.title.trim().is_empty() {
            msg_bail_anyhow!(Message::EmptyTaskTitle);
        }
        if task.due_date < task.start_date {
            msg_bail_anyhow!(Message::DueBeforeStart(task.due_date.to_string(), task.start_date.to_string()));
        }

        let department: Option<i64> = self
            .db
            .conn
            .query_row(SELECT_DEPARTMENT_EXISTS, params![task.department_id], |row| row.get(0))
            .optional()?;
        if department.is_none() {
            msg_bail_anyhow!(Message::DepartmentNotFound(task.department_id));
        }

        let assignee: Option<(bool, Option<i64>)> = self
            .db
            .conn
            .query_row(SELECT_ASSIGNEE, params![task.assigned_to], |row| Ok((row.get(0)?, row.get(1)?)))
            .optional()?;
        match assignee {
            None => msg_bail_anyhow!(Message::AssigneeNotFound(task.assigned_to)),
            Some((false, _)) => msg_bail_anyhow!(Message::AssigneeNotApproved(task.assigned_to)),
            Some((true, Some(department_id))) if department_id != task.department_id => {
                msg_bail_anyhow!(Message::AssigneeOutsideDepartment(task.assigned_to, task.department_id))
            }
            Some(_) => {}
        }

        self.db.conn.execute(
            INSERT_TASK,
            params![
                task.title,
                task.description,
                task.priority.as_str(),
                task.start_date,
                task.due_date,
                task.assigned_to,
                session.user_id,
                task.department_id
            ],
        )?;

        msg_debug!(Message::TaskCreated(task.title.clone()));
        Ok(self.db.conn.last_insert_rowid())
    }

    /// Every task joined with assignee username and department name.
    pub fn list_all(&mut self) -> Result<Vec<TaskRow>> {
        let mut stmt = self.db.conn.prepare(SELECT_ALL_TASKS)?;
        let row_iter = stmt.query_map([], |row| {
            Ok(TaskRow {
                id: row.get(0)?,
                title: row.get(1)?,
                description: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                priority: Self::parse_priority(row, 3)?,
                status: Self::parse_status(row, 4)?,
                start_date: row.get(5)?,
                due_date: row.get(6)?,
                assignee: row.get(7)?,
                department: row.get(8)?,
            })
        })?;

        let mut tasks = Vec::new();
        for task in row_iter {
            tasks.push(task?);
        }
        Ok(tasks)
    }

    /// Tasks assigned to one user, unjoined.
    pub fn list_for_user(&mut self, user_id: i64) -> Result<Vec<Task>> {
        let mut stmt = self.db.conn.prepare(SELECT_TASKS_FOR_USER)?;
        let task_iter = stmt.query_map(params![user_id], Self::map_task)?;

        let mut tasks = Vec::new();
        for task in task_iter {
            tasks.push(task?);
        }
        Ok(tasks)
    }

    /// Applies a batch of status/priority edits atomically; admin or
    /// manager only.
    ///
    /// The whole batch runs in one transaction: an unknown task id fails it
    /// and nothing is applied. Statuses have no transition order, so any
    /// value may replace any other. Returns the number of updated rows.
    pub fn save_updates(&mut self, session: &Session, updates: &[TaskUpdate]) -> Result<usize> {
        session.require_manager()?;

        let tx = self.db.conn.transaction()?;
        let mut affected = 0;
        for update in updates {
            let n = tx.execute(UPDATE_TASK, params![update.id, update.status.as_str(), update.priority.as_str()])?;
            if n == 0 {
                msg_bail_anyhow!(Message::TaskNotFound(update.id));
            }
            affected += n;
        }
        tx.commit()?;

        msg_debug!(Message::TasksUpdated(affected));
        Ok(affected)
    }

    /// Task counts grouped by status over the whole board.
    ///
    /// Statuses with no tasks are absent from the map; the present values
    /// sum to the total task count.
    pub fn summary(&mut self) -> Result<HashMap<TaskStatus, i64>> {
        self.collect_summary(SELECT_SUMMARY, [])
    }

    /// Task counts grouped by status for one department.
    pub fn summary_for_department(&mut self, department_id: i64) -> Result<HashMap<TaskStatus, i64>> {
        self.collect_summary(SELECT_SUMMARY_FOR_DEPARTMENT, params![department_id])
    }

    fn collect_summary<P: rusqlite::Params>(&mut self, sql: &str, params: P) -> Result<HashMap<TaskStatus, i64>> {
        let mut stmt = self.db.conn.prepare(sql)?;
        let pair_iter = stmt.query_map(params, |row| Ok((Self::parse_status(row, 0)?, row.get::<_, i64>(1)?)))?;

        let mut summary = HashMap::new();
        for pair in pair_iter {
            let (status, count) = pair?;
            summary.insert(status, count);
        }
        Ok(summary)
    }

    fn map_task(row: &Row) -> rusqlite::Result<Task> {
        Ok(Task {
            id: Some(row.get(0)?),
            title: row.get(1)?,
            description: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
            priority: Self::parse_priority(row, 3)?,
            status: Self::parse_status(row, 4)?,
            start_date: row.get(5)?,
            due_date: row.get(6)?,
            assigned_to: row.get(7)?,
            created_by: row.get(8)?,
            department_id: row.get(9)?,
            created_at: row.get(10)?,
        })
    }

    fn parse_priority(row: &Row, idx: usize) -> rusqlite::Result<Priority> {
        let raw: String = row.get(idx)?;
        Priority::from_str(&raw).map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e)))
    }

    fn parse_status(row: &Row, idx: usize) -> rusqlite::Result<TaskStatus> {
        let raw: String = row.get(idx)?;
        TaskStatus::from_str(&raw).map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e)))
    }
}
