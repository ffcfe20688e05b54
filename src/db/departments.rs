use crate::db::db::Db;
use crate::libs::department::Department;
use crate::libs::messages::Message;
use crate::libs::session::Session;
use crate::msg_debug;
use anyhow::Result;
use rusqlite::{params, OptionalExtension};

const INSERT_DEPARTMENT: &str = "INSERT OR IGNORE INTO departments (name) VALUES (?1)";
const SELECT_ALL_DEPARTMENTS: &str = "SELECT id, name FROM departments ORDER BY id";
const SELECT_DEPARTMENT_BY_ID: &str = "SELECT id, name FROM departments WHERE id = ?1";

/// Department directory.
///
/// Departments are append-only: admins create them and everything else
/// references them by id.
pub struct Departments {
    db: Db,
}

impl Departments {
    pub fn new() -> Result<Self> {
        let db = Db::new()?;
        Ok(Self { db })
    }

    pub fn with_db(db: Db) -> Self {
        Self { db }
    }

    /// Creates a department; admin only.
    ///
    /// The unique name uses insert-or-ignore semantics: creating a name that
    /// already exists is a no-op success. The return value says whether a
    /// row was actually inserted.
    pub fn create(&mut self, session: &Session, name: &str) -> Result<bool> {
        session.require_admin()?;

        let inserted = self.db.conn.execute(INSERT_DEPARTMENT, params![name])? > 0;
        if inserted {
            msg_debug!(Message::DepartmentCreated(name.to_string()));
        } else {
            msg_debug!(Message::DepartmentAlreadyExists(name.to_string()));
        }
        Ok(inserted)
    }

    /// All departments in insertion (id) order.
    pub fn list(&mut self) -> Result<Vec<Department>> {
        let mut stmt = self.db.conn.prepare(SELECT_ALL_DEPARTMENTS)?;
        let department_iter = stmt.query_map([], |row| {
            Ok(Department {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })?;

        let mut departments = Vec::new();
        for department in department_iter {
            departments.push(department?);
        }
        Ok(departments)
    }

    pub fn get_by_id(&mut self, id: i64) -> Result<Option<Department>> {
        self.db
            .conn
            .query_row(SELECT_DEPARTMENT_BY_ID, params![id], |row| {
                Ok(Department {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })
            .optional()
            .map_err(Into::into)
    }
}
