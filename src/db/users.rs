//! User directory operations.
//!
//! Covers the whole account lifecycle this system has: self-registration
//! (member role, unapproved), the admin approval gate, lookups for login and
//! display, and password rotation. Accounts are never deleted.

use crate::db::db::Db;
use crate::libs::auth;
use crate::libs::config::Config;
use crate::libs::messages::Message;
use crate::libs::session::Session;
use crate::libs::user::{NewUser, Role, User, UserRow};
use crate::{msg_bail_anyhow, msg_debug, msg_error_anyhow, msg_success};
use anyhow::Result;
use rusqlite::{params, OptionalExtension, Row};
use std::str::FromStr;

/// Seed credentials for the bootstrap admin. A publicly documented default,
/// not a secret; rotate it through [`Users::set_password`] after first login.
pub const DEFAULT_ADMIN_USERNAME: &str = "admin";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

const USER_COLUMNS: &str = "id, username, password_hash, full_name, email, phone, role, department_id, approved, created_at";

const INSERT_USER: &str = "INSERT INTO users (username, password_hash, full_name, email, phone, role, department_id, approved)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)";
const SELECT_ADMIN_EXISTS: &str = "SELECT id FROM users WHERE role = 'admin' LIMIT 1";
const SELECT_DEPARTMENT_EXISTS: &str = "SELECT id FROM departments WHERE id = ?1";
const UPDATE_APPROVED: &str = "UPDATE users SET approved = 1 WHERE id = ?1";
const UPDATE_PASSWORD: &str = "UPDATE users SET password_hash = ?2 WHERE id = ?1";
const SELECT_DEPARTMENT_OF: &str = "SELECT department_id FROM users WHERE id = ?1";
const SELECT_APPROVED_WITH_DEPARTMENT: &str = "
    SELECT u.id, u.username, u.full_name, u.role, d.name
    FROM users u
    LEFT JOIN departments d ON u.department_id = d.id
    WHERE u.approved = 1
    ORDER BY u.id
";

/// User directory backed by the `users` table.
pub struct Users {
    db: Db,
}

impl Users {
    pub fn new() -> Result<Self> {
        let db = Db::new()?;
        Ok(Self { db })
    }

    pub fn with_db(db: Db) -> Self {
        Self { db }
    }

    /// Seeds the default admin account if no admin exists yet.
    ///
    /// Runs after migrations on every process start; at most one insert ever
    /// happens, so exactly one bootstrap admin is guaranteed. Returns whether
    /// this call created it. Configuration may override the seeded
    /// credentials.
    pub fn ensure_admin(&mut self) -> Result<bool> {
        let bootstrap = Config::read()?.bootstrap;
        let username = bootstrap
            .as_ref()
            .and_then(|b| b.admin_username.clone())
            .unwrap_or_else(|| DEFAULT_ADMIN_USERNAME.to_string());
        let password = bootstrap
            .as_ref()
            .and_then(|b| b.admin_password.clone())
            .unwrap_or_else(|| DEFAULT_ADMIN_PASSWORD.to_string());

        self.ensure_admin_with(&username, &password)
    }

    /// [`Users::ensure_admin`] with explicit seed credentials.
    pub fn ensure_admin_with(&mut self, username: &str, password: &str) -> Result<bool> {
        let existing: Option<i64> = self.db.conn.query_row(SELECT_ADMIN_EXISTS, [], |row| row.get(0)).optional()?;
        if existing.is_some() {
            return Ok(false);
        }

        let password_hash = auth::hash_password(password)?;
        self.db.conn.execute(
            INSERT_USER,
            params![username, password_hash, "Default Admin", "admin@taskdesk.local", "", Role::Admin.as_str(), None::<i64>, true],
        )?;

        msg_success!(Message::DefaultAdminCreated(username.to_string()));
        Ok(true)
    }

    /// Registers a new account: member role, unapproved.
    ///
    /// A duplicate username is reported as a distinct "already exists"
    /// error; a supplied department must exist. Returns the new user id.
    pub fn register(&mut self, new_user: &NewUser) -> Result<i64> {
        if new_user.username.trim().is_empty() {
            msg_bail_anyhow!(Message::EmptyUsername);
        }
        if new_user.password.is_empty() {
            msg_bail_anyhow!(Message::EmptyPassword);
        }
        if let Some(department_id) = new_user.department_id {
            let exists: Option<i64> = self
                .db
                .conn
                .query_row(SELECT_DEPARTMENT_EXISTS, params![department_id], |row| row.get(0))
                .optional()?;
            if exists.is_none() {
                msg_bail_anyhow!(Message::DepartmentNotFound(department_id));
            }
        }

        let password_hash = auth::hash_password(&new_user.password)?;
        let inserted = self.db.conn.execute(
            INSERT_USER,
            params![
                new_user.username,
                password_hash,
                new_user.full_name,
                new_user.email,
                new_user.phone,
                Role::Member.as_str(),
                new_user.department_id,
                false
            ],
        );

        match inserted {
            Ok(_) => Ok(self.db.conn.last_insert_rowid()),
            Err(rusqlite::Error::SqliteFailure(e, _)) if e.code == rusqlite::ErrorCode::ConstraintViolation => {
                Err(msg_error_anyhow!(Message::UsernameTaken(new_user.username.clone())))
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn find_by_username(&mut self, username: &str) -> Result<Option<User>> {
        self.db
            .conn
            .query_row(
                &format!("SELECT {} FROM users WHERE username = ?1", USER_COLUMNS),
                params![username],
                Self::map_user,
            )
            .optional()
            .map_err(Into::into)
    }

    pub fn get_by_id(&mut self, id: i64) -> Result<Option<User>> {
        self.db
            .conn
            .query_row(&format!("SELECT {} FROM users WHERE id = ?1", USER_COLUMNS), params![id], Self::map_user)
            .optional()
            .map_err(Into::into)
    }

    /// All accounts still waiting for approval, oldest first.
    pub fn pending(&mut self) -> Result<Vec<User>> {
        let mut stmt = self
            .db
            .conn
            .prepare(&format!("SELECT {} FROM users WHERE approved = 0 ORDER BY id", USER_COLUMNS))?;
        let user_iter = stmt.query_map([], Self::map_user)?;

        let mut users = Vec::new();
        for user in user_iter {
            users.push(user?);
        }
        Ok(users)
    }

    /// Approves an account; admin only.
    ///
    /// Unknown ids are a no-op, and approving twice is harmless.
    pub fn approve(&mut self, session: &Session, user_id: i64) -> Result<()> {
        session.require_admin()?;

        let affected = self.db.conn.execute(UPDATE_APPROVED, params![user_id])?;
        if affected > 0 {
            msg_debug!(Message::UserApproved(user_id));
        }
        Ok(())
    }

    /// Approved users joined with their department name for directory views.
    pub fn approved_with_department(&mut self) -> Result<Vec<UserRow>> {
        let mut stmt = self.db.conn.prepare(SELECT_APPROVED_WITH_DEPARTMENT)?;
        let row_iter = stmt.query_map([], |row| {
            Ok(UserRow {
                id: row.get(0)?,
                username: row.get(1)?,
                full_name: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                role: Self::parse_role(row, 3)?,
                department: row.get(4)?,
            })
        })?;

        let mut users = Vec::new();
        for user in row_iter {
            users.push(user?);
        }
        Ok(users)
    }

    /// Department of a user, `None` when the user is unknown or unassigned.
    pub fn department_of(&mut self, user_id: i64) -> Result<Option<i64>> {
        let department: Option<Option<i64>> = self
            .db
            .conn
            .query_row(SELECT_DEPARTMENT_OF, params![user_id], |row| row.get(0))
            .optional()?;
        Ok(department.flatten())
    }

    /// Replaces a user's password; the account owner or an admin.
    ///
    /// This is the rotation path for the documented bootstrap credentials.
    pub fn set_password(&mut self, session: &Session, user_id: i64, new_password: &str) -> Result<()> {
        if session.user_id != user_id {
            session.require_admin()?;
        }
        if new_password.is_empty() {
            msg_bail_anyhow!(Message::EmptyPassword);
        }

        let password_hash = auth::hash_password(new_password)?;
        let affected = self.db.conn.execute(UPDATE_PASSWORD, params![user_id, password_hash])?;
        if affected == 0 {
            msg_bail_anyhow!(Message::UserNotFound(user_id));
        }
        Ok(())
    }

    fn map_user(row: &Row) -> rusqlite::Result<User> {
        Ok(User {
            id: Some(row.get(0)?),
            username: row.get(1)?,
            password_hash: row.get(2)?,
            full_name: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
            email: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
            phone: row.get::<_, Option<String>>(5)?.unwrap_or_default(),
            role: Self::parse_role(row, 6)?,
            department_id: row.get(7)?,
            approved: row.get(8)?,
            created_at: row.get(9)?,
        })
    }

    fn parse_role(row: &Row, idx: usize) -> rusqlite::Result<Role> {
        let raw: String = row.get(idx)?;
        Role::from_str(&raw).map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e)))
    }
}
