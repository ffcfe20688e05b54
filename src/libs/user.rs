use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Raised when a stored role string does not name a known role.
#[derive(Debug, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(pub String);

/// Account role deciding which operations a session may perform.
///
/// Stored in the database as its lowercase display string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Manager,
    Member,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::Member => "member",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "manager" => Ok(Role::Manager),
            "member" => Ok(Role::Member),
            other => Err(ParseRoleError(other.to_string())),
        }
    }
}

/// A stored user account.
///
/// `password_hash` holds an Argon2id PHC string, never a plain password.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Option<i64>,
    pub username: String,
    pub password_hash: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub role: Role,
    pub department_id: Option<i64>,
    pub approved: bool,
    pub created_at: Option<String>,
}

/// Self-registration payload.
///
/// Registration always produces a member-role, unapproved account; role and
/// approval are not caller-settable.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub department_id: Option<i64>,
}

/// Directory listing row: an approved user joined with their department name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRow {
    pub id: i64,
    pub username: String,
    pub full_name: String,
    pub role: Role,
    pub department: Option<String>,
}

impl UserRow {
    /// Department name for display; users without one read as "No Department".
    pub fn department_label(&self) -> &str {
        self.department.as_deref().unwrap_or("No Department")
    }
}
