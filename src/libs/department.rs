use serde::{Deserialize, Serialize};

/// An organizational grouping of users and tasks.
///
/// Departments are created by admins and never updated or deleted in-app;
/// users and tasks reference them by id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Department {
    pub id: i64,
    pub name: String,
}
