use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Raised when a stored priority string does not name a known priority.
#[derive(Debug, thiserror::Error)]
#[error("unknown priority: {0}")]
pub struct ParsePriorityError(pub String);

/// Raised when a stored status string does not name a known status.
#[derive(Debug, thiserror::Error)]
#[error("unknown status: {0}")]
pub struct ParseStatusError(pub String);

/// Task urgency, stored as its display string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = ParsePriorityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "High" => Ok(Priority::High),
            "Medium" => Ok(Priority::Medium),
            "Low" => Ok(Priority::Low),
            other => Err(ParsePriorityError(other.to_string())),
        }
    }
}

/// Work progress state.
///
/// The three states are unordered: bulk edits may move a task between any
/// two of them, including back from `Done`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    ToDo,
    InProgress,
    Done,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::ToDo => "To Do",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Done => "Done",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "To Do" => Ok(TaskStatus::ToDo),
            "In Progress" => Ok(TaskStatus::InProgress),
            "Done" => Ok(TaskStatus::Done),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

/// A stored task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: Option<i64>,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub status: TaskStatus,
    pub start_date: NaiveDate,
    pub due_date: NaiveDate,
    pub assigned_to: i64,
    pub created_by: i64,
    pub department_id: i64,
    pub created_at: Option<String>,
}

/// Task creation payload.
///
/// Status is not caller-settable; new tasks always start in `To Do`, and
/// `created_by` comes from the session performing the insert.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub start_date: NaiveDate,
    pub due_date: NaiveDate,
    pub assigned_to: i64,
    pub department_id: i64,
}

/// Listing row: a task joined with its assignee username and department name.
///
/// Joins are LEFT joins throughout, so rows whose references no longer
/// resolve are retained with `None` fields rather than dropped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskRow {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub status: TaskStatus,
    pub start_date: NaiveDate,
    pub due_date: NaiveDate,
    pub assignee: Option<String>,
    pub department: Option<String>,
}

impl TaskRow {
    /// Assignee username for display; orphaned rows read as "Unassigned".
    pub fn assignee_label(&self) -> &str {
        self.assignee.as_deref().unwrap_or("Unassigned")
    }

    /// Department name for display; orphaned rows read as "No Department".
    pub fn department_label(&self) -> &str {
        self.department.as_deref().unwrap_or("No Department")
    }
}

/// One entry of a bulk status/priority edit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskUpdate {
    pub id: i64,
    pub status: TaskStatus,
    pub priority: Priority,
}
