//! Human-readable text for every [`Message`] variant.
//!
//! Error variants double as the matchable wording of the corresponding
//! failures, so tests and callers can rely on these strings staying put.

use super::types::Message;
use std::fmt;

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            // === MIGRATION MESSAGES ===
            Message::MigrationsFound(count) => format!("Found {} pending migration(s)", count),
            Message::RunningMigration(version, name) => format!("Applying migration v{}: {}", version, name),
            Message::MigrationCompleted(version) => format!("Migration v{} applied", version),
            Message::MigrationFailed(version, error) => format!("Migration v{} failed: {}", version, error),
            Message::AllMigrationsCompleted => "Database schema is up to date".to_string(),
            Message::NothingToRollback => "Nothing to roll back".to_string(),
            Message::RollingBack(from, to) => format!("Rolling back from v{} to v{}", from, to),
            Message::RollbackCompleted(version) => format!("Rolled back to v{}", version),

            // === BOOTSTRAP MESSAGES ===
            Message::DefaultAdminCreated(username) => {
                format!("Default admin '{}' created with the documented password; change it after first login", username)
            }

            // === DIRECTORY MESSAGES ===
            Message::DepartmentCreated(name) => format!("Department '{}' created", name),
            Message::DepartmentAlreadyExists(name) => format!("Department '{}' already exists", name),
            Message::DepartmentNotFound(id) => format!("Department {} not found", id),
            Message::UsernameTaken(username) => format!("Username '{}' already exists", username),
            Message::UserNotFound(id) => format!("User {} not found", id),
            Message::UserApproved(id) => format!("User {} approved", id),
            Message::EmptyUsername => "Username must not be empty".to_string(),
            Message::EmptyPassword => "Password must not be empty".to_string(),

            // === AUTH MESSAGES ===
            Message::AccountNotApproved => "Account is not approved yet".to_string(),
            Message::PermissionDenied(role) => format!("Operation requires {} privileges", role),
            Message::PasswordHashFailed(error) => format!("Password hashing failed: {}", error),

            // === TASK MESSAGES ===
            Message::TaskCreated(title) => format!("Task '{}' created", title),
            Message::TasksUpdated(count) => format!("Updated {} task(s)", count),
            Message::TaskNotFound(id) => format!("Task {} not found", id),
            Message::EmptyTaskTitle => "Task title must not be empty".to_string(),
            Message::DueBeforeStart(due, start) => format!("Due date {} is before start date {}", due, start),
            Message::AssigneeNotFound(id) => format!("Assignee {} does not exist", id),
            Message::AssigneeNotApproved(id) => format!("Assignee {} is not an approved account", id),
            Message::AssigneeOutsideDepartment(user_id, department_id) => {
                format!("User {} does not belong to department {}", user_id, department_id)
            }
        };

        write!(f, "{}", text)
    }
}
