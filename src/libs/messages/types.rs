/// Every user-facing message the crate can emit.
///
/// Errors are raised through these variants as well, so each failure mode
/// keeps a single, matchable wording defined in one place (`display.rs`).
#[derive(Debug, Clone)]
pub enum Message {
    // === MIGRATION MESSAGES ===
    MigrationsFound(usize),
    RunningMigration(u32, String),
    MigrationCompleted(u32),
    MigrationFailed(u32, String),
    AllMigrationsCompleted,
    NothingToRollback,
    RollingBack(u32, u32),
    RollbackCompleted(u32),

    // === BOOTSTRAP MESSAGES ===
    DefaultAdminCreated(String),

    // === DIRECTORY MESSAGES ===
    DepartmentCreated(String),
    DepartmentAlreadyExists(String),
    DepartmentNotFound(i64),
    UsernameTaken(String),
    UserNotFound(i64),
    UserApproved(i64),
    EmptyUsername,
    EmptyPassword,

    // === AUTH MESSAGES ===
    AccountNotApproved,
    PermissionDenied(String), // required role
    PasswordHashFailed(String),

    // === TASK MESSAGES ===
    TaskCreated(String),
    TasksUpdated(usize),
    TaskNotFound(i64),
    EmptyTaskTitle,
    DueBeforeStart(String, String), // due, start
    AssigneeNotFound(i64),
    AssigneeNotApproved(i64),
    AssigneeOutsideDepartment(i64, i64), // user, department
}
