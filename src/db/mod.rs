//! Database layer for the taskdesk crate.
//!
//! Provides the data persistence layer built on SQLite: connection
//! management, a versioned migration system, and one repository module per
//! entity. Each repository struct owns its own connection and performs
//! self-contained round trips; the only multi-statement sequence (bulk task
//! edits) runs inside a single transaction.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use taskdesk::db::{self, tasks::Tasks, users::Users};
//!
//! db::bootstrap()?;
//! let pending = Users::new()?.pending()?;
//! let summary = Tasks::new()?.summary()?;
//! # anyhow::Ok(())
//! ```

use anyhow::Result;

/// Core database connection and initialization module.
///
/// Provides the `Db` struct that opens SQLite connections, enables foreign
/// keys, and applies pending migrations.
pub mod db;

/// Database schema migration system.
///
/// Handles versioned schema changes and tracks migration history.
pub mod migrations;

/// Department directory operations.
pub mod departments;

/// User directory operations: registration, approval, and lookups.
pub mod users;

/// Task repository: creation, listings, bulk edits, and status summaries.
pub mod tasks;

/// Initializes the store for a new process: applies pending migrations and
/// seeds the default admin account if no admin exists yet.
///
/// Safe to call on every start; both steps are no-ops once done.
pub fn bootstrap() -> Result<()> {
    let _db = db::Db::new()?;
    users::Users::new()?.ensure_admin()?;
    Ok(())
}
