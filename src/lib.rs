//! # Taskdesk
//!
//! Role-based task tracking core: departments, account approval, task
//! assignment, and status summaries over a file-backed SQLite store.
//!
//! The crate is the persistence and aggregation layer of a small task
//! tracker. A UI process (whatever its framework) calls in with primitive
//! inputs and renders the plain rows and maps that come back; navigation and
//! widget state stay on the caller's side, represented here only by the
//! explicit [`libs::session::Session`] context passed to privileged
//! operations.
//!
//! ## Features
//!
//! - **Schema bootstrap**: Versioned migrations plus a seeded default admin
//! - **Account lifecycle**: Self-registration, admin approval, login
//! - **Directory**: Departments and user listings with joined display fields
//! - **Task management**: Creation with write-time validation, per-user and
//!   joined listings, atomic bulk status/priority edits
//! - **Dashboards**: Task counts grouped by status, global or per department
//!
//! ## Usage
//!
//! ```rust,no_run
//! use taskdesk::db::{self, departments::Departments, tasks::Tasks};
//! use taskdesk::libs::auth;
//!
//! fn main() -> anyhow::Result<()> {
//!     db::bootstrap()?;
//!     let session = auth::check_login("admin", "admin123")?.expect("seeded admin");
//!     Departments::new()?.create(&session, "Engineering")?;
//!     let summary = Tasks::new()?.summary()?;
//!     println!("{summary:?}");
//!     Ok(())
//! }
//! ```

pub mod db;
pub mod libs;
