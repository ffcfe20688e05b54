use crate::db::migrations;
use crate::libs::config::Config;
use crate::libs::data_storage::DataStorage;
use anyhow::Result;
use rusqlite::Connection;
use std::path::Path;

/// Default database file name, overridable via `config.json`.
pub const DB_FILE_NAME: &str = "taskdesk.db";

/// A single SQLite connection with the schema brought up to date.
///
/// Every repository owns one `Db`. Opening a handle applies pending
/// migrations, so a freshly created database is immediately usable.
pub struct Db {
    pub conn: Connection,
}

impl Db {
    /// Opens the database at its platform data path.
    ///
    /// The file name defaults to [`DB_FILE_NAME`] unless the configuration
    /// overrides it.
    pub fn new() -> Result<Db> {
        let file_name = Config::read()?
            .database
            .and_then(|d| d.file)
            .unwrap_or_else(|| DB_FILE_NAME.to_string());
        let db_file_path = DataStorage::new().get_path(&file_name)?;
        Self::open(db_file_path)
    }

    /// Opens the database at an explicit path and applies migrations.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Db> {
        let mut conn = Self::open_without_migrations(path)?;
        migrations::init_with_migrations(&mut conn)?;
        Ok(Db { conn })
    }

    /// Opens a raw connection without running migrations.
    ///
    /// Foreign key enforcement is still switched on; SQLite leaves it off
    /// per connection by default.
    pub fn open_without_migrations<P: AsRef<Path>>(path: P) -> Result<Connection> {
        let conn = Connection::open(path)?;
        conn.pragma_update(None, "foreign_keys", true)?;
        Ok(conn)
    }
}
