#[cfg(test)]
mod tests {
    use taskdesk::db::db::Db;
    use taskdesk::db::migrations::{get_db_version, needs_migration, MigrationManager};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct MigrationTestContext {
        temp_dir: TempDir,
    }

    impl TestContext for MigrationTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            MigrationTestContext { temp_dir }
        }
    }

    impl MigrationTestContext {
        fn db_path(&self) -> std::path::PathBuf {
            self.temp_dir.path().join("taskdesk.db")
        }
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_migrations_run_on_open(ctx: &mut MigrationTestContext) {
        // Opening a fresh database applies every migration
        let db = Db::open(ctx.db_path()).unwrap();

        let version = get_db_version(&db.conn).unwrap();
        assert!(version > 0);
        assert!(!needs_migration(&db.conn).unwrap());
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_migration_history(ctx: &mut MigrationTestContext) {
        let mut conn = Db::open_without_migrations(ctx.db_path()).unwrap();
        let manager = MigrationManager::new();

        manager.run_migrations(&mut conn).unwrap();

        // Recorded versions are sequential from 1
        let history = manager.get_migration_history(&conn).unwrap();
        assert!(!history.is_empty());
        for (i, entry) in history.iter().enumerate() {
            assert_eq!(entry.0 as usize, i + 1);
        }
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_migration_idempotency(ctx: &mut MigrationTestContext) {
        let mut conn = Db::open_without_migrations(ctx.db_path()).unwrap();
        let manager = MigrationManager::new();

        manager.run_migrations(&mut conn).unwrap();
        let version1 = get_db_version(&conn).unwrap();

        manager.run_migrations(&mut conn).unwrap();
        let version2 = get_db_version(&conn).unwrap();

        assert_eq!(version1, version2);
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_core_tables_exist(ctx: &mut MigrationTestContext) {
        let db = Db::open(ctx.db_path()).unwrap();

        let count: i64 = db
            .conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN ('departments', 'users', 'tasks')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 3);
    }
}
