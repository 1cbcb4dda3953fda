#[cfg(test)]
mod tests {
    use rusqlite::Connection;
    use std::time::Duration;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};
    use todos::db::db::Db;
    use todos::db::migrations::{get_db_version, get_migration_history, needs_migration, MigrationManager};

    struct MigrationContext {
        temp_dir: TempDir,
    }

    impl TestContext for MigrationContext {
        fn setup() -> Self {
            MigrationContext {
                temp_dir: tempfile::tempdir().unwrap(),
            }
        }
    }

    impl MigrationContext {
        fn raw_db(&self) -> Db {
            Db::new_without_migrations(self.temp_dir.path().join("todos.db"), Duration::from_millis(500)).unwrap()
        }
    }

    fn index_names(conn: &Connection) -> Vec<String> {
        let mut stmt = conn
            .prepare("SELECT name FROM sqlite_master WHERE type = 'index' AND tbl_name = 'tasks' AND name LIKE 'idx_%' ORDER BY name")
            .unwrap();
        stmt.query_map([], |row| row.get(0)).unwrap().collect::<Result<Vec<String>, _>>().unwrap()
    }

    #[test_context(MigrationContext)]
    #[test]
    fn test_new_database_reports_pending(ctx: &mut MigrationContext) {
        let conn = ctx.raw_db().connect().unwrap();
        assert_eq!(get_db_version(&conn).unwrap(), 0);
        assert!(needs_migration(&conn).unwrap());
    }

    #[test_context(MigrationContext)]
    #[test]
    fn test_open_migrates_to_latest(ctx: &mut MigrationContext) {
        let db = Db::open(ctx.temp_dir.path().join("todos.db")).unwrap();
        let conn = db.connect().unwrap();

        assert_eq!(get_db_version(&conn).unwrap(), MigrationManager::new().latest_version());
        assert!(!needs_migration(&conn).unwrap());
        assert_eq!(
            index_names(&conn),
            vec![
                "idx_tasks_category",
                "idx_tasks_created_at",
                "idx_tasks_due_date",
                "idx_tasks_priority",
                "idx_tasks_status",
            ]
        );
    }

    #[test_context(MigrationContext)]
    #[test]
    fn test_reopening_does_not_reapply(ctx: &mut MigrationContext) {
        let path = ctx.temp_dir.path().join("todos.db");
        Db::open(&path).unwrap();
        Db::open(&path).unwrap();

        let conn = Db::open(&path).unwrap().connect().unwrap();
        let history = get_migration_history(&conn).unwrap();
        let versions: Vec<u32> = history.iter().map(|(v, _, _)| *v).collect();
        assert_eq!(versions, vec![1, 2, 3]);
        assert!(history.iter().all(|(_, _, applied_at)| !applied_at.is_empty()));
    }

    #[test_context(MigrationContext)]
    #[test]
    fn test_manager_reports_applied_versions(ctx: &mut MigrationContext) {
        let manager = MigrationManager::new();
        let mut conn = ctx.raw_db().connect().unwrap();
        assert!(!manager.is_migration_applied(&conn, 1).unwrap());

        manager.run_migrations(&mut conn).unwrap();
        assert!(manager.is_migration_applied(&conn, 1).unwrap());
        assert!(manager.is_migration_applied(&conn, 3).unwrap());
        assert!(!manager.is_migration_applied(&conn, 4).unwrap());
    }

    #[test_context(MigrationContext)]
    #[test]
    fn test_schema_rejects_out_of_range_priority(ctx: &mut MigrationContext) {
        let conn = Db::open(ctx.temp_dir.path().join("todos.db")).unwrap().connect().unwrap();
        let result = conn.execute(
            "INSERT INTO tasks (title, priority, created_at, updated_at) VALUES ('x', 7, '2024-06-10 00:00:00', '2024-06-10 00:00:00')",
            [],
        );
        assert!(result.is_err());
    }
}
