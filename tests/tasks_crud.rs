#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use todos::db::{db::Db, tasks::TaskStore};
    use todos::libs::error::TaskError;
    use todos::libs::query::TaskQuery;
    use todos::libs::task::{Priority, TaskDraft, TaskForm, TaskStatus};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct StoreContext {
        _temp_dir: TempDir,
        store: TaskStore,
    }

    impl TestContext for StoreContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let store = TaskStore::open(temp_dir.path().join("todos.db")).unwrap();
            StoreContext {
                _temp_dir: temp_dir,
                store,
            }
        }
    }

    fn all(store: &TaskStore) -> Vec<i64> {
        let query = TaskQuery::new(NaiveDate::from_ymd_opt(2024, 6, 10).unwrap());
        store.list(&query).unwrap().iter().map(|t| t.id).collect()
    }

    #[test_context(StoreContext)]
    #[test]
    fn test_create_from_form_applies_defaults(ctx: &mut StoreContext) {
        let form = TaskForm {
            title: Some("Buy groceries".into()),
            priority: Some("".into()),
            category: Some("  ".into()),
            ..TaskForm::default()
        };
        let task = ctx.store.create(&form.validate().unwrap()).unwrap();

        assert_eq!(task.title, "Buy groceries");
        assert_eq!(task.priority, Priority::Medium);
        assert_eq!(task.category, "personal");
        assert_eq!(task.status, TaskStatus::Todo);
        assert!(!task.completed);
        assert_eq!(ctx.store.get(task.id).unwrap(), task);
    }

    #[test_context(StoreContext)]
    #[test]
    fn test_empty_title_leaves_store_unchanged(ctx: &mut StoreContext) {
        ctx.store.create(&TaskDraft::new("Existing")).unwrap();

        let form = TaskForm {
            title: Some("   ".into()),
            ..TaskForm::default()
        };
        assert!(matches!(form.validate(), Err(TaskError::Validation { field: "title", .. })));
        assert!(ctx.store.create(&TaskDraft::new("")).unwrap_err().is_validation());

        assert_eq!(ctx.store.count().unwrap(), 1);
    }

    #[test_context(StoreContext)]
    #[test]
    fn test_ids_increase_and_are_not_reused(ctx: &mut StoreContext) {
        let first = ctx.store.create(&TaskDraft::new("one")).unwrap();
        let second = ctx.store.create(&TaskDraft::new("two")).unwrap();
        assert!(second.id > first.id);

        ctx.store.delete(second.id).unwrap();
        let third = ctx.store.create(&TaskDraft::new("three")).unwrap();
        assert!(third.id > second.id);
    }

    #[test_context(StoreContext)]
    #[test]
    fn test_update_then_get_returns_edited_fields(ctx: &mut StoreContext) {
        let task = ctx.store.create(&TaskDraft::new("Plan trip")).unwrap();
        let draft = TaskDraft::new("Plan summer trip")
            .description("flights and hotel")
            .priority(Priority::Low)
            .category("travel")
            .status(TaskStatus::Doing)
            .due_date(NaiveDate::from_ymd_opt(2024, 7, 1));

        ctx.store.update(task.id, &draft).unwrap();
        let stored = ctx.store.get(task.id).unwrap();

        assert_eq!(stored.to_draft(), draft);
        assert_eq!(stored.completed, task.completed);
        assert_eq!(stored.created_at, task.created_at);
    }

    #[test_context(StoreContext)]
    #[test]
    fn test_update_missing_id_never_creates(ctx: &mut StoreContext) {
        let err = ctx.store.update(99, &TaskDraft::new("ghost")).unwrap_err();
        assert!(matches!(err, TaskError::NotFound(99)));
        assert_eq!(ctx.store.count().unwrap(), 0);
    }

    #[test_context(StoreContext)]
    #[test]
    fn test_update_validation_keeps_original(ctx: &mut StoreContext) {
        let task = ctx.store.create(&TaskDraft::new("Keep me")).unwrap();
        assert!(ctx.store.update(task.id, &TaskDraft::new(" ")).unwrap_err().is_validation());
        assert_eq!(ctx.store.get(task.id).unwrap(), task);
    }

    #[test_context(StoreContext)]
    #[test]
    fn test_toggle_twice_restores_completed(ctx: &mut StoreContext) {
        let task = ctx.store.create(&TaskDraft::new("Call mom")).unwrap();

        let once = ctx.store.toggle_completed(task.id).unwrap();
        assert!(once.completed);
        assert_eq!(once.status, task.status);
        assert!(once.updated_at >= task.updated_at);

        let twice = ctx.store.toggle_completed(task.id).unwrap();
        assert_eq!(twice.completed, task.completed);
        assert_eq!(twice.to_draft(), task.to_draft());
    }

    #[test_context(StoreContext)]
    #[test]
    fn test_delete_twice_reports_not_found(ctx: &mut StoreContext) {
        let keep = ctx.store.create(&TaskDraft::new("keep")).unwrap();
        let gone = ctx.store.create(&TaskDraft::new("gone")).unwrap();

        ctx.store.delete(gone.id).unwrap();
        assert!(ctx.store.delete(gone.id).unwrap_err().is_not_found());
        assert!(ctx.store.get(gone.id).unwrap_err().is_not_found());

        assert_eq!(all(&ctx.store), vec![keep.id]);
    }

    #[test_context(StoreContext)]
    #[test]
    fn test_data_survives_reopen(ctx: &mut StoreContext) {
        let path = ctx._temp_dir.path().join("todos.db");
        let task = ctx.store.create(&TaskDraft::new("Persist me")).unwrap();

        let reopened = TaskStore::open(&path).unwrap();
        assert_eq!(reopened.get(task.id).unwrap(), task);
    }

    #[test]
    fn test_storage_failure_rolls_back_and_store_recovers() {
        let temp_dir = tempfile::tempdir().unwrap();
        let db = Db::open(temp_dir.path().join("todos.db")).unwrap();
        db.connect()
            .unwrap()
            .execute_batch(
                "CREATE TRIGGER fail_insert AFTER INSERT ON tasks WHEN NEW.title = 'explode'
                 BEGIN SELECT RAISE(ABORT, 'boom'); END;
                 CREATE TRIGGER fail_update AFTER UPDATE ON tasks
                 WHEN NEW.title = 'explode' OR OLD.category = 'frozen'
                 BEGIN SELECT RAISE(ABORT, 'boom'); END;
                 CREATE TRIGGER fail_delete BEFORE DELETE ON tasks WHEN OLD.category = 'frozen'
                 BEGIN SELECT RAISE(ABORT, 'boom'); END;",
            )
            .unwrap();
        let store = TaskStore::new(&db).unwrap();

        let task = store.create(&TaskDraft::new("Pay rent")).unwrap();
        let frozen = store
            .create(&TaskDraft {
                category: "frozen".into(),
                ..TaskDraft::new("Archive")
            })
            .unwrap();

        let err = store.create(&TaskDraft::new("explode")).unwrap_err();
        assert!(matches!(err, TaskError::Storage(_)));
        assert_eq!(store.count().unwrap(), 2);

        let err = store.update(task.id, &TaskDraft::new("explode")).unwrap_err();
        assert!(matches!(err, TaskError::Storage(_)));
        assert_eq!(store.get(task.id).unwrap(), task);

        let err = store.toggle_completed(frozen.id).unwrap_err();
        assert!(matches!(err, TaskError::Storage(_)));
        assert_eq!(store.get(frozen.id).unwrap(), frozen);

        let err = store.delete(frozen.id).unwrap_err();
        assert!(matches!(err, TaskError::Storage(_)));
        assert_eq!(store.get(frozen.id).unwrap(), frozen);
        assert_eq!(store.count().unwrap(), 2);

        let next = store.create(&TaskDraft::new("Call plumber")).unwrap();
        assert_eq!(store.get(next.id).unwrap().title, "Call plumber");
        assert_eq!(store.count().unwrap(), 3);
    }
}
