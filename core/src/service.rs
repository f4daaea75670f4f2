//! Business rules for tasks.
//!
//! # Design
//! `TaskService` wraps one `TaskStore` handle and keeps nothing else between
//! calls. Every mutation reads the current record, changes it in memory and
//! writes it back whole. Validation always runs before the store is touched.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, instrument};

use crate::error::TaskError;
use crate::store::{MemoryTaskStore, TaskStore};
use crate::task::{CreateTask, NewTask, TaskId, TaskView};
use crate::validation::validate_create;

#[derive(Clone)]
pub struct TaskService {
    store: Arc<dyn TaskStore>,
}

impl TaskService {
    pub fn new(store: Arc<dyn TaskStore>) -> Self {
        Self { store }
    }

    /// A service over a fresh `MemoryTaskStore`.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryTaskStore::new()))
    }

    /// Every task, most recently created first.
    #[instrument(skip(self))]
    pub async fn list_all(&self) -> Result<Vec<TaskView>, TaskError> {
        let tasks = self.store.list_all_ordered_by_created_at_desc().await?;
        debug!(count = tasks.len(), "listed tasks");
        Ok(tasks.into_iter().map(TaskView::from).collect())
    }

    /// `None` when no task has this id.
    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: TaskId) -> Result<Option<TaskView>, TaskError> {
        Ok(self.store.find_by_id(id).await?.map(TaskView::from))
    }

    /// Validate `input` and persist a new, incomplete task.
    #[instrument(skip_all)]
    pub async fn create(&self, input: CreateTask) -> Result<TaskView, TaskError> {
        validate_create(&input)?;

        let CreateTask { title, description } = input;
        let task = NewTask::pending(title.unwrap_or_default(), description, Utc::now());
        let id = self.store.insert(task.clone()).await?;
        info!(id, "task created");
        Ok(task.with_id(id).into())
    }

    /// Flip completion. `completed_at` is stamped when the task becomes
    /// complete and cleared when it becomes incomplete again.
    #[instrument(skip(self))]
    pub async fn toggle_status(&self, id: TaskId) -> Result<Option<TaskView>, TaskError> {
        let Some(mut task) = self.store.find_by_id(id).await? else {
            return Ok(None);
        };
        task.toggle(Utc::now());
        self.store.update(&task).await?;
        info!(id, completed = task.is_completed, "task toggled");
        Ok(Some(task.into()))
    }

    /// Remove a task permanently. Returns `false` when it did not exist.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: TaskId) -> Result<bool, TaskError> {
        let deleted = self.store.delete_by_id(id).await?;
        if deleted {
            info!(id, "task deleted");
        }
        Ok(deleted)
    }

    /// Remove every task. Returns how many were removed.
    #[instrument(skip(self))]
    pub async fn reset(&self) -> Result<u64, TaskError> {
        let removed = self.store.delete_all().await?;
        info!(removed, "task store reset");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::SqliteTaskStore;

    fn assert_completion_invariant(view: &TaskView) {
        assert_eq!(
            view.completed_at.is_some(),
            view.is_completed,
            "completedAt must be set exactly when the task is completed: {view:?}"
        );
    }

    #[tokio::test]
    async fn create_returns_fresh_incomplete_task() {
        let service = TaskService::in_memory();

        let before = Utc::now();
        let view = service.create(CreateTask::new("Buy milk")).await.unwrap();
        let after = Utc::now();

        assert_eq!(view.id, 1);
        assert_eq!(view.title, "Buy milk");
        assert!(view.description.is_none());
        assert!(!view.is_completed);
        assert!(view.completed_at.is_none());
        assert!(before <= view.created_at && view.created_at <= after);
    }

    #[tokio::test]
    async fn create_keeps_description() {
        let service = TaskService::in_memory();
        let view = service
            .create(CreateTask::new("Walk dog").with_description("around the park"))
            .await
            .unwrap();
        assert_eq!(view.description.as_deref(), Some("around the park"));
        assert_eq!(service.get_by_id(view.id).await.unwrap(), Some(view));
    }

    #[tokio::test]
    async fn invalid_input_persists_nothing() {
        let service = TaskService::in_memory();

        for input in [
            CreateTask::default(),
            CreateTask::new(""),
            CreateTask::new("   "),
            CreateTask::new("x".repeat(201)),
            CreateTask::new("ok").with_description("x".repeat(1001)),
        ] {
            let err = service.create(input).await.unwrap_err();
            assert!(matches!(err, TaskError::Validation(_)), "{err:?}");
        }

        assert!(service.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_title_reports_title_required() {
        let service = TaskService::in_memory();
        let TaskError::Validation(errors) = service.create(CreateTask::default()).await.unwrap_err()
        else {
            panic!("expected a validation error");
        };
        assert_eq!(errors.errors()[0].field, "title");
        assert_eq!(errors.errors()[0].message, "title required");
    }

    #[tokio::test]
    async fn list_is_empty_then_newest_first() {
        let service = TaskService::in_memory();
        assert!(service.list_all().await.unwrap().is_empty());

        let first = service.create(CreateTask::new("first")).await.unwrap();
        let second = service.create(CreateTask::new("second")).await.unwrap();

        let ids: Vec<TaskId> = service.list_all().await.unwrap().iter().map(|t| t.id).collect();
        assert_eq!(ids, [second.id, first.id]);
    }

    #[tokio::test]
    async fn toggle_twice_round_trips() {
        let service = TaskService::in_memory();
        let created = service.create(CreateTask::new("Buy milk")).await.unwrap();

        let before = Utc::now();
        let done = service.toggle_status(created.id).await.unwrap().unwrap();
        let after = Utc::now();
        assert!(done.is_completed);
        let completed_at = done.completed_at.unwrap();
        assert!(before <= completed_at && completed_at <= after);
        assert_eq!(done.created_at, created.created_at);
        assert_completion_invariant(&done);

        let undone = service.toggle_status(created.id).await.unwrap().unwrap();
        assert!(!undone.is_completed);
        assert!(undone.completed_at.is_none());
        assert_completion_invariant(&undone);

        assert_eq!(service.get_by_id(created.id).await.unwrap(), Some(undone));
    }

    #[tokio::test]
    async fn absent_ids_are_not_found_outcomes() {
        let service = TaskService::in_memory();
        assert!(service.get_by_id(42).await.unwrap().is_none());
        assert!(service.toggle_status(42).await.unwrap().is_none());
        assert!(!service.delete(42).await.unwrap());
    }

    #[tokio::test]
    async fn delete_removes_only_the_target() {
        let service = TaskService::in_memory();
        let keep = service.create(CreateTask::new("keep")).await.unwrap();
        let gone = service.create(CreateTask::new("gone")).await.unwrap();
        let keep = service.toggle_status(keep.id).await.unwrap().unwrap();

        assert!(service.delete(gone.id).await.unwrap());
        assert!(service.get_by_id(gone.id).await.unwrap().is_none());
        assert_eq!(service.list_all().await.unwrap(), vec![keep]);
    }

    #[tokio::test]
    async fn reset_clears_everything() {
        let service = TaskService::in_memory();
        service.create(CreateTask::new("a")).await.unwrap();
        service.create(CreateTask::new("b")).await.unwrap();

        assert_eq!(service.reset().await.unwrap(), 2);
        assert!(service.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn buy_milk_scenario_on_sqlite() {
        let store = SqliteTaskStore::in_memory().await.unwrap();
        store.ensure_schema().await.unwrap();
        let service = TaskService::new(Arc::new(store));

        let created = service.create(CreateTask::new("Buy milk")).await.unwrap();
        assert_eq!(created.id, 1);
        assert_completion_invariant(&created);

        let done = service.toggle_status(1).await.unwrap().unwrap();
        assert!(done.is_completed);
        assert_completion_invariant(&done);

        let undone = service.toggle_status(1).await.unwrap().unwrap();
        assert!(!undone.is_completed);
        assert_completion_invariant(&undone);

        assert!(service.delete(1).await.unwrap());
        assert!(service.get_by_id(1).await.unwrap().is_none());
    }
}
