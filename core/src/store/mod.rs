//! Persistence gateway for task records.
//!
//! # Design
//! `TaskService` only ever talks to a `TaskStore` trait object, so the
//! SQLite-backed store used in production and the in-memory store used in
//! tests are interchangeable. Stores never apply partial updates: `update`
//! writes the whole record it is given.

mod memory;
mod sqlite;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::task::{NewTask, Task, TaskId};

pub use memory::MemoryTaskStore;
pub use sqlite::SqliteTaskStore;

#[async_trait]
pub trait TaskStore: Send + Sync + 'static {
    /// Persist a new record and return the id assigned to it.
    async fn insert(&self, task: NewTask) -> Result<TaskId, StoreError>;

    async fn find_by_id(&self, id: TaskId) -> Result<Option<Task>, StoreError>;

    /// All records, newest `created_at` first. Equal timestamps fall back to
    /// the higher id first.
    async fn list_all_ordered_by_created_at_desc(&self) -> Result<Vec<Task>, StoreError>;

    /// Overwrite the stored record with the same id. Absent ids are ignored.
    async fn update(&self, task: &Task) -> Result<(), StoreError>;

    /// Remove a record. Returns whether it existed.
    async fn delete_by_id(&self, id: TaskId) -> Result<bool, StoreError>;

    /// Remove every record and return how many were removed.
    async fn delete_all(&self) -> Result<u64, StoreError>;
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration, TimeZone, Utc};

    use super::*;

    fn instant(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    fn new_task(title: &str, created_secs: i64) -> NewTask {
        NewTask::pending(title.to_string(), None, instant(created_secs))
    }

    async fn sqlite_store() -> SqliteTaskStore {
        let store = SqliteTaskStore::in_memory().await.unwrap();
        store.ensure_schema().await.unwrap();
        store
    }

    async fn insert_and_find(store: &dyn TaskStore) {
        let input = NewTask::pending(
            "Buy milk".to_string(),
            Some("two litres".to_string()),
            instant(0) + Duration::nanoseconds(123_456_789),
        );
        let id = store.insert(input.clone()).await.unwrap();

        let found = store.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(found, input.with_id(id));
        assert!(store.find_by_id(id + 1).await.unwrap().is_none());
    }

    async fn ids_are_unique_and_not_reused(store: &dyn TaskStore) {
        let first = store.insert(new_task("a", 0)).await.unwrap();
        let second = store.insert(new_task("b", 1)).await.unwrap();
        assert_ne!(first, second);

        assert!(store.delete_by_id(second).await.unwrap());
        let third = store.insert(new_task("c", 2)).await.unwrap();
        assert!(third > second);
    }

    async fn list_orders_newest_first(store: &dyn TaskStore) {
        assert!(store.list_all_ordered_by_created_at_desc().await.unwrap().is_empty());

        let old = store.insert(new_task("old", 0)).await.unwrap();
        let newest = store.insert(new_task("newest", 20)).await.unwrap();
        let tie_a = store.insert(new_task("tie a", 10)).await.unwrap();
        let tie_b = store.insert(new_task("tie b", 10)).await.unwrap();

        let ids: Vec<TaskId> = store
            .list_all_ordered_by_created_at_desc()
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, [newest, tie_b, tie_a, old]);
    }

    async fn update_writes_whole_record(store: &dyn TaskStore) {
        let id = store.insert(new_task("toggle me", 0)).await.unwrap();
        let mut task = store.find_by_id(id).await.unwrap().unwrap();
        task.toggle(instant(5));
        store.update(&task).await.unwrap();

        let stored = store.find_by_id(id).await.unwrap().unwrap();
        assert!(stored.is_completed);
        assert_eq!(stored.completed_at, Some(instant(5)));

        task.toggle(instant(6));
        store.update(&task).await.unwrap();
        let stored = store.find_by_id(id).await.unwrap().unwrap();
        assert!(!stored.is_completed);
        assert!(stored.completed_at.is_none());
    }

    async fn delete_only_touches_target(store: &dyn TaskStore) {
        let keep = store.insert(new_task("keep", 0)).await.unwrap();
        let gone = store.insert(new_task("drop", 1)).await.unwrap();
        let before = store.find_by_id(keep).await.unwrap();

        assert!(store.delete_by_id(gone).await.unwrap());
        assert!(!store.delete_by_id(gone).await.unwrap());
        assert!(store.find_by_id(gone).await.unwrap().is_none());
        assert_eq!(store.find_by_id(keep).await.unwrap(), before);
    }

    async fn delete_all_empties_store(store: &dyn TaskStore) {
        store.insert(new_task("a", 0)).await.unwrap();
        store.insert(new_task("b", 1)).await.unwrap();

        assert_eq!(store.delete_all().await.unwrap(), 2);
        assert!(store.list_all_ordered_by_created_at_desc().await.unwrap().is_empty());
        assert_eq!(store.delete_all().await.unwrap(), 0);
    }

    macro_rules! store_contract {
        ($($name:ident),* $(,)?) => {
            mod memory_contract {
                use super::*;
                $(
                    #[tokio::test]
                    async fn $name() {
                        super::$name(&MemoryTaskStore::new()).await;
                    }
                )*
            }

            mod sqlite_contract {
                use super::*;
                $(
                    #[tokio::test]
                    async fn $name() {
                        super::$name(&sqlite_store().await).await;
                    }
                )*
            }
        };
    }

    store_contract!(
        insert_and_find,
        ids_are_unique_and_not_reused,
        list_orders_newest_first,
        update_writes_whole_record,
        delete_only_touches_target,
        delete_all_empties_store,
    );
}
