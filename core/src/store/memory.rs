use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::TaskStore;
use crate::error::StoreError;
use crate::task::{NewTask, Task, TaskId};

#[derive(Debug, Default)]
struct Inner {
    tasks: BTreeMap<TaskId, Task>,
    last_id: TaskId,
}

/// Process-local task store. Ids start at 1 and are never reused.
#[derive(Debug, Default)]
pub struct MemoryTaskStore {
    inner: RwLock<Inner>,
}

impl MemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskStore for MemoryTaskStore {
    async fn insert(&self, task: NewTask) -> Result<TaskId, StoreError> {
        let mut inner = self.inner.write().await;
        inner.last_id += 1;
        let id = inner.last_id;
        inner.tasks.insert(id, task.with_id(id));
        Ok(id)
    }

    async fn find_by_id(&self, id: TaskId) -> Result<Option<Task>, StoreError> {
        Ok(self.inner.read().await.tasks.get(&id).cloned())
    }

    async fn list_all_ordered_by_created_at_desc(&self) -> Result<Vec<Task>, StoreError> {
        let mut tasks: Vec<Task> = self.inner.read().await.tasks.values().cloned().collect();
        tasks.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(tasks)
    }

    async fn update(&self, task: &Task) -> Result<(), StoreError> {
        if let Some(stored) = self.inner.write().await.tasks.get_mut(&task.id) {
            *stored = task.clone();
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: TaskId) -> Result<bool, StoreError> {
        Ok(self.inner.write().await.tasks.remove(&id).is_some())
    }

    async fn delete_all(&self) -> Result<u64, StoreError> {
        let mut inner = self.inner.write().await;
        let removed = inner.tasks.len() as u64;
        inner.tasks.clear();
        Ok(removed)
    }
}
