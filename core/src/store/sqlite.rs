use std::str::FromStr;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::{debug, instrument};

use super::TaskStore;
use crate::error::StoreError;
use crate::task::{NewTask, Task, TaskId};

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS tasks (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    description TEXT NULL,
    is_completed INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL,
    completed_at TEXT NULL
)";

const CREATE_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_tasks_created_at ON tasks (created_at)";

/// Task store backed by a SQLite connection pool.
///
/// Timestamps are stored as RFC 3339 text in UTC, which sorts in
/// chronological order, so `ORDER BY created_at` needs no conversion.
#[derive(Debug, Clone)]
pub struct SqliteTaskStore {
    pool: SqlitePool,
}

impl SqliteTaskStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open a pool for `url`, creating the database file when it is missing.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;
        Ok(Self::new(pool))
    }

    /// A private in-memory database. The pool holds exactly one connection
    /// that is never recycled, since the data dies with it.
    pub async fn in_memory() -> Result<Self, StoreError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;
        Ok(Self::new(pool))
    }

    /// Create the `tasks` table and its index if they do not exist yet.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(CREATE_TABLE).execute(&self.pool).await?;
        sqlx::query(CREATE_INDEX).execute(&self.pool).await?;
        debug!("task schema ready");
        Ok(())
    }
}

#[async_trait]
impl TaskStore for SqliteTaskStore {
    #[instrument(skip_all)]
    async fn insert(&self, task: NewTask) -> Result<TaskId, StoreError> {
        let result = sqlx::query(
            "INSERT INTO tasks (title, description, is_completed, created_at, completed_at) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(task.title)
        .bind(task.description)
        .bind(task.is_completed)
        .bind(task.created_at)
        .bind(task.completed_at)
        .execute(&self.pool)
        .await?;
        Ok(result.last_insert_rowid())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: TaskId) -> Result<Option<Task>, StoreError> {
        let task = sqlx::query_as::<_, Task>(
            "SELECT id, title, description, is_completed, created_at, completed_at \
             FROM tasks WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(task)
    }

    #[instrument(skip(self))]
    async fn list_all_ordered_by_created_at_desc(&self) -> Result<Vec<Task>, StoreError> {
        let tasks = sqlx::query_as::<_, Task>(
            "SELECT id, title, description, is_completed, created_at, completed_at \
             FROM tasks ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(tasks)
    }

    #[instrument(skip(self, task), fields(id = task.id))]
    async fn update(&self, task: &Task) -> Result<(), StoreError> {
        sqlx::query(
            "UPDATE tasks SET title = ?, description = ?, is_completed = ?, \
             created_at = ?, completed_at = ? WHERE id = ?",
        )
        .bind(task.title.as_str())
        .bind(task.description.as_deref())
        .bind(task.is_completed)
        .bind(task.created_at)
        .bind(task.completed_at)
        .bind(task.id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_by_id(&self, id: TaskId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn delete_all(&self) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM tasks").execute(&self.pool).await?;
        Ok(result.rows_affected())
    }
}
