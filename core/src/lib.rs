//! Domain core of the task list service.
//!
//! # Overview
//! Holds the `Task` entity, its transfer representations, input validation,
//! the `TaskStore` persistence gateway and the `TaskService` that applies
//! the business rules. Nothing here knows about HTTP.
//!
//! # Design
//! - `TaskService` is stateless: one service wraps one store handle and
//!   every call round-trips through the store.
//! - Stores are trait objects so tests can swap SQLite for memory.
//! - Not-found is an ordinary outcome (`Option` / `bool`), not an error.

pub mod error;
pub mod service;
pub mod store;
pub mod task;
pub mod validation;

pub use error::{StoreError, TaskError};
pub use service::TaskService;
pub use store::{MemoryTaskStore, SqliteTaskStore, TaskStore};
pub use task::{CreateTask, NewTask, Task, TaskId, TaskView};
pub use validation::{validate_create, FieldError, ValidationErrors};
