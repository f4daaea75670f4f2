//! Error types for the task core.
//!
//! # Design
//! Absence is not an error here: lookups return `Option` and deletes return
//! `bool`. What remains are input that fails validation and store failures,
//! which propagate unrecovered to the caller.

use crate::validation::ValidationErrors;

/// Failures raised by a `TaskStore` implementation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Errors returned by `TaskService` operations.
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    /// The input broke one or more field rules; nothing was persisted.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    Store(#[from] StoreError),
}
