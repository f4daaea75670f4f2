//! Error types for the task API client.
//!
//! # Design
//! `NotFound` and `Rejected` get dedicated variants because callers branch
//! on "no such task" and "the server refused this input" far more often than
//! on any other status. Every other non-success response lands in `Http` with
//! the raw status and body.

use crate::types::ErrorBody;

/// Errors returned by `TaskClient` build and parse methods.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The server returned 404: the task does not exist.
    #[error("resource not found")]
    NotFound,

    /// The server returned 400 with a structured error body.
    #[error("request rejected: {}", .0.message)]
    Rejected(ErrorBody),

    /// Any other unexpected status.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The response body could not be decoded into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be encoded as JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl ClientError {
    /// Field-level details of a `Rejected` error, empty otherwise.
    pub fn field_errors(&self) -> &[crate::types::FieldError] {
        match self {
            ClientError::Rejected(body) => body.details.as_deref().unwrap_or_default(),
            _ => &[],
        }
    }
}
