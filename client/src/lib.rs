//! Synchronous API client core for the task list service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). The caller executes the
//! HTTP round-trip, which keeps this crate deterministic and testable.
//!
//! # Design
//! - `TaskClient` is stateless and holds only `base_url`.
//! - Each endpoint is split into `build_*` (produces a request) and
//!   `parse_*` (consumes a response).
//! - DTOs are declared independently from `task-core`; integration tests
//!   catch schema drift.

pub mod client;
pub mod error;
pub mod http;
pub mod types;

pub use client::TaskClient;
pub use error::ClientError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use types::{CreateTask, ErrorBody, FieldError, Health, Task};
