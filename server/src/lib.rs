//! HTTP surface of the task list service.
//!
//! # Design
//! Handlers are thin: they pull ids and bodies out of the request, call
//! `TaskService`, and map `None`/`false` to 404 and `TaskError` to the JSON
//! error body in `error`. All behavior lives in `task-core`.

pub mod config;
pub mod error;
pub mod telemetry;

use std::future::Future;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use task_core::{CreateTask, TaskId, TaskService, TaskView};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::error::ApiErrorResponse;

#[derive(Clone)]
pub struct AppState {
    pub tasks: TaskService,
    /// Whether `POST /test/reset` is served.
    pub reset_enabled: bool,
}

impl AppState {
    pub fn new(tasks: TaskService) -> Self {
        Self {
            tasks,
            reset_enabled: false,
        }
    }

    #[must_use]
    pub fn with_reset(mut self, enabled: bool) -> Self {
        self.reset_enabled = enabled;
        self
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ResetSummary {
    pub message: String,
    pub removed: u64,
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/tasks", get(list_tasks).post(create_task))
        .route("/tasks/{id}", get(get_task).delete(delete_task))
        .route("/tasks/{id}/toggle", put(toggle_task))
        .route("/health", get(health))
        .route("/test/reset", post(reset_tasks))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(listener: TcpListener, app: Router) -> Result<(), std::io::Error> {
    axum::serve(listener, app).await
}

/// Serve until `shutdown` resolves, then drain in-flight requests.
pub async fn run_until<F>(
    listener: TcpListener,
    app: Router,
    shutdown: F,
) -> Result<(), std::io::Error>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
}

async fn list_tasks(
    State(state): State<AppState>,
) -> Result<Json<Vec<TaskView>>, ApiErrorResponse> {
    Ok(Json(state.tasks.list_all().await?))
}

async fn get_task(
    State(state): State<AppState>,
    id: Result<Path<TaskId>, PathRejection>,
) -> Result<Json<TaskView>, ApiErrorResponse> {
    let Path(id) = id?;
    state
        .tasks
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiErrorResponse::task_not_found(id))
}

async fn create_task(
    State(state): State<AppState>,
    payload: Result<Json<CreateTask>, JsonRejection>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let Json(input) = payload?;
    let task = state.tasks.create(input).await?;
    let location = format!("/tasks/{}", task.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(task)))
}

async fn toggle_task(
    State(state): State<AppState>,
    id: Result<Path<TaskId>, PathRejection>,
) -> Result<Json<TaskView>, ApiErrorResponse> {
    let Path(id) = id?;
    state
        .tasks
        .toggle_status(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiErrorResponse::task_not_found(id))
}

async fn delete_task(
    State(state): State<AppState>,
    id: Result<Path<TaskId>, PathRejection>,
) -> Result<StatusCode, ApiErrorResponse> {
    let Path(id) = id?;
    if state.tasks.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiErrorResponse::task_not_found(id))
    }
}

async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "Healthy".to_string(),
        timestamp: Utc::now(),
    })
}

async fn reset_tasks(
    State(state): State<AppState>,
) -> Result<Json<ResetSummary>, ApiErrorResponse> {
    if !state.reset_enabled {
        return Err(ApiErrorResponse::not_found("reset endpoint is disabled"));
    }
    let removed = state.tasks.reset().await?;
    Ok(Json(ResetSummary {
        message: "database reset successfully".to_string(),
        removed,
    }))
}
