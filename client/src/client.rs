//! Stateless HTTP request builder and response parser for the task API.
//!
//! # Design
//! `TaskClient` holds only a `base_url`. Each endpoint is split into a
//! `build_*` method that produces an `HttpRequest` and a `parse_*` method
//! that consumes an `HttpResponse`, so the I/O boundary stays with the
//! caller and everything here is deterministic.

use serde::de::DeserializeOwned;

use crate::error::ClientError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{CreateTask, ErrorBody, Health, Task};

/// Synchronous, stateless client for the task API.
#[derive(Debug, Clone)]
pub struct TaskClient {
    base_url: String,
}

impl TaskClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn request(&self, method: HttpMethod, path: &str) -> HttpRequest {
        HttpRequest {
            method,
            path: format!("{}{path}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_list_tasks(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "/tasks")
    }

    pub fn build_get_task(&self, id: i64) -> HttpRequest {
        self.request(HttpMethod::Get, &format!("/tasks/{id}"))
    }

    pub fn build_create_task(&self, input: &CreateTask) -> Result<HttpRequest, ClientError> {
        let body =
            serde_json::to_string(input).map_err(|e| ClientError::Serialization(e.to_string()))?;
        let mut request = self.request(HttpMethod::Post, "/tasks");
        request
            .headers
            .push(("content-type".to_string(), "application/json".to_string()));
        request.body = Some(body);
        Ok(request)
    }

    /// Toggling carries no body; the server flips whatever state it holds.
    pub fn build_toggle_task(&self, id: i64) -> HttpRequest {
        self.request(HttpMethod::Put, &format!("/tasks/{id}/toggle"))
    }

    pub fn build_delete_task(&self, id: i64) -> HttpRequest {
        self.request(HttpMethod::Delete, &format!("/tasks/{id}"))
    }

    pub fn build_health(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "/health")
    }

    pub fn parse_list_tasks(&self, response: HttpResponse) -> Result<Vec<Task>, ClientError> {
        check_status(&response, 200)?;
        decode(&response.body)
    }

    pub fn parse_get_task(&self, response: HttpResponse) -> Result<Task, ClientError> {
        check_status(&response, 200)?;
        decode(&response.body)
    }

    pub fn parse_create_task(&self, response: HttpResponse) -> Result<Task, ClientError> {
        check_status(&response, 201)?;
        decode(&response.body)
    }

    pub fn parse_toggle_task(&self, response: HttpResponse) -> Result<Task, ClientError> {
        check_status(&response, 200)?;
        decode(&response.body)
    }

    pub fn parse_delete_task(&self, response: HttpResponse) -> Result<(), ClientError> {
        check_status(&response, 204)?;
        Ok(())
    }

    pub fn parse_health(&self, response: HttpResponse) -> Result<Health, ClientError> {
        check_status(&response, 200)?;
        decode(&response.body)
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ClientError> {
    serde_json::from_str(body).map_err(|e| ClientError::Deserialization(e.to_string()))
}

/// Map non-success status codes to the matching `ClientError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ClientError> {
    match response.status {
        status if status == expected => Ok(()),
        404 => Err(ClientError::NotFound),
        400 => match serde_json::from_str::<ErrorBody>(&response.body) {
            Ok(body) => Err(ClientError::Rejected(body)),
            Err(_) => Err(ClientError::Http {
                status: 400,
                body: response.body.clone(),
            }),
        },
        status => Err(ClientError::Http {
            status,
            body: response.body.clone(),
        }),
    }
}
