//! Input validation for task creation.
//!
//! Validation collects every violated rule instead of stopping at the first,
//! so callers can report all offending fields at once.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::task::CreateTask;

pub const TITLE_MAX_CHARS: usize = 200;
pub const DESCRIPTION_MAX_CHARS: usize = 1000;

/// A single rule violation tied to an input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Every violation found in one input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<FieldError> {
        self.errors
    }

    /// `Ok(())` when nothing was recorded, otherwise `Err(self)`.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", error.field, error.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Check a creation input against the title and description rules.
pub fn validate_create(input: &CreateTask) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    match input.title.as_deref() {
        None => errors.push("title", "title required"),
        Some(title) if title.trim().is_empty() => errors.push("title", "title required"),
        Some(title) if title.chars().count() > TITLE_MAX_CHARS => errors.push(
            "title",
            format!("title must be at most {TITLE_MAX_CHARS} characters"),
        ),
        Some(_) => {}
    }

    if let Some(description) = input.description.as_deref() {
        if description.chars().count() > DESCRIPTION_MAX_CHARS {
            errors.push(
                "description",
                format!("description must be at most {DESCRIPTION_MAX_CHARS} characters"),
            );
        }
    }

    errors.into_result()
}
