use serde::{Deserialize, Serialize};

use super::error::FieldError;
use super::result::ValidationResult;

// ============================================================================
// Validation Context - request-scoped error/status accumulator
// ============================================================================
//
// One context is created per inbound request and passed by `&mut` through
// every use case and collaborator taking part in that request. It is never
// shared across requests and carries no internal locking.
//
// ============================================================================

/// Terminal status of a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationStatus {
    Ok,
    NotFound,
    Invalid,
    Conflict,
}

impl ValidationStatus {
    /// Response code the boundary layer should answer with
    pub fn http_status_code(&self) -> u16 {
        match self {
            ValidationStatus::Ok => 200,
            ValidationStatus::NotFound => 404,
            ValidationStatus::Invalid => 422,
            ValidationStatus::Conflict => 409,
        }
    }
}

#[derive(Debug, Default)]
pub struct ValidationContext {
    errors: Vec<FieldError>,
    status: Option<ValidationStatus>,
}

impl ValidationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulated errors in insertion order
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// `None` until some layer records a terminal status
    pub fn status(&self) -> Option<ValidationStatus> {
        self.status
    }

    /// Last write wins
    pub fn set_status(&mut self, status: ValidationStatus) {
        self.status = Some(status);
    }

    pub fn add_notification(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    pub fn add_error(&mut self, error: FieldError) {
        self.errors.push(error);
    }

    pub fn add_errors<I>(&mut self, errors: I)
    where
        I: IntoIterator<Item = FieldError>,
    {
        self.errors.extend(errors);
    }

    pub fn add_result(&mut self, result: &ValidationResult) {
        self.errors.extend(result.errors().iter().cloned());
    }
}
