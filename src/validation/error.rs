use serde::{Deserialize, Serialize};

// ============================================================================
// Field-level validation error
// ============================================================================

/// A single `(field, message)` pair produced by a validation rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    field: String,
    message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_as_field_message_pair() {
        let error = FieldError::new("name", "must not be blank");
        let json = serde_json::to_value(&error).unwrap();

        assert_eq!(json, serde_json::json!({ "field": "name", "message": "must not be blank" }));
    }
}
