use super::error::FieldError;

// ============================================================================
// Validation Result - immutable outcome of validating one entity snapshot
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    errors: Vec<FieldError>,
}

impl ValidationResult {
    pub fn new(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }

    pub fn valid() -> Self {
        Self::default()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_errors(self) -> Vec<FieldError> {
        self.errors
    }
}

/// Declarative rule list evaluated in call order.
///
/// Every rule that fails appends one error, so the resulting
/// [`ValidationResult`] is deterministic for a given entity snapshot.
#[derive(Debug, Default)]
pub struct Rules {
    errors: Vec<FieldError>,
}

impl Rules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails when the value is empty or only whitespace
    pub fn not_blank(self, field: &str, value: &str) -> Self {
        self.check(field, !value.trim().is_empty(), "must not be blank")
    }

    /// Fails when the character count falls outside `min..=max`
    pub fn length_between(self, field: &str, value: &str, min: usize, max: usize) -> Self {
        let length = value.chars().count();
        let message = format!("size must be between {} and {}", min, max);
        self.check(field, (min..=max).contains(&length), message)
    }

    pub fn check(mut self, field: &str, passed: bool, message: impl Into<String>) -> Self {
        if !passed {
            self.errors.push(FieldError::new(field, message));
        }
        self
    }

    pub fn finish(self) -> ValidationResult {
        ValidationResult::new(self.errors)
    }
}
