// ============================================================================
// Validation - field errors, per-entity results and the request context
// ============================================================================

pub mod error;
pub mod result;
pub mod context;

pub use error::FieldError;
pub use result::{Rules, ValidationResult};
pub use context::{ValidationContext, ValidationStatus};
