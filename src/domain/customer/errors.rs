// ============================================================================
// Customer Value Object Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum CustomerError {
    #[error("Invalid postal code: {0}")]
    InvalidPostalCode(String),

    #[error("Invalid document number: {0}")]
    InvalidDocumentNumber(String),
}
