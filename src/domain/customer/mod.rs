// ============================================================================
// Customer Domain
// ============================================================================
//
// This module contains ALL Customer-specific code:
// - Value objects (PostalCode, DocumentNumber)
// - Entities (Customer, Address) and their validators
// - Postal code metadata resolved by gateways
// - Collaborator traits for loading and persisting customers
//
// ============================================================================

pub mod value_objects;
pub mod entities;
pub mod postal_code_information;
pub mod errors;
pub mod messages;
pub mod commands;
pub mod queries;

// Re-export for convenience
pub use value_objects::*;
pub use entities::*;
pub use postal_code_information::*;
pub use errors::*;
pub use commands::*;
pub use queries::*;
