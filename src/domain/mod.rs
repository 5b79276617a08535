// ============================================================================
// Domain Layer - Business Logic
// ============================================================================
//
// Each aggregate has its own subdirectory with value objects, entities,
// errors and the collaborator traits its use cases depend on.
//
// ============================================================================

pub mod customer;
