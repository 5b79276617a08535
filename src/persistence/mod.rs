// ============================================================================
// Persistence - customer storage backing the query/command collaborators
// ============================================================================

pub mod memory;

pub use memory::InMemoryCustomerStore;
