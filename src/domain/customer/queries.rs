use async_trait::async_trait;

use crate::validation::ValidationContext;

use super::entities::Customer;

// ============================================================================
// Customer Query Collaborator
// ============================================================================

/// Loads a customer by id; `None` means not found
#[async_trait]
pub trait GetCustomerByIdQueryHandler: Send + Sync {
    async fn find_by_id(&self, id: i64, ctx: &mut ValidationContext) -> Option<Customer>;
}
