use async_trait::async_trait;

use crate::validation::ValidationContext;

use super::entities::Customer;

// ============================================================================
// Customer Command Collaborator
// ============================================================================

/// Persists a mutated customer.
///
/// `None` means the customer was rejected; the implementation records the
/// reason (status and notifications) in the request's context.
#[async_trait]
pub trait ChangeCustomerCommandHandler: Send + Sync {
    async fn save(&self, customer: Customer, ctx: &mut ValidationContext) -> Option<Customer>;
}
