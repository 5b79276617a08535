use std::sync::Arc;

use crate::domain::customer::messages::NOT_FOUND_RECORD;
use crate::domain::customer::{ChangeCustomerCommandHandler, Customer, GetCustomerByIdQueryHandler};
use crate::validation::{ValidationContext, ValidationStatus};

/// Collaborators shared by every use case that mutates a customer.
///
/// Each use case owns one of these; the request's `ValidationContext` is
/// passed to every call instead of being held here.
#[derive(Clone)]
pub struct ChangeCustomerBase {
    query: Arc<dyn GetCustomerByIdQueryHandler>,
    command: Arc<dyn ChangeCustomerCommandHandler>,
}

impl ChangeCustomerBase {
    pub fn new(
        query: Arc<dyn GetCustomerByIdQueryHandler>,
        command: Arc<dyn ChangeCustomerCommandHandler>,
    ) -> Self {
        Self { query, command }
    }

    /// Load a customer, recording NOT_FOUND when the query did not say why it failed.
    ///
    /// The context may already hold a status from earlier steps, so only
    /// notifications added during this lookup count as an explanation.
    pub async fn get_customer_by_id(
        &self,
        customer_id: i64,
        ctx: &mut ValidationContext,
    ) -> Option<Customer> {
        let errors_before = ctx.errors().len();
        let customer = self.query.find_by_id(customer_id, ctx).await;

        if customer.is_none() {
            tracing::warn!(customer_id, "Customer not found");
            if ctx.errors().len() == errors_before {
                ctx.set_status(ValidationStatus::NotFound);
                ctx.add_notification("customer", NOT_FOUND_RECORD);
            }
        }

        customer
    }

    /// Persist the customer; a successful save leaves the context at OK
    pub async fn change_customer(
        &self,
        customer: Customer,
        ctx: &mut ValidationContext,
    ) -> Option<Customer> {
        let customer_id = customer.id();
        let saved = self.command.save(customer, ctx).await;

        match &saved {
            Some(_) => {
                ctx.set_status(ValidationStatus::Ok);
                tracing::info!(customer_id, "Customer changed");
            }
            None => tracing::warn!(customer_id, status = ?ctx.status(), "Customer change rejected"),
        }

        saved
    }
}
