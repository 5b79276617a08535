use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::customer::{ChangeCustomerCommandHandler, Customer, GetCustomerByIdQueryHandler};
use crate::validation::{ValidationContext, ValidationStatus};

// ============================================================================
// In-memory Customer Store
// ============================================================================
//
// Responsibilities:
// 1. Reject invalid customers, reporting every customer and address error
// 2. Assign ids to new customers and addresses, never reusing an id
//    already present on a saved customer
// 3. Serve lookups by id
//
// ============================================================================

pub struct InMemoryCustomerStore {
    customers: RwLock<HashMap<i64, Customer>>,
    next_customer_id: AtomicI64,
    next_address_id: AtomicI64,
}

impl InMemoryCustomerStore {
    pub fn new() -> Self {
        Self {
            customers: RwLock::new(HashMap::new()),
            next_customer_id: AtomicI64::new(1),
            next_address_id: AtomicI64::new(1),
        }
    }

    pub async fn len(&self) -> usize {
        self.customers.read().await.len()
    }

    fn is_valid(customer: &Customer, ctx: &mut ValidationContext) -> bool {
        let mut valid = true;

        let result = customer.validate();
        valid &= result.is_valid();
        ctx.add_result(&result);

        for address in customer.addresses() {
            let result = address.validate();
            valid &= result.is_valid();
            ctx.add_result(&result);
        }

        valid
    }
}

impl Default for InMemoryCustomerStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GetCustomerByIdQueryHandler for InMemoryCustomerStore {
    async fn find_by_id(&self, id: i64, _ctx: &mut ValidationContext) -> Option<Customer> {
        self.customers.read().await.get(&id).cloned()
    }
}

#[async_trait]
impl ChangeCustomerCommandHandler for InMemoryCustomerStore {
    async fn save(&self, mut customer: Customer, ctx: &mut ValidationContext) -> Option<Customer> {
        if !Self::is_valid(&customer, ctx) {
            ctx.set_status(ValidationStatus::Invalid);
            tracing::warn!(
                customer_id = customer.id(),
                errors = ctx.errors().len(),
                "Rejected invalid customer"
            );
            return None;
        }

        let id = match customer.id() {
            Some(id) => {
                self.next_customer_id.fetch_max(id + 1, Ordering::SeqCst);
                id
            }
            None => {
                let id = self.next_customer_id.fetch_add(1, Ordering::SeqCst);
                customer.assign_id(id);
                id
            }
        };

        // Ids may come from outside this store; never hand one out twice
        if let Some(max_id) = customer.max_address_id() {
            self.next_address_id.fetch_max(max_id + 1, Ordering::SeqCst);
        }
        customer.assign_missing_address_ids(|| self.next_address_id.fetch_add(1, Ordering::SeqCst));

        self.customers.write().await.insert(id, customer.clone());
        tracing::debug!(customer_id = id, addresses = customer.addresses().len(), "Stored customer");

        Some(customer)
    }
}
