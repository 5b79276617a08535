use crate::domain::customer::messages::NOT_FOUND_RECORD;
use crate::domain::customer::{Address, Customer, PostalCode};
use crate::validation::{ValidationContext, ValidationStatus};

use super::change_customer::ChangeCustomerBase;

// ============================================================================
// Save Address Use Case
// ============================================================================
//
// load customer → append or replace address → persist → saved address
//
// Every failure returns `None`; the reason is left in the ValidationContext.
// Persistence is only attempted once the in-memory change succeeded.
//
// ============================================================================

#[derive(Debug, Clone)]
pub struct SaveAddressInput {
    pub customer_id: i64,
    /// `None` creates a new address, `Some` replaces an existing one
    pub address_id: Option<i64>,
    pub postal_code: PostalCode,
    pub street: String,
    pub number: String,
    pub complement: String,
    pub neighborhood: String,
    pub city: String,
    pub state_code: String,
}

impl SaveAddressInput {
    pub fn to_domain_entity(&self) -> Address {
        Address {
            id: self.address_id,
            postal_code: self.postal_code.clone(),
            street: self.street.clone(),
            number: self.number.clone(),
            complement: self.complement.clone(),
            neighborhood: self.neighborhood.clone(),
            city: self.city.clone(),
            state_code: self.state_code.clone(),
        }
    }
}

pub struct SaveAddressUseCase {
    base: ChangeCustomerBase,
}

impl SaveAddressUseCase {
    pub fn new(base: ChangeCustomerBase) -> Self {
        Self { base }
    }

    pub async fn save_address(
        &self,
        input: &SaveAddressInput,
        ctx: &mut ValidationContext,
    ) -> Option<Address> {
        let mut customer = self.base.get_customer_by_id(input.customer_id, ctx).await?;

        let address = input.to_domain_entity();

        match address.id {
            None => customer.add_address(address.clone()),
            Some(_) => {
                if !Self::replace_address(&mut customer, address.clone(), ctx) {
                    return None;
                }
            }
        }

        let saved = self.base.change_customer(customer, ctx).await?;

        // Prefer the persisted copy, it carries any id assigned on save
        let persisted = match address.id {
            Some(id) => saved.addresses().iter().find(|a| a.id == Some(id)),
            None => saved.addresses().last(),
        };

        Some(persisted.cloned().unwrap_or(address))
    }

    fn replace_address(customer: &mut Customer, address: Address, ctx: &mut ValidationContext) -> bool {
        let address_id = address.id;

        if !customer.change_address(address) {
            tracing::warn!(customer_id = customer.id(), address_id, "Address not found on customer");
            ctx.set_status(ValidationStatus::NotFound);
            ctx.add_notification("address", NOT_FOUND_RECORD);
            return false;
        }

        true
    }
}
