use crate::validation::{Rules, ValidationResult};

use super::messages::{INVALID_DOCUMENT, INVALID_STATE_CODE};
use super::postal_code_information::PostalCodeInformation;
use super::value_objects::{DocumentNumber, PostalCode};

// ============================================================================
// Customer Entities
// ============================================================================

/// Postal address owned by a customer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    pub id: Option<i64>,
    pub postal_code: PostalCode,
    pub street: String,
    pub number: String,
    pub complement: String,
    pub neighborhood: String,
    pub city: String,
    pub state_code: String,
}

impl Address {
    /// New, not yet persisted address with only the postal code set
    pub fn new(postal_code: PostalCode) -> Self {
        Self {
            id: None,
            postal_code,
            street: String::new(),
            number: String::new(),
            complement: String::new(),
            neighborhood: String::new(),
            city: String::new(),
            state_code: String::new(),
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// Fill the location fields from gateway data, keeping id and number
    pub fn with_postal_code_information(mut self, info: &PostalCodeInformation) -> Self {
        self.postal_code = info.postal_code.clone();
        self.street = info.street.clone();
        self.complement = info.complement.clone();
        self.neighborhood = info.neighborhood.clone();
        self.city = info.city.clone();
        self.state_code = info.state_code.clone();
        self
    }

    pub fn validate(&self) -> ValidationResult {
        let state_code_ok =
            self.state_code.len() == 2 && self.state_code.chars().all(|c| c.is_ascii_uppercase());

        Rules::new()
            .not_blank("street", &self.street)
            .not_blank("city", &self.city)
            .check("stateCode", state_code_ok, INVALID_STATE_CODE)
            .finish()
    }
}

/// Customer with its ordered address list.
///
/// Addresses can only be appended (`add_address`) or replaced by id
/// (`change_address`); there is no removal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    id: Option<i64>,
    document_number: DocumentNumber,
    name: String,
    addresses: Vec<Address>,
}

impl Customer {
    pub const NAME_MIN_LENGTH: usize = 3;
    pub const NAME_MAX_LENGTH: usize = 300;

    pub fn new(document_number: DocumentNumber, name: impl Into<String>) -> Self {
        Self {
            id: None,
            document_number,
            name: name.into(),
            addresses: Vec::new(),
        }
    }

    /// Rehydrate a stored customer
    pub fn with_id(
        id: i64,
        document_number: DocumentNumber,
        name: impl Into<String>,
        addresses: Vec<Address>,
    ) -> Self {
        Self {
            id: Some(id),
            document_number,
            name: name.into(),
            addresses,
        }
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub(crate) fn assign_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    pub fn document_number(&self) -> &DocumentNumber {
        &self.document_number
    }

    pub fn set_document_number(&mut self, document_number: DocumentNumber) {
        self.document_number = document_number;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn addresses(&self) -> &[Address] {
        &self.addresses
    }

    /// Largest address id already assigned, if any
    pub fn max_address_id(&self) -> Option<i64> {
        self.addresses.iter().filter_map(|a| a.id).max()
    }

    /// Give every address that has no id the next value from `next`, in list order.
    /// Addresses that already carry an id are left alone.
    pub(crate) fn assign_missing_address_ids(&mut self, mut next: impl FnMut() -> i64) {
        for address in self.addresses.iter_mut().filter(|a| a.id.is_none()) {
            address.id = Some(next());
        }
    }

    pub fn add_address(&mut self, address: Address) {
        self.addresses.push(address);
    }

    /// Replace the address sharing `address.id`, keeping its position.
    ///
    /// Returns `false` and leaves the list untouched when no address matches
    /// (an address without id never matches).
    pub fn change_address(&mut self, address: Address) -> bool {
        let Some(position) = self.address_position(&address) else {
            return false;
        };

        self.addresses[position] = address;
        true
    }

    fn address_position(&self, address: &Address) -> Option<usize> {
        let id = address.id?;
        self.addresses.iter().position(|old| old.id == Some(id))
    }

    /// Structural checks on the customer itself; addresses validate on their own
    pub fn validate(&self) -> ValidationResult {
        Rules::new()
            .not_blank("name", &self.name)
            .length_between("name", &self.name, Self::NAME_MIN_LENGTH, Self::NAME_MAX_LENGTH)
            .check("documentNumber", self.document_number.is_valid(), INVALID_DOCUMENT)
            .finish()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
