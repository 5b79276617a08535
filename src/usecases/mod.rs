// ============================================================================
// Use Cases - application operations orchestrating domain and collaborators
// ============================================================================

pub mod change_customer;
pub mod save_address;
pub mod get_postal_code_information;

pub use change_customer::ChangeCustomerBase;
pub use save_address::{SaveAddressInput, SaveAddressUseCase};
pub use get_postal_code_information::GetPostalCodeInformationUseCase;
