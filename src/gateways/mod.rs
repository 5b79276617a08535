// ============================================================================
// Gateways - adapters for external services
// ============================================================================

pub mod contracts;
pub mod error;
pub mod viacep;

use async_trait::async_trait;

use crate::domain::customer::{PostalCode, PostalCodeInformation};

pub use error::GatewayError;
pub use viacep::ViaCepGatewayService;

/// Resolves postal codes to their metadata
#[async_trait]
pub trait PostalCodeGatewayService: Send + Sync {
    async fn get_postal_code_information(
        &self,
        postal_code: &PostalCode,
    ) -> Result<PostalCodeInformation, GatewayError>;
}
