use std::sync::Arc;

use crate::domain::customer::messages::NOT_FOUND_RECORD;
use crate::domain::customer::{PostalCode, PostalCodeInformation};
use crate::gateways::{GatewayError, PostalCodeGatewayService};
use crate::validation::{ValidationContext, ValidationStatus};

/// Postal code lookup for the request boundary.
///
/// An unknown code is a domain answer and lands in the context as NOT_FOUND;
/// transport and parse failures stay errors for the caller to handle.
pub struct GetPostalCodeInformationUseCase {
    gateway: Arc<dyn PostalCodeGatewayService>,
}

impl GetPostalCodeInformationUseCase {
    pub fn new(gateway: Arc<dyn PostalCodeGatewayService>) -> Self {
        Self { gateway }
    }

    pub async fn get_postal_code_information(
        &self,
        postal_code: &PostalCode,
        ctx: &mut ValidationContext,
    ) -> Result<Option<PostalCodeInformation>, GatewayError> {
        match self.gateway.get_postal_code_information(postal_code).await {
            Ok(information) => Ok(Some(information)),
            Err(e) if e.is_not_found() => {
                ctx.set_status(ValidationStatus::NotFound);
                ctx.add_notification("postalCode", NOT_FOUND_RECORD);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}
