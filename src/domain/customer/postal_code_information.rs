use serde::{Deserialize, Serialize};

use super::value_objects::PostalCode;

/// Postal code metadata resolved through a gateway.
///
/// Only built from a parsed upstream response; cached values are shared
/// read-only between requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostalCodeInformation {
    pub postal_code: PostalCode,
    pub street: String,
    pub complement: String,
    pub neighborhood: String,
    pub city: String,
    pub state_code: String,
    pub ibge_code: String,
    pub gia_code: String,
    pub area_code: String,
    pub siafi_code: String,
}
