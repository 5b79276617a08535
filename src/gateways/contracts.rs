use serde::Deserialize;

use crate::domain::customer::{CustomerError, PostalCode, PostalCodeInformation};

/// Body of `GET /ws/{cep}/json`.
///
/// Unknown fields are ignored and missing optional fields default to empty,
/// so additions upstream do not break parsing.
#[derive(Debug, Clone, Deserialize)]
pub struct PostalCodeInformationResponse {
    pub cep: String,
    #[serde(default)]
    pub logradouro: String,
    #[serde(default)]
    pub complemento: String,
    #[serde(default)]
    pub bairro: String,
    #[serde(default)]
    pub localidade: String,
    #[serde(default)]
    pub uf: String,
    #[serde(default)]
    pub ibge: String,
    #[serde(default)]
    pub gia: String,
    #[serde(default)]
    pub ddd: String,
    #[serde(default)]
    pub siafi: String,
}

/// `{"erro": true}` (or `"true"`) is how ViaCEP answers an unknown code
pub fn is_not_found_marker(body: &serde_json::Value) -> bool {
    match body.get("erro") {
        Some(serde_json::Value::Bool(flag)) => *flag,
        Some(serde_json::Value::String(flag)) => flag.eq_ignore_ascii_case("true"),
        _ => false,
    }
}

impl TryFrom<PostalCodeInformationResponse> for PostalCodeInformation {
    type Error = CustomerError;

    fn try_from(response: PostalCodeInformationResponse) -> Result<Self, Self::Error> {
        Ok(Self {
            postal_code: PostalCode::parse(&response.cep)?,
            street: response.logradouro,
            complement: response.complemento,
            neighborhood: response.bairro,
            city: response.localidade,
            state_code: response.uf,
            ibge_code: response.ibge,
            gia_code: response.gia,
            area_code: response.ddd,
            siafi_code: response.siafi,
        })
    }
}
