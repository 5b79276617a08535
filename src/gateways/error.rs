// ============================================================================
// Gateway Errors
// ============================================================================
//
// NotFound is an answer from upstream, the rest are gateway-layer failures.
// None of them is ever cached.
//
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("Postal code not found: {postal_code}")]
    NotFound { postal_code: String },

    #[error("Malformed response from {endpoint}: {message}")]
    Parse { endpoint: String, message: String },

    #[error("Transport failure calling {endpoint}: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Unexpected status {status} from {endpoint}: {body}")]
    UnexpectedStatus {
        endpoint: String,
        status: u16,
        body: String,
    },
}

impl GatewayError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, GatewayError::NotFound { .. })
    }
}
