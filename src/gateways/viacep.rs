use std::sync::Arc;

use async_trait::async_trait;
use url::Url;

use crate::caching::{CacheKey, CacheProvider, CacheProviderExt};
use crate::config::{ConfigError, PropertiesReader, VIACEP_BASE_URL};
use crate::domain::customer::{PostalCode, PostalCodeInformation};
use crate::metrics::{
    GatewayMetrics, OUTCOME_FOUND, OUTCOME_NOT_FOUND, OUTCOME_PARSE_ERROR,
    OUTCOME_TRANSPORT_ERROR, OUTCOME_UNEXPECTED_STATUS,
};

use super::contracts::{is_not_found_marker, PostalCodeInformationResponse};
use super::error::GatewayError;
use super::PostalCodeGatewayService;

// ============================================================================
// ViaCEP Gateway - cache-first postal code lookup
// ============================================================================
//
// Flow: cache → (miss) GET {base}/ws/{cep}/json → parse → cache → return
//
// - Hits never touch the network and never rewrite the cache.
// - Only successfully parsed results are stored.
// - No retries: a failed call surfaces immediately. Timeouts belong to the
//   injected reqwest client.
//
// ============================================================================

pub struct ViaCepGatewayService {
    http: reqwest::Client,
    base_url: Url,
    cache: Arc<dyn CacheProvider>,
    metrics: Arc<GatewayMetrics>,
}

impl ViaCepGatewayService {
    pub fn new(
        http: reqwest::Client,
        properties: &dyn PropertiesReader,
        cache: Arc<dyn CacheProvider>,
        metrics: Arc<GatewayMetrics>,
    ) -> Result<Self, ConfigError> {
        let base_url = properties.require_url(VIACEP_BASE_URL)?;

        Ok(Self {
            http,
            base_url,
            cache,
            metrics,
        })
    }

    fn request_url(&self, postal_code: &PostalCode) -> String {
        format!(
            "{}/ws/{}/json",
            self.base_url.as_str().trim_end_matches('/'),
            postal_code.as_str()
        )
    }

    async fn fetch(&self, postal_code: &PostalCode) -> Result<PostalCodeInformation, GatewayError> {
        let endpoint = self.request_url(postal_code);

        let result = self.request(&endpoint, postal_code).await;

        let outcome = match &result {
            Ok(_) => OUTCOME_FOUND,
            Err(GatewayError::NotFound { .. }) => OUTCOME_NOT_FOUND,
            Err(GatewayError::Parse { .. }) => OUTCOME_PARSE_ERROR,
            Err(GatewayError::Transport { .. }) => OUTCOME_TRANSPORT_ERROR,
            Err(GatewayError::UnexpectedStatus { .. }) => OUTCOME_UNEXPECTED_STATUS,
        };
        self.metrics.record_upstream(outcome);

        match &result {
            Ok(_) => tracing::info!(postal_code = %postal_code, "Fetched postal code information"),
            Err(e) if e.is_not_found() => {
                tracing::warn!(postal_code = %postal_code, "Postal code not found upstream")
            }
            Err(e) => tracing::error!(postal_code = %postal_code, error = %e, "Postal code lookup failed"),
        }

        result
    }

    async fn request(
        &self,
        endpoint: &str,
        postal_code: &PostalCode,
    ) -> Result<PostalCodeInformation, GatewayError> {
        let transport = |source| GatewayError::Transport {
            endpoint: endpoint.to_string(),
            source,
        };
        let parse = |message: String| GatewayError::Parse {
            endpoint: endpoint.to_string(),
            message,
        };
        let not_found = || GatewayError::NotFound {
            postal_code: postal_code.to_string(),
        };

        let resp = self.http.get(endpoint).send().await.map_err(transport)?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(not_found());
        }

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(GatewayError::UnexpectedStatus {
                endpoint: endpoint.to_string(),
                status,
                body,
            });
        }

        let body = resp.text().await.map_err(transport)?;
        let json: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| parse(e.to_string()))?;

        if is_not_found_marker(&json) {
            return Err(not_found());
        }

        let response: PostalCodeInformationResponse =
            serde_json::from_value(json).map_err(|e| parse(e.to_string()))?;

        PostalCodeInformation::try_from(response).map_err(|e| parse(e.to_string()))
    }
}

#[async_trait]
impl PostalCodeGatewayService for ViaCepGatewayService {
    async fn get_postal_code_information(
        &self,
        postal_code: &PostalCode,
    ) -> Result<PostalCodeInformation, GatewayError> {
        let key = CacheKey::for_postal_code(postal_code);

        let cached: Result<Option<PostalCodeInformation>, _> = self.cache.get(&key).await;
        match cached {
            Ok(Some(information)) => {
                self.metrics.cache_hits.inc();
                tracing::debug!(postal_code = %postal_code, "Postal code cache hit");
                return Ok(information);
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Cache read failed, treating as miss");
            }
        }

        self.metrics.cache_misses.inc();
        tracing::debug!(postal_code = %postal_code, "Postal code cache miss");

        let information = self.fetch(postal_code).await?;

        if let Err(e) = self.cache.set(&key, &information).await {
            tracing::warn!(key = %key, error = %e, "Failed to store postal code information");
        }

        Ok(information)
    }
}
