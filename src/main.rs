use std::sync::Arc;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use affiliation::caching::{CacheProvider, InMemoryCacheProvider, RedisCacheProvider};
use affiliation::config::{AppConfig, EnvPropertiesReader, DEFAULT_VIACEP_BASE_URL, VIACEP_BASE_URL};
use affiliation::domain::customer::{Address, ChangeCustomerCommandHandler, Customer, DocumentNumber, PostalCode};
use affiliation::gateways::ViaCepGatewayService;
use affiliation::metrics::GatewayMetrics;
use affiliation::persistence::InMemoryCustomerStore;
use affiliation::usecases::{
    ChangeCustomerBase, GetPostalCodeInformationUseCase, SaveAddressInput, SaveAddressUseCase,
};
use affiliation::validation::ValidationContext;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Default to INFO level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,affiliation=debug"))
        )
        .init();

    let properties = EnvPropertiesReader::new().with_default(VIACEP_BASE_URL, DEFAULT_VIACEP_BASE_URL);
    let config = AppConfig::from_properties(&properties)?;
    tracing::info!(
        viacep = %config.viacep_base_url,
        redis = config.redis_url.is_some(),
        "Starting affiliation service"
    );

    // === 1. Shared infrastructure ===
    let cache: Arc<dyn CacheProvider> = match &config.redis_url {
        Some(url) => Arc::new(RedisCacheProvider::connect(url, Some(config.cache_ttl)).await?),
        None => {
            tracing::info!("No redis.url configured, using in-memory cache");
            Arc::new(InMemoryCacheProvider::with_ttl(config.cache_ttl))
        }
    };

    let http = reqwest::Client::builder()
        .timeout(config.http_timeout)
        .build()?;

    let metrics = Arc::new(GatewayMetrics::new()?);
    let gateway = Arc::new(ViaCepGatewayService::new(http, &properties, cache, metrics.clone())?);
    let store = Arc::new(InMemoryCustomerStore::new());

    // === 2. Use cases ===
    let lookup = GetPostalCodeInformationUseCase::new(gateway);
    let save_address = SaveAddressUseCase::new(ChangeCustomerBase::new(store.clone(), store.clone()));

    // === 3. Demo: register a customer and attach an address resolved by postal code ===
    let raw_code = std::env::args().nth(1).unwrap_or_else(|| "01001000".to_string());
    let postal_code = PostalCode::parse(&raw_code)?;

    let mut ctx = ValidationContext::new();
    let customer = store
        .save(Customer::new(DocumentNumber::parse("529.982.247-25")?, "Maria Silva"), &mut ctx)
        .await
        .ok_or_else(|| anyhow::anyhow!("Seed customer rejected: {:?}", ctx.errors()))?;
    let customer_id = customer.id().ok_or_else(|| anyhow::anyhow!("Seed customer has no id"))?;

    // A fresh context per request
    let mut ctx = ValidationContext::new();
    let Some(information) = lookup.get_postal_code_information(&postal_code, &mut ctx).await? else {
        tracing::warn!(postal_code = %postal_code, errors = ?ctx.errors(), "Postal code lookup returned nothing");
        return Ok(());
    };

    let address = Address::new(postal_code.clone()).with_postal_code_information(&information);
    let input = SaveAddressInput {
        customer_id,
        address_id: None,
        postal_code: address.postal_code,
        street: address.street,
        number: "1".to_string(),
        complement: address.complement,
        neighborhood: address.neighborhood,
        city: address.city,
        state_code: address.state_code,
    };

    let mut ctx = ValidationContext::new();
    match save_address.save_address(&input, &mut ctx).await {
        Some(saved) => tracing::info!(address_id = saved.id, street = %saved.street, city = %saved.city, "✅ Address saved"),
        None => {
            let errors = serde_json::to_string(ctx.errors())?;
            tracing::warn!(
                status = ?ctx.status().map(|s| s.http_status_code()),
                errors = %errors,
                "Address rejected"
            );
        }
    }

    // Second lookup is served from cache
    let mut ctx = ValidationContext::new();
    lookup.get_postal_code_information(&postal_code, &mut ctx).await?;
    tracing::info!(
        cache_hits = metrics.cache_hits.get(),
        cache_misses = metrics.cache_misses.get(),
        upstream_requests = metrics.upstream_total(),
        "Gateway metrics"
    );

    Ok(())
}
