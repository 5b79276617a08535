//! Contract tests for ViaCepGatewayService.
//!
//! wiremock stands in for `GET {base}/ws/{cep}/json`; `.expect(n)` pins the
//! number of upstream calls and `RecordingCache` counts cache writes.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use affiliation::caching::{
    CacheError, CacheKey, CacheProvider, CacheProviderExt, InMemoryCacheProvider,
};
use affiliation::config::{MapPropertiesReader, VIACEP_BASE_URL};
use affiliation::domain::customer::{PostalCode, PostalCodeInformation};
use affiliation::gateways::{GatewayError, PostalCodeGatewayService, ViaCepGatewayService};
use affiliation::metrics::GatewayMetrics;

const REQUEST_PATH: &str = "/ws/78085630/json";

/// In-memory cache that counts reads and writes
#[derive(Default)]
struct RecordingCache {
    inner: InMemoryCacheProvider,
    gets: AtomicUsize,
    sets: AtomicUsize,
}

impl RecordingCache {
    fn sets(&self) -> usize {
        self.sets.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CacheProvider for RecordingCache {
    async fn get_raw(&self, key: &CacheKey) -> Result<Option<String>, CacheError> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        self.inner.get_raw(key).await
    }

    async fn set_raw(&self, key: &CacheKey, value: String) -> Result<(), CacheError> {
        self.sets.fetch_add(1, Ordering::SeqCst);
        self.inner.set_raw(key, value).await
    }
}

/// Cache whose backend is down
struct UnavailableCache;

#[async_trait]
impl CacheProvider for UnavailableCache {
    async fn get_raw(&self, _key: &CacheKey) -> Result<Option<String>, CacheError> {
        Err(CacheError::Backend("connection refused".to_string()))
    }

    async fn set_raw(&self, _key: &CacheKey, _value: String) -> Result<(), CacheError> {
        Err(CacheError::Backend("connection refused".to_string()))
    }
}

fn response_body() -> serde_json::Value {
    serde_json::json!({
        "cep": "78085-630",
        "logradouro": "Avenida Santo Antônio",
        "complemento": "",
        "bairro": "Coxipó",
        "localidade": "Cuiabá",
        "uf": "MT",
        "ibge": "5103403",
        "gia": "",
        "ddd": "65",
        "siafi": "9067"
    })
}

fn postal_code() -> PostalCode {
    PostalCode::parse("78085630").unwrap()
}

fn gateway(
    base_url: &str,
    cache: Arc<dyn CacheProvider>,
) -> (ViaCepGatewayService, Arc<GatewayMetrics>) {
    let properties = MapPropertiesReader::new().with_property(VIACEP_BASE_URL, base_url);
    let metrics = Arc::new(GatewayMetrics::new().unwrap());
    let service = ViaCepGatewayService::new(reqwest::Client::new(), &properties, cache, metrics.clone())
        .unwrap();
    (service, metrics)
}

#[tokio::test]
async fn returns_parsed_information_from_upstream() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(REQUEST_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(response_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (service, _) = gateway(&mock_server.uri(), Arc::new(InMemoryCacheProvider::new()));

    let information = service.get_postal_code_information(&postal_code()).await.unwrap();

    assert_eq!(information.postal_code.as_str(), "78085630");
    assert_eq!(information.street, "Avenida Santo Antônio");
    assert_eq!(information.neighborhood, "Coxipó");
    assert_eq!(information.city, "Cuiabá");
    assert_eq!(information.state_code, "MT");
    assert_eq!(information.area_code, "65");
}

#[tokio::test]
async fn miss_fetches_once_then_serves_from_cache() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(REQUEST_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(response_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let cache = Arc::new(RecordingCache::default());
    let (service, metrics) = gateway(&mock_server.uri(), cache.clone());

    let first = service.get_postal_code_information(&postal_code()).await.unwrap();
    assert_eq!(cache.sets(), 1);

    let stored: Option<PostalCodeInformation> = cache
        .get(&CacheKey::for_postal_code(&postal_code()))
        .await
        .unwrap();
    assert_eq!(stored.as_ref(), Some(&first));

    let second = service.get_postal_code_information(&postal_code()).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(cache.sets(), 1);
    assert_eq!(metrics.cache_misses.get(), 1);
    assert_eq!(metrics.cache_hits.get(), 1);
    assert_eq!(metrics.upstream_total(), 1);
}

#[tokio::test]
async fn cached_value_skips_upstream_and_cache_write() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(REQUEST_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(response_body()))
        .expect(0)
        .mount(&mock_server)
        .await;

    let cached = PostalCodeInformation {
        postal_code: postal_code(),
        street: "Cached Street".to_string(),
        complement: String::new(),
        neighborhood: "Coxipó".to_string(),
        city: "Cuiabá".to_string(),
        state_code: "MT".to_string(),
        ibge_code: "5103403".to_string(),
        gia_code: String::new(),
        area_code: "65".to_string(),
        siafi_code: "9067".to_string(),
    };
    let cache = Arc::new(RecordingCache::default());
    cache.inner.set(&CacheKey::for_postal_code(&postal_code()), &cached).await.unwrap();

    let (service, metrics) = gateway(&mock_server.uri(), cache.clone());

    let result = service.get_postal_code_information(&postal_code()).await.unwrap();

    assert_eq!(result, cached);
    assert_eq!(cache.sets(), 0);
    assert_eq!(metrics.upstream_total(), 0);
}

#[tokio::test]
async fn not_found_marker_is_reported_and_not_cached() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(REQUEST_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "erro": true })))
        .expect(2)
        .mount(&mock_server)
        .await;

    let cache = Arc::new(RecordingCache::default());
    let (service, _) = gateway(&mock_server.uri(), cache.clone());

    let first = service.get_postal_code_information(&postal_code()).await;
    assert!(matches!(first, Err(GatewayError::NotFound { ref postal_code }) if postal_code == "78085630"));

    // Nothing cached, so the next lookup goes upstream again
    let second = service.get_postal_code_information(&postal_code()).await;
    assert!(matches!(second, Err(GatewayError::NotFound { .. })));
    assert_eq!(cache.sets(), 0);
}

#[tokio::test]
async fn not_found_marker_as_string_is_recognized() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(REQUEST_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "erro": "true" })))
        .mount(&mock_server)
        .await;

    let (service, _) = gateway(&mock_server.uri(), Arc::new(InMemoryCacheProvider::new()));

    let result = service.get_postal_code_information(&postal_code()).await;
    assert!(matches!(result, Err(GatewayError::NotFound { .. })));
}

#[tokio::test]
async fn http_404_maps_to_not_found() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(REQUEST_PATH))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let cache = Arc::new(RecordingCache::default());
    let (service, _) = gateway(&mock_server.uri(), cache.clone());

    let result = service.get_postal_code_information(&postal_code()).await;
    assert!(matches!(result, Err(GatewayError::NotFound { .. })));
    assert_eq!(cache.sets(), 0);
}

#[tokio::test]
async fn malformed_payload_is_parse_error_and_not_cached() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(REQUEST_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&mock_server)
        .await;

    let cache = Arc::new(RecordingCache::default());
    let (service, metrics) = gateway(&mock_server.uri(), cache.clone());

    let result = service.get_postal_code_information(&postal_code()).await;
    assert!(matches!(result, Err(GatewayError::Parse { .. })));
    assert_eq!(cache.sets(), 0);
    assert_eq!(metrics.upstream_requests.with_label_values(&["parse_error"]).get(), 1);
}

#[tokio::test]
async fn payload_without_cep_is_parse_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(REQUEST_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "logradouro": "Rua" })))
        .mount(&mock_server)
        .await;

    let (service, _) = gateway(&mock_server.uri(), Arc::new(InMemoryCacheProvider::new()));

    let result = service.get_postal_code_information(&postal_code()).await;
    assert!(matches!(result, Err(GatewayError::Parse { .. })));
}

#[tokio::test]
async fn unexpected_status_is_gateway_error_and_not_cached() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(REQUEST_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
        .mount(&mock_server)
        .await;

    let cache = Arc::new(RecordingCache::default());
    let (service, _) = gateway(&mock_server.uri(), cache.clone());

    let result = service.get_postal_code_information(&postal_code()).await;
    match result {
        Err(GatewayError::UnexpectedStatus { status, body, .. }) => {
            assert_eq!(status, 503);
            assert_eq!(body, "upstream down");
        }
        other => panic!("expected UnexpectedStatus, got {:?}", other),
    }
    assert_eq!(cache.sets(), 0);
}

#[tokio::test]
async fn connection_failure_is_transport_error() {
    // Nothing listens on port 1
    let (service, metrics) = gateway("http://127.0.0.1:1", Arc::new(InMemoryCacheProvider::new()));

    let result = service.get_postal_code_information(&postal_code()).await;
    assert!(matches!(result, Err(GatewayError::Transport { .. })));
    assert_eq!(metrics.upstream_requests.with_label_values(&["transport_error"]).get(), 1);
}

#[tokio::test]
async fn unavailable_cache_degrades_to_upstream() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(REQUEST_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(response_body()))
        .expect(2)
        .mount(&mock_server)
        .await;

    let (service, _) = gateway(&mock_server.uri(), Arc::new(UnavailableCache));

    for _ in 0..2 {
        let information = service.get_postal_code_information(&postal_code()).await.unwrap();
        assert_eq!(information.city, "Cuiabá");
    }
}

#[tokio::test]
async fn unknown_response_fields_are_tolerated() {
    let mut body = response_body();
    body["estado"] = serde_json::json!("Mato Grosso");
    body["regiao"] = serde_json::json!("Centro-Oeste");

    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(REQUEST_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&mock_server)
        .await;

    let (service, _) = gateway(&mock_server.uri(), Arc::new(InMemoryCacheProvider::new()));

    let information = service.get_postal_code_information(&postal_code()).await.unwrap();
    assert_eq!(information.siafi_code, "9067");
}
