use prometheus::{IntCounter, IntCounterVec, Opts, Registry};

// ============================================================================
// Metrics Module - Prometheus metrics for the postal code gateway
// ============================================================================
//
// Tracks how lookups are served:
// - cache hits and misses
// - upstream requests by outcome (found, not_found, parse_error,
//   transport_error, unexpected_status)
//
// ============================================================================

pub const OUTCOME_FOUND: &str = "found";
pub const OUTCOME_NOT_FOUND: &str = "not_found";
pub const OUTCOME_PARSE_ERROR: &str = "parse_error";
pub const OUTCOME_TRANSPORT_ERROR: &str = "transport_error";
pub const OUTCOME_UNEXPECTED_STATUS: &str = "unexpected_status";

pub struct GatewayMetrics {
    registry: Registry,
    pub cache_hits: IntCounter,
    pub cache_misses: IntCounter,
    pub upstream_requests: IntCounterVec,
}

impl GatewayMetrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let cache_hits = IntCounter::new(
            "postal_code_cache_hits_total",
            "Postal code lookups served from cache",
        )?;
        registry.register(Box::new(cache_hits.clone()))?;

        let cache_misses = IntCounter::new(
            "postal_code_cache_misses_total",
            "Postal code lookups that missed the cache",
        )?;
        registry.register(Box::new(cache_misses.clone()))?;

        let upstream_requests = IntCounterVec::new(
            Opts::new("postal_code_upstream_requests_total", "Requests sent to the postal code API"),
            &["outcome"],
        )?;
        registry.register(Box::new(upstream_requests.clone()))?;

        Ok(Self {
            registry,
            cache_hits,
            cache_misses,
            upstream_requests,
        })
    }

    /// Registry to expose through a scrape endpoint
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn record_upstream(&self, outcome: &str) {
        self.upstream_requests.with_label_values(&[outcome]).inc();
    }

    /// Total upstream requests across every outcome
    pub fn upstream_total(&self) -> u64 {
        [
            OUTCOME_FOUND,
            OUTCOME_NOT_FOUND,
            OUTCOME_PARSE_ERROR,
            OUTCOME_TRANSPORT_ERROR,
            OUTCOME_UNEXPECTED_STATUS,
        ]
        .iter()
        .map(|outcome| self.upstream_requests.with_label_values(&[*outcome]).get())
        .sum()
    }
}
