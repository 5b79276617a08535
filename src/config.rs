use std::collections::HashMap;
use std::time::Duration;

use url::Url;

// ============================================================================
// Configuration - dotted property keys resolved by a PropertiesReader
// ============================================================================

pub const VIACEP_BASE_URL: &str = "viacep.baseurl";
pub const HTTP_TIMEOUT_SECS: &str = "http.timeout.secs";
pub const CACHE_TTL_SECS: &str = "cache.ttl.secs";
pub const REDIS_URL: &str = "redis.url";

pub const DEFAULT_VIACEP_BASE_URL: &str = "https://viacep.com.br";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;
const DEFAULT_CACHE_TTL_SECS: u64 = 86_400;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing configuration property: {0}")]
    MissingProperty(String),

    #[error("Invalid URL for {key}: {source}")]
    InvalidUrl {
        key: String,
        source: url::ParseError,
    },

    #[error("Invalid number for {key}: {value}")]
    InvalidNumber { key: String, value: String },
}

pub trait PropertiesReader: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn require(&self, key: &str) -> Result<String, ConfigError> {
        self.get(key)
            .ok_or_else(|| ConfigError::MissingProperty(key.to_string()))
    }

    fn require_url(&self, key: &str) -> Result<Url, ConfigError> {
        let raw = self.require(key)?;
        Url::parse(&raw).map_err(|source| ConfigError::InvalidUrl {
            key: key.to_string(),
            source,
        })
    }
}

/// Reads properties from environment variables, falling back to defaults.
///
/// `viacep.baseurl` is looked up as `VIACEP_BASEURL`.
#[derive(Debug, Default, Clone)]
pub struct EnvPropertiesReader {
    defaults: HashMap<String, String>,
}

impl EnvPropertiesReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.defaults.insert(key.into(), value.into());
        self
    }

    pub fn env_var_name(key: &str) -> String {
        key.replace('.', "_").to_ascii_uppercase()
    }
}

impl PropertiesReader for EnvPropertiesReader {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(Self::env_var_name(key))
            .ok()
            .filter(|value| !value.is_empty())
            .or_else(|| self.defaults.get(key).cloned())
    }
}

/// Fixed set of properties, mostly for tests and embedding
#[derive(Debug, Default, Clone)]
pub struct MapPropertiesReader {
    properties: HashMap<String, String>,
}

impl MapPropertiesReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}

impl PropertiesReader for MapPropertiesReader {
    fn get(&self, key: &str) -> Option<String> {
        self.properties.get(key).cloned()
    }
}

/// Settings the binary needs to wire the service
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub viacep_base_url: Url,
    pub http_timeout: Duration,
    pub cache_ttl: Duration,
    pub redis_url: Option<String>,
}

impl AppConfig {
    pub fn from_properties(properties: &dyn PropertiesReader) -> Result<Self, ConfigError> {
        let viacep_base_url = match properties.get(VIACEP_BASE_URL) {
            Some(_) => properties.require_url(VIACEP_BASE_URL)?,
            None => Url::parse(DEFAULT_VIACEP_BASE_URL).map_err(|source| ConfigError::InvalidUrl {
                key: VIACEP_BASE_URL.to_string(),
                source,
            })?,
        };

        Ok(Self {
            viacep_base_url,
            http_timeout: Duration::from_secs(secs_or(properties, HTTP_TIMEOUT_SECS, DEFAULT_HTTP_TIMEOUT_SECS)?),
            cache_ttl: Duration::from_secs(secs_or(properties, CACHE_TTL_SECS, DEFAULT_CACHE_TTL_SECS)?),
            redis_url: properties.get(REDIS_URL),
        })
    }
}

fn secs_or(properties: &dyn PropertiesReader, key: &str, default: u64) -> Result<u64, ConfigError> {
    match properties.get(key) {
        Some(value) => value.parse().map_err(|_| ConfigError::InvalidNumber {
            key: key.to_string(),
            value,
        }),
        None => Ok(default),
    }
}
