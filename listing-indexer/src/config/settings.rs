//! Indexer settings read from the environment.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use listing_search_repository::config::{DEFAULT_OPENSEARCH_URL, DEFAULT_TIMEOUT};
use listing_search_repository::{ClientConfig, DocumentServiceConfig};
use tracing::warn;

/// Default connection retry interval in seconds.
const DEFAULT_RETRY_INTERVAL_SECS: u64 = 15;

/// Connection mode for OpenSearch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionMode {
    /// Fail immediately if connection fails.
    FailFast,
    /// Retry connection at a fixed interval until successful.
    Retry,
}

impl ConnectionMode {
    /// Parse a connection mode.
    ///
    /// Valid values: "fail-fast" or "retry" (case-insensitive).
    /// Defaults to "retry" if not set or invalid.
    pub fn parse(value: Option<&str>) -> Self {
        match value.unwrap_or("retry").to_lowercase().as_str() {
            "fail-fast" | "failfast" | "fail_fast" => Self::FailFast,
            "retry" => Self::Retry,
            _ => {
                warn!("Invalid OPENSEARCH_CONNECTION_MODE, defaulting to 'retry'");
                Self::Retry
            }
        }
    }
}

/// Everything the indexer reads from its environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexerSettings {
    pub client: ClientConfig,
    pub service: DocumentServiceConfig,
    /// Version suffix of every listing index (`cars_v{version}`).
    pub index_version: u32,
    pub connection_mode: ConnectionMode,
    pub retry_interval: Duration,
}

impl IndexerSettings {
    /// Read settings from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `OPENSEARCH_URL`: OpenSearch server URL (default: http://localhost:9200)
    /// - `OPENSEARCH_USERNAME`, `OPENSEARCH_PASSWORD`: Basic auth, used when both are set
    /// - `OPENSEARCH_TIMEOUT_SECS`: Request timeout in seconds (default: 30)
    /// - `OPENSEARCH_INSECURE_TLS`: "true" disables certificate validation
    /// - `OPENSEARCH_CONNECTION_MODE`: Connection mode - "fail-fast" or "retry" (default: retry)
    /// - `OPENSEARCH_RETRY_INTERVAL_SECS`: Retry interval in seconds (default: 15)
    /// - `LISTING_INDEX_VERSION`: Index version number (default: 0)
    /// - `LISTING_INDEX_SHARDS`, `LISTING_INDEX_REPLICAS`: Shard layout of new indices
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read settings through `lookup`, which returns the value of a variable.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup("OPENSEARCH_URL").unwrap_or_else(|| DEFAULT_OPENSEARCH_URL.to_string());
        let timeout = parse_or("OPENSEARCH_TIMEOUT_SECS", &lookup, DEFAULT_TIMEOUT.as_secs());
        let insecure_tls = parse_or("OPENSEARCH_INSECURE_TLS", &lookup, false);

        let mut client = ClientConfig::new(url)
            .with_timeout(Duration::from_secs(timeout))
            .with_insecure_tls(insecure_tls);
        if let (Some(username), Some(password)) = (
            lookup("OPENSEARCH_USERNAME").filter(|v| !v.is_empty()),
            lookup("OPENSEARCH_PASSWORD").filter(|v| !v.is_empty()),
        ) {
            client = client.with_credentials(username, password);
        }

        let service = DocumentServiceConfig::default().with_shards(
            parse_optional("LISTING_INDEX_SHARDS", &lookup),
            parse_optional("LISTING_INDEX_REPLICAS", &lookup),
        );

        Self {
            client,
            service,
            index_version: parse_or("LISTING_INDEX_VERSION", &lookup, 0),
            connection_mode: ConnectionMode::parse(lookup("OPENSEARCH_CONNECTION_MODE").as_deref()),
            retry_interval: Duration::from_secs(parse_or(
                "OPENSEARCH_RETRY_INTERVAL_SECS",
                &lookup,
                DEFAULT_RETRY_INTERVAL_SECS,
            )),
        }
    }
}

fn parse_optional<T, F>(key: &str, lookup: &F) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(variable = key, value = %raw, "Ignoring unparsable environment variable");
            None
        }
    }
}

fn parse_or<T, F>(key: &str, lookup: &F, default: T) -> T
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    parse_optional(key, lookup).unwrap_or(default)
}
