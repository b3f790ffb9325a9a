//! OpenSearch client construction.

use opensearch::{
    auth::Credentials,
    cert::CertificateValidation,
    http::transport::{SingleNodeConnectionPool, TransportBuilder},
    OpenSearch,
};
use tracing::{info, warn};
use url::Url;

use crate::config::ClientConfig;
use crate::errors::SearchIndexError;

/// Build a client from `config` and check that the server answers.
///
/// The client holds a single-node connection pool with the proxy disabled.
/// It is cheap to clone and can be shared by every repository.
///
/// # Returns
///
/// * `Ok(OpenSearch)` - A client whose ping succeeded
/// * `Err(SearchIndexError::ConnectionError)` - On a bad URL, a transport
///   build failure or a failed ping
pub async fn connect(config: &ClientConfig) -> Result<OpenSearch, SearchIndexError> {
    let client = build_client(config)?;

    let response = client
        .ping()
        .send()
        .await
        .map_err(|e| SearchIndexError::connection(e.to_string()))?;

    let status = response.status_code();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(SearchIndexError::connection(format!(
            "Ping failed with status {}: {}",
            status, body
        )));
    }

    info!(
        url = %config.url,
        authenticated = config.credentials().is_some(),
        timeout_secs = config.timeout.as_secs(),
        "Connected to OpenSearch"
    );

    Ok(client)
}

fn build_client(config: &ClientConfig) -> Result<OpenSearch, SearchIndexError> {
    let url = Url::parse(&config.url).map_err(|e| SearchIndexError::connection(e.to_string()))?;

    let conn_pool = SingleNodeConnectionPool::new(url);
    let mut builder = TransportBuilder::new(conn_pool)
        .disable_proxy()
        .timeout(config.timeout);

    if let Some((username, password)) = config.credentials() {
        builder = builder.auth(Credentials::Basic(
            username.to_string(),
            password.to_string(),
        ));
    }

    if config.insecure_tls {
        warn!(url = %config.url, "TLS certificate validation is disabled");
        builder = builder.cert_validation(CertificateValidation::None);
    }

    let transport = builder
        .build()
        .map_err(|e| SearchIndexError::connection(e.to_string()))?;

    Ok(OpenSearch::new(transport))
}
