//! Dependency initialization and wiring for the listing indexer.

use std::time::Duration;

use listing_search_repository::opensearch::OpenSearch;
use listing_search_repository::{
    connect, ClientConfig, DocumentService, IndexConfig, OpenSearchRepository,
};
use listing_search_shared::{Car, Moto, SearchDocument, Stock, Truck};
use tokio::time::sleep;
use tracing::{info, warn};

use crate::bootstrap::{IndexBootstrap, ListingIndex};
use crate::config::{ConnectionMode, IndexerSettings};
use crate::IndexerError;

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// Bootstrap over every listing index, ready to run.
    pub bootstrap: IndexBootstrap,
}

impl Dependencies {
    /// Initialize all dependencies from environment variables.
    ///
    /// See [`IndexerSettings::from_env`] for the variables read.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(IndexerError)` - If initialization fails (only in fail-fast mode)
    pub async fn new() -> Result<Self, IndexerError> {
        Self::from_settings(IndexerSettings::from_env()).await
    }

    /// Initialize all dependencies from already parsed settings.
    pub async fn from_settings(settings: IndexerSettings) -> Result<Self, IndexerError> {
        info!(
            opensearch_url = %settings.client.url,
            connection_mode = ?settings.connection_mode,
            retry_interval_secs = settings.retry_interval.as_secs(),
            index_version = settings.index_version,
            "Initializing dependencies"
        );

        let client = Self::connect_to_opensearch(
            &settings.client,
            settings.connection_mode,
            settings.retry_interval,
        )
        .await?;

        info!("OpenSearch connection established");

        let indices: Vec<Box<dyn ListingIndex>> = vec![
            Self::service::<Car>(&client, &settings),
            Self::service::<Moto>(&client, &settings),
            Self::service::<Truck>(&client, &settings),
            Self::service::<Stock>(&client, &settings),
        ];

        Ok(Self {
            bootstrap: IndexBootstrap::new(indices),
        })
    }

    fn service<T: SearchDocument>(client: &OpenSearch, settings: &IndexerSettings) -> Box<dyn ListingIndex> {
        let repository = OpenSearchRepository::<T>::new(
            client.clone(),
            IndexConfig::for_document::<T>(settings.index_version),
        );
        Box::new(DocumentService::<T>::with_config(
            Box::new(repository),
            settings.service.clone(),
        ))
    }

    /// Connect to OpenSearch with retry logic based on connection mode.
    async fn connect_to_opensearch(
        config: &ClientConfig,
        mode: ConnectionMode,
        retry_interval: Duration,
    ) -> Result<OpenSearch, IndexerError> {
        loop {
            match connect(config).await {
                Ok(client) => return Ok(client),
                Err(e) => match mode {
                    ConnectionMode::FailFast => {
                        return Err(IndexerError::config(format!(
                            "Failed to connect to OpenSearch: {}",
                            e
                        )));
                    }
                    ConnectionMode::Retry => {
                        warn!(
                            opensearch_url = %config.url,
                            error = %e,
                            retry_interval_secs = retry_interval.as_secs(),
                            "Failed to connect to OpenSearch, retrying..."
                        );
                        sleep(retry_interval).await;
                    }
                },
            }
        }
    }
}
