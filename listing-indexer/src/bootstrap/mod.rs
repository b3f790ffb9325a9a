//! Index bootstrap for the listing indexer.
//!
//! Creates every listing index that does not exist yet. Existing aliases are
//! left untouched, so running the indexer twice is harmless.

use async_trait::async_trait;
use listing_search_repository::{DocumentService, SearchIndexError};
use listing_search_shared::SearchDocument;
use tracing::{error, info, instrument};

use crate::IndexerError;

/// One index the bootstrap is responsible for.
#[async_trait]
pub trait ListingIndex: Send + Sync {
    /// Alias the index is reachable under.
    fn alias(&self) -> &'static str;

    /// Create the index and alias if missing.
    async fn ensure(&self) -> Result<(), SearchIndexError>;
}

#[async_trait]
impl<T: SearchDocument> ListingIndex for DocumentService<T> {
    fn alias(&self) -> &'static str {
        T::index_alias()
    }

    async fn ensure(&self) -> Result<(), SearchIndexError> {
        self.ensure_index().await
    }
}

/// Ensures a fixed set of listing indices.
pub struct IndexBootstrap {
    indices: Vec<Box<dyn ListingIndex>>,
}

impl IndexBootstrap {
    pub fn new(indices: Vec<Box<dyn ListingIndex>>) -> Self {
        Self { indices }
    }

    /// Aliases handled by this bootstrap, in processing order.
    pub fn aliases(&self) -> Vec<&'static str> {
        self.indices.iter().map(|index| index.alias()).collect()
    }

    /// Ensure every index.
    ///
    /// All indices are attempted even after a failure; the first error is
    /// returned once the rest have been processed.
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<&str>)` - Aliases that are ready, in processing order
    /// * `Err(IndexerError::SearchError)` - The first failure
    #[instrument(skip(self), fields(index_count = self.indices.len()))]
    pub async fn run(&self) -> Result<Vec<&'static str>, IndexerError> {
        let mut ready = Vec::with_capacity(self.indices.len());
        let mut first_error = None;

        for index in &self.indices {
            match index.ensure().await {
                Ok(()) => {
                    info!(alias = index.alias(), "Index ready");
                    ready.push(index.alias());
                }
                Err(e) => {
                    error!(alias = index.alias(), error = %e, "Failed to ensure index");
                    first_error.get_or_insert(e);
                }
            }
        }

        match first_error {
            Some(e) => Err(e.into()),
            None => Ok(ready),
        }
    }
}
