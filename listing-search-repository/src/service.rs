//! Document service implementation.
//!
//! This module provides the main service for interacting with one listing
//! index. Application code uses it to create the index, write documents and
//! run filtered searches.

use listing_search_dsl::{
    compile, schema_for, CompiledQuery, IndexSettings, PredicateSet, SchemaDocument,
};
use listing_search_shared::SearchDocument;
use serde_json::Value;
use tracing::instrument;

use crate::config::DocumentServiceConfig;
use crate::errors::SearchIndexError;
use crate::interfaces::DocumentRepository;
use crate::types::{BatchOperationSummary, Pagination, SearchPage};

/// The main service for interacting with the index of one document type.
///
/// This is the high-level API that application code should use. It validates
/// input, builds schema and query documents, and delegates to a
/// `DocumentRepository` for the actual backend operations.
///
/// # Example
///
/// ```no_run
/// use listing_search_repository::{
///     connect, ClientConfig, DocumentService, IndexConfig, OpenSearchRepository, Pagination,
/// };
/// use listing_search_shared::{Car, CarFilter};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = connect(&ClientConfig::new("http://localhost:9200")).await?;
/// let repository = OpenSearchRepository::<Car>::new(client, IndexConfig::for_document::<Car>(0));
/// let service: DocumentService<Car> = DocumentService::new(Box::new(repository));
///
/// service.ensure_index().await?;
///
/// let filter = CarFilter {
///     min_year: Some(2015),
///     color: vec!["white".to_string()],
///     ..Default::default()
/// };
/// let page = service.search(&filter, Pagination::default()).await?;
/// println!("{} cars match", page.total);
/// # Ok(())
/// # }
/// ```
pub struct DocumentService<T: SearchDocument> {
    repository: Box<dyn DocumentRepository<T>>,
    config: DocumentServiceConfig,
}

impl<T: SearchDocument> DocumentService<T> {
    /// Create a new DocumentService with default configuration.
    ///
    /// The default configuration includes a batch size limit of 1000 documents.
    pub fn new(repository: Box<dyn DocumentRepository<T>>) -> Self {
        Self {
            repository,
            config: DocumentServiceConfig::default(),
        }
    }

    /// Create a new DocumentService with custom configuration.
    pub fn with_config(
        repository: Box<dyn DocumentRepository<T>>,
        config: DocumentServiceConfig,
    ) -> Self {
        Self { repository, config }
    }

    /// Check if batch size exceeds the configured limit.
    fn validate_batch_size(&self, size: usize) -> Result<(), SearchIndexError> {
        if let Some(max) = self.config.max_batch_size {
            if size > max {
                return Err(SearchIndexError::batch_size_exceeded(size, max));
            }
        }
        Ok(())
    }

    /// Validate that an identifier is present.
    fn validate_id(field_name: &str, value: &str) -> Result<(), SearchIndexError> {
        if value.trim().is_empty() {
            return Err(SearchIndexError::validation(format!(
                "{} is required",
                field_name
            )));
        }
        Ok(())
    }

    /// The index schema for `T`, with the configured shard layout.
    ///
    /// Does not contact the server.
    pub fn mapping(&self) -> Result<SchemaDocument, SearchIndexError> {
        let schema = schema_for::<T>()?;
        Ok(schema.with_settings(IndexSettings {
            number_of_shards: self.config.number_of_shards,
            number_of_replicas: self.config.number_of_replicas,
        }))
    }

    /// Create the index and its alias if the alias does not exist yet.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the index is ready for use
    /// * `Err(SearchIndexError::SchemaError)` - If `T` cannot be mapped
    /// * `Err(SearchIndexError)` - If index or alias creation fails
    #[instrument(skip(self), fields(alias = T::index_alias()))]
    pub async fn ensure_index(&self) -> Result<(), SearchIndexError> {
        let schema = self.mapping()?;
        self.repository.ensure_index(&schema).await
    }

    /// Delete the current versioned index.
    pub async fn delete_index(&self) -> Result<(), SearchIndexError> {
        self.repository.delete_index().await
    }

    /// Make recent writes visible to search.
    pub async fn refresh(&self) -> Result<(), SearchIndexError> {
        self.repository.refresh().await
    }

    /// Store a document, replacing any previous version with the same id.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the document was indexed
    /// * `Err(SearchIndexError::ValidationError)` - If the document id is blank
    pub async fn index(&self, document: &T) -> Result<(), SearchIndexError> {
        Self::validate_id("document id", &document.document_id())?;
        self.repository.index_document(document).await
    }

    /// Merge a document into the stored one, creating it if it doesn't exist.
    pub async fn upsert(&self, document: &T) -> Result<(), SearchIndexError> {
        Self::validate_id("document id", &document.document_id())?;
        self.repository.upsert_document(document).await
    }

    /// Delete a document. Deleting a missing document succeeds.
    pub async fn delete(&self, id: &str) -> Result<(), SearchIndexError> {
        Self::validate_id("id", id)?;
        self.repository.delete_document(id).await
    }

    /// Fetch a document by id.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(T))` - The stored document
    /// * `Ok(None)` - If no document has this id
    pub async fn get(&self, id: &str) -> Result<Option<T>, SearchIndexError> {
        Self::validate_id("id", id)?;
        self.repository.get_document(id).await
    }

    /// Index many documents and return a summary of successful and failed operations.
    ///
    /// # Returns
    ///
    /// * `Ok(BatchOperationSummary)` - Per-item outcome
    /// * `Err(SearchIndexError::BatchSizeExceeded)` - If the batch size exceeds the configured maximum
    /// * `Err(SearchIndexError::ValidationError)` - If any document has a blank id
    pub async fn bulk_index(&self, documents: &[T]) -> Result<BatchOperationSummary, SearchIndexError> {
        if documents.is_empty() {
            return Ok(BatchOperationSummary::empty());
        }

        self.validate_batch_size(documents.len())?;
        for document in documents {
            Self::validate_id("document id", &document.document_id())?;
        }

        self.repository.bulk_index(documents).await
    }

    /// Upsert many documents and return a summary of successful and failed operations.
    pub async fn bulk_upsert(&self, documents: &[T]) -> Result<BatchOperationSummary, SearchIndexError> {
        if documents.is_empty() {
            return Ok(BatchOperationSummary::empty());
        }

        self.validate_batch_size(documents.len())?;
        for document in documents {
            Self::validate_id("document id", &document.document_id())?;
        }

        self.repository.bulk_upsert(documents).await
    }

    /// Delete many documents and return a summary of successful and failed operations.
    ///
    /// Documents that don't exist are considered successful deletions.
    pub async fn bulk_delete(&self, ids: &[String]) -> Result<BatchOperationSummary, SearchIndexError> {
        if ids.is_empty() {
            return Ok(BatchOperationSummary::empty());
        }

        self.validate_batch_size(ids.len())?;
        for id in ids {
            Self::validate_id("id", id)?;
        }

        self.repository.bulk_delete(ids).await
    }

    /// Compile a filter and return one page of matching documents.
    ///
    /// # Returns
    ///
    /// * `Ok(SearchPage<T>)` - Total hit count and decoded documents
    /// * `Err(SearchIndexError::QueryError)` - If the filter is malformed
    pub async fn search<P>(&self, filter: &P, page: Pagination) -> Result<SearchPage<T>, SearchIndexError>
    where
        P: PredicateSet + Sync + ?Sized,
    {
        let query = compile(filter)?;
        self.search_query(&query, page).await
    }

    /// Run an already compiled query.
    pub async fn search_query(
        &self,
        query: &CompiledQuery,
        page: Pagination,
    ) -> Result<SearchPage<T>, SearchIndexError> {
        let page = Pagination::new(page.from, page.size);
        self.repository.search(query, page).await
    }

    /// Delete every document whose `field` equals `value`.
    ///
    /// # Returns
    ///
    /// * `Ok(u64)` - Number of deleted documents
    /// * `Err(SearchIndexError::ValidationError)` - If `field` is blank
    pub async fn delete_by_term(
        &self,
        field: &str,
        value: impl Into<Value>,
    ) -> Result<u64, SearchIndexError> {
        Self::validate_id("field", field)?;
        let value = value.into();
        self.repository.delete_by_term(field, &value).await
    }
}
