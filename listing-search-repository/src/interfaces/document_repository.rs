//! Document repository trait definition.
//!
//! This module defines the abstract interface for storing and querying one
//! document type, allowing for different backend implementations.

use async_trait::async_trait;
use listing_search_dsl::{CompiledQuery, SchemaDocument};
use listing_search_shared::SearchDocument;
use serde_json::Value;

use crate::errors::SearchIndexError;
use crate::types::{BatchOperationSummary, Pagination, SearchPage};

/// Abstracts the search backend for one document type.
///
/// Implementations are injected into `DocumentService` to enable dependency
/// injection and easy testing with mock implementations. Every operation
/// addresses the index alias of `T`.
///
/// # Index Initialization
///
/// Call `ensure_index` during application startup so the versioned index and
/// its alias exist before any document operation.
#[async_trait]
pub trait DocumentRepository<T: SearchDocument>: Send + Sync {
    /// Create the index with `schema` and point the alias at it, unless the
    /// alias already exists.
    async fn ensure_index(&self, schema: &SchemaDocument) -> Result<(), SearchIndexError>;

    /// Delete the current versioned index.
    ///
    /// # Returns
    ///
    /// * `Err(SearchIndexError::IndexNotFound)` - If the index does not exist
    async fn delete_index(&self) -> Result<(), SearchIndexError>;

    /// Make recent writes visible to search.
    async fn refresh(&self) -> Result<(), SearchIndexError>;

    /// Store a document under its id, replacing any previous version.
    async fn index_document(&self, document: &T) -> Result<(), SearchIndexError>;

    /// Merge a document into the stored one, creating it if missing.
    async fn upsert_document(&self, document: &T) -> Result<(), SearchIndexError>;

    /// Delete a document. A missing document counts as deleted.
    async fn delete_document(&self, id: &str) -> Result<(), SearchIndexError>;

    /// Fetch a document by id, `None` when it does not exist.
    async fn get_document(&self, id: &str) -> Result<Option<T>, SearchIndexError>;

    /// Run a compiled query and decode one page of hits.
    async fn search(
        &self,
        query: &CompiledQuery,
        page: Pagination,
    ) -> Result<SearchPage<T>, SearchIndexError>;

    /// Index many documents in one request.
    ///
    /// # Returns
    ///
    /// * `Ok(BatchOperationSummary)` - Per-item outcome; item failures do not fail the call
    /// * `Err(SearchIndexError)` - If the request as a whole fails
    async fn bulk_index(&self, documents: &[T]) -> Result<BatchOperationSummary, SearchIndexError>;

    /// Upsert many documents in one request.
    async fn bulk_upsert(&self, documents: &[T]) -> Result<BatchOperationSummary, SearchIndexError>;

    /// Delete many documents in one request. Missing documents count as deleted.
    async fn bulk_delete(&self, ids: &[String]) -> Result<BatchOperationSummary, SearchIndexError>;

    /// Delete every document whose `field` equals `value`.
    ///
    /// # Returns
    ///
    /// * `Ok(u64)` - Number of deleted documents
    async fn delete_by_term(&self, field: &str, value: &Value) -> Result<u64, SearchIndexError>;
}
