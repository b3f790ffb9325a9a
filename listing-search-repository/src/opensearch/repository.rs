//! OpenSearch repository implementation.
//!
//! This module provides the concrete implementation of `DocumentRepository`
//! using the OpenSearch Rust crate.

use std::marker::PhantomData;

use async_trait::async_trait;
use listing_search_dsl::{CompiledQuery, SchemaDocument};
use listing_search_shared::SearchDocument;
use opensearch::{
    http::response::Response,
    indices::{
        IndicesCreateParts, IndicesDeleteParts, IndicesExistsAliasParts, IndicesPutAliasParts,
        IndicesRefreshParts,
    },
    params::Refresh,
    BulkOperation, BulkParts, DeleteByQueryParts, DeleteParts, GetParts, IndexParts, OpenSearch,
    SearchParts, UpdateParts,
};
use serde_json::{json, Value};
use tracing::{debug, error, info, warn};

use crate::errors::SearchIndexError;
use crate::interfaces::DocumentRepository;
use crate::opensearch::bulk::{self, BulkAction};
use crate::opensearch::index_config::IndexConfig;
use crate::types::{BatchOperationSummary, Pagination, SearchPage};

/// OpenSearch repository for one document type.
///
/// All reads and writes go through the alias in `index_config`; only index
/// creation and deletion touch the versioned index directly.
///
/// # Example
///
/// ```no_run
/// use listing_search_repository::{connect, ClientConfig, IndexConfig, OpenSearchRepository};
/// use listing_search_shared::Car;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = connect(&ClientConfig::new("http://localhost:9200")).await?;
/// let repository: OpenSearchRepository<Car> =
///     OpenSearchRepository::new(client, IndexConfig::for_document::<Car>(0));
/// # Ok(())
/// # }
/// ```
pub struct OpenSearchRepository<T> {
    client: OpenSearch,
    index_config: IndexConfig,
    _document: PhantomData<fn() -> T>,
}

impl<T: SearchDocument> OpenSearchRepository<T> {
    /// Create a repository on an already connected client.
    pub fn new(client: OpenSearch, index_config: IndexConfig) -> Self {
        info!(
            alias = %index_config.alias,
            version = index_config.version,
            "Created OpenSearch repository"
        );

        Self {
            client,
            index_config,
            _document: PhantomData,
        }
    }

    pub fn index_config(&self) -> &IndexConfig {
        &self.index_config
    }

    fn refresh_policy(&self) -> Refresh {
        if self.index_config.wait_for_refresh {
            Refresh::WaitFor
        } else {
            Refresh::False
        }
    }

    fn to_source(document: &T) -> Result<Value, SearchIndexError> {
        serde_json::to_value(document).map_err(|e| SearchIndexError::serialization(e.to_string()))
    }

    async fn alias_exists(&self) -> Result<bool, SearchIndexError> {
        let response = self
            .client
            .indices()
            .exists_alias(IndicesExistsAliasParts::Name(&[self.index_config.alias.as_str()]))
            .send()
            .await
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        match response.status_code().as_u16() {
            200 => Ok(true),
            404 => Ok(false),
            _ => Err(failed_response(response, "Alias check").await),
        }
    }

    async fn create_index(&self, index_name: &str, schema: &SchemaDocument) -> Result<(), SearchIndexError> {
        let response = self
            .client
            .indices()
            .create(IndicesCreateParts::Index(index_name))
            .body(schema.to_json())
            .send()
            .await
            .map_err(|e| SearchIndexError::index_creation(e.to_string()))?;

        let status = response.status_code();
        if status.is_success() {
            info!(index = %index_name, "Created index");
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        // A previous run may have created the index but not the alias.
        if status.as_u16() == 400 && body.contains("resource_already_exists_exception") {
            warn!(index = %index_name, "Index already exists without alias");
            return Ok(());
        }

        error!(status = %status, body = %body, index = %index_name, "Index creation failed");
        Err(SearchIndexError::response(status.as_u16(), body))
    }

    async fn put_alias(&self, index_name: &str) -> Result<(), SearchIndexError> {
        let response = self
            .client
            .indices()
            .put_alias(IndicesPutAliasParts::IndexName(
                &[index_name],
                &self.index_config.alias,
            ))
            .send()
            .await
            .map_err(|e| SearchIndexError::index_creation(e.to_string()))?;

        if !response.status_code().is_success() {
            return Err(failed_response(response, "Alias creation").await);
        }

        info!(index = %index_name, alias = %self.index_config.alias, "Alias attached");
        Ok(())
    }

    async fn send_bulk(
        &self,
        action: BulkAction,
        ids: Vec<String>,
        operations: Vec<BulkOperation<Value>>,
    ) -> Result<BatchOperationSummary, SearchIndexError> {
        let response = self
            .client
            .bulk(BulkParts::Index(&self.index_config.alias))
            .body(operations)
            .refresh(self.refresh_policy())
            .send()
            .await
            .map_err(|e| SearchIndexError::bulk_index(e.to_string()))?;

        if !response.status_code().is_success() {
            return Err(failed_response(response, "Bulk request").await);
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| SearchIndexError::parse(e.to_string()))?;

        let summary = bulk::summarize(action, &ids, &body)?;
        if summary.failed > 0 {
            warn!(
                alias = %self.index_config.alias,
                action = ?action,
                succeeded = summary.succeeded,
                failed = summary.failed,
                "Bulk request completed with some failures"
            );
        } else {
            debug!(alias = %self.index_config.alias, action = ?action, count = summary.total, "Bulk request completed");
        }
        Ok(summary)
    }

    async fn bulk_documents(
        &self,
        action: BulkAction,
        documents: &[T],
    ) -> Result<BatchOperationSummary, SearchIndexError> {
        let mut ids = Vec::with_capacity(documents.len());
        let mut operations = Vec::with_capacity(documents.len());
        for document in documents {
            let id = document.document_id();
            operations.push(bulk::operation(action, &id, Some(Self::to_source(document)?)));
            ids.push(id);
        }
        self.send_bulk(action, ids, operations).await
    }
}

/// Read the body of a failed response and turn it into an error.
async fn failed_response(response: Response, operation: &str) -> SearchIndexError {
    let status = response.status_code();
    let body = response.text().await.unwrap_or_default();
    error!(status = %status, body = %body, "{} failed", operation);
    SearchIndexError::response(status.as_u16(), body)
}

#[async_trait]
impl<T: SearchDocument> DocumentRepository<T> for OpenSearchRepository<T> {
    async fn ensure_index(&self, schema: &SchemaDocument) -> Result<(), SearchIndexError> {
        if self.alias_exists().await? {
            debug!(alias = %self.index_config.alias, "Alias already exists");
            return Ok(());
        }

        let index_name = self.index_config.index_name();
        self.create_index(&index_name, schema).await?;
        self.put_alias(&index_name).await
    }

    async fn delete_index(&self) -> Result<(), SearchIndexError> {
        let index_name = self.index_config.index_name();
        let response = self
            .client
            .indices()
            .delete(IndicesDeleteParts::Index(&[index_name.as_str()]))
            .send()
            .await
            .map_err(|e| SearchIndexError::delete(e.to_string()))?;

        let status = response.status_code();
        if status.as_u16() == 404 {
            return Err(SearchIndexError::index_not_found(index_name));
        }
        if !status.is_success() {
            return Err(failed_response(response, "Index deletion").await);
        }

        info!(index = %index_name, "Deleted index");
        Ok(())
    }

    async fn refresh(&self) -> Result<(), SearchIndexError> {
        let response = self
            .client
            .indices()
            .refresh(IndicesRefreshParts::Index(&[self.index_config.alias.as_str()]))
            .send()
            .await
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        if !response.status_code().is_success() {
            return Err(failed_response(response, "Refresh").await);
        }
        Ok(())
    }

    async fn index_document(&self, document: &T) -> Result<(), SearchIndexError> {
        let id = document.document_id();
        let response = self
            .client
            .index(IndexParts::IndexId(&self.index_config.alias, &id))
            .body(Self::to_source(document)?)
            .refresh(self.refresh_policy())
            .send()
            .await
            .map_err(|e| SearchIndexError::index(e.to_string()))?;

        if !response.status_code().is_success() {
            return Err(failed_response(response, "Index request").await);
        }

        debug!(alias = %self.index_config.alias, doc_id = %id, "Document indexed");
        Ok(())
    }

    async fn upsert_document(&self, document: &T) -> Result<(), SearchIndexError> {
        let id = document.document_id();
        let response = self
            .client
            .update(UpdateParts::IndexId(&self.index_config.alias, &id))
            .body(json!({
                "doc": Self::to_source(document)?,
                "doc_as_upsert": true
            }))
            .refresh(self.refresh_policy())
            .send()
            .await
            .map_err(|e| SearchIndexError::update(e.to_string()))?;

        if !response.status_code().is_success() {
            return Err(failed_response(response, "Update request").await);
        }

        debug!(alias = %self.index_config.alias, doc_id = %id, "Document updated/created");
        Ok(())
    }

    async fn delete_document(&self, id: &str) -> Result<(), SearchIndexError> {
        let response = self
            .client
            .delete(DeleteParts::IndexId(&self.index_config.alias, id))
            .refresh(self.refresh_policy())
            .send()
            .await
            .map_err(|e| SearchIndexError::delete(e.to_string()))?;

        let status = response.status_code();

        // 404 is acceptable - document may not exist
        if !status.is_success() && status.as_u16() != 404 {
            return Err(failed_response(response, "Delete request").await);
        }

        debug!(alias = %self.index_config.alias, doc_id = %id, "Document deleted");
        Ok(())
    }

    async fn get_document(&self, id: &str) -> Result<Option<T>, SearchIndexError> {
        let response = self
            .client
            .get(GetParts::IndexId(&self.index_config.alias, id))
            .send()
            .await
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let status = response.status_code();
        if status.as_u16() == 404 {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(failed_response(response, "Get request").await);
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| SearchIndexError::parse(e.to_string()))?;

        if body.get("found").and_then(Value::as_bool) == Some(false) {
            return Ok(None);
        }

        let source = body
            .get("_source")
            .cloned()
            .ok_or_else(|| SearchIndexError::parse(format!("Document {} has no _source", id)))?;

        serde_json::from_value(source)
            .map(Some)
            .map_err(|e| SearchIndexError::parse(e.to_string()))
    }

    async fn search(
        &self,
        query: &CompiledQuery,
        page: Pagination,
    ) -> Result<SearchPage<T>, SearchIndexError> {
        let mut body = query.to_json();
        body["from"] = json!(page.from);
        body["size"] = json!(page.size);
        body["track_total_hits"] = json!(true);

        debug!(alias = %self.index_config.alias, body = %body, "Running search");

        let response = self
            .client
            .search(SearchParts::Index(&[self.index_config.alias.as_str()]))
            .body(body)
            .send()
            .await
            .map_err(|e| SearchIndexError::search(e.to_string()))?;

        if !response.status_code().is_success() {
            return Err(failed_response(response, "Search request").await);
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| SearchIndexError::parse(e.to_string()))?;

        SearchPage::from_response(body)
    }

    async fn bulk_index(&self, documents: &[T]) -> Result<BatchOperationSummary, SearchIndexError> {
        self.bulk_documents(BulkAction::Index, documents).await
    }

    async fn bulk_upsert(&self, documents: &[T]) -> Result<BatchOperationSummary, SearchIndexError> {
        self.bulk_documents(BulkAction::Upsert, documents).await
    }

    async fn bulk_delete(&self, ids: &[String]) -> Result<BatchOperationSummary, SearchIndexError> {
        let operations = ids
            .iter()
            .map(|id| bulk::operation(BulkAction::Delete, id, None))
            .collect();
        self.send_bulk(BulkAction::Delete, ids.to_vec(), operations).await
    }

    async fn delete_by_term(&self, field: &str, value: &Value) -> Result<u64, SearchIndexError> {
        let response = self
            .client
            .delete_by_query(DeleteByQueryParts::Index(&[self.index_config.alias.as_str()]))
            .body(json!({
                "query": {"term": {field: value}}
            }))
            .refresh(true)
            .send()
            .await
            .map_err(|e| SearchIndexError::delete(e.to_string()))?;

        if !response.status_code().is_success() {
            return Err(failed_response(response, "Delete by query").await);
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| SearchIndexError::parse(e.to_string()))?;
        let deleted = body.get("deleted").and_then(Value::as_u64).unwrap_or(0);

        info!(
            alias = %self.index_config.alias,
            field = %field,
            deleted = deleted,
            "Deleted documents by term"
        );
        Ok(deleted)
    }
}
