//! Search index error types.
//!
//! This module defines the unified error type for all repository and service
//! operations, covering transport failures, non-success responses and the
//! schema/query errors raised while building request bodies.

use listing_search_dsl::{QueryError, SchemaError};
use serde_json::Value;
use thiserror::Error;

/// Unified errors from search index operations.
///
/// Used by the `DocumentRepository` trait and `DocumentService`. Transport
/// errors from the client library are carried as strings; a response with a
/// non-success status becomes [`SearchIndexError::ResponseError`].
#[derive(Debug, Clone, Error)]
pub enum SearchIndexError {
    /// Validation error (e.g., blank document id).
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Failed to establish connection to the search index backend.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Failed to index a document.
    #[error("Index error: {0}")]
    IndexError(String),

    /// Bulk operation failed, or one item of it did.
    #[error("Bulk index error: {0}")]
    BulkIndexError(String),

    /// Failed to update a document.
    #[error("Update error: {0}")]
    UpdateError(String),

    /// Failed to delete a document.
    #[error("Delete error: {0}")]
    DeleteError(String),

    /// Failed to create the search index or its alias.
    #[error("Index creation error: {0}")]
    IndexCreationError(String),

    /// The index does not exist.
    #[error("Index not found: {0}")]
    IndexNotFound(String),

    /// Failed to run a search.
    #[error("Search error: {0}")]
    SearchError(String),

    /// Failed to parse response from search index backend.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Failed to serialize data for the search index backend.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// The backend answered with a non-success status.
    #[error("Request failed with status {status}: {reason}")]
    ResponseError {
        status: u16,
        reason: String,
        body: String,
    },

    /// Batch size exceeds configured maximum.
    #[error("Batch size {provided} exceeds maximum {max}")]
    BatchSizeExceeded { provided: usize, max: usize },

    /// The document type could not be mapped to an index schema.
    #[error("Schema error: {0}")]
    SchemaError(#[from] SchemaError),

    /// The filter could not be compiled.
    #[error("Query error: {0}")]
    QueryError(#[from] QueryError),
}

impl SearchIndexError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create an index error.
    pub fn index(msg: impl Into<String>) -> Self {
        Self::IndexError(msg.into())
    }

    /// Create a bulk index error.
    pub fn bulk_index(msg: impl Into<String>) -> Self {
        Self::BulkIndexError(msg.into())
    }

    /// Create an update error.
    pub fn update(msg: impl Into<String>) -> Self {
        Self::UpdateError(msg.into())
    }

    /// Create a delete error.
    pub fn delete(msg: impl Into<String>) -> Self {
        Self::DeleteError(msg.into())
    }

    /// Create an index creation error.
    pub fn index_creation(msg: impl Into<String>) -> Self {
        Self::IndexCreationError(msg.into())
    }

    /// Create an index not found error.
    pub fn index_not_found(index: impl Into<String>) -> Self {
        Self::IndexNotFound(index.into())
    }

    /// Create a search error.
    pub fn search(msg: impl Into<String>) -> Self {
        Self::SearchError(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }

    /// Create a serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::SerializationError(msg.into())
    }

    /// Create a batch size exceeded error.
    pub fn batch_size_exceeded(provided: usize, max: usize) -> Self {
        Self::BatchSizeExceeded { provided, max }
    }

    /// Create an error from a non-success response.
    ///
    /// The reason is taken from the engine's `error.reason` (or `error.type`,
    /// or a plain string `error`) when the body is JSON, otherwise it falls
    /// back to the raw body.
    pub fn response(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        let reason = serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|json| extract_reason(&json))
            .unwrap_or_else(|| {
                if body.is_empty() {
                    format!("HTTP {}", status)
                } else {
                    body.clone()
                }
            });
        Self::ResponseError {
            status,
            reason,
            body,
        }
    }
}

fn extract_reason(json: &Value) -> Option<String> {
    let error = json.get("error")?;
    if let Some(reason) = error.as_str() {
        return Some(reason.to_string());
    }
    error
        .get("reason")
        .or_else(|| error.get("type"))
        .and_then(Value::as_str)
        .map(str::to_string)
}
