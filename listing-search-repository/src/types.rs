//! Request and response types for search index operations.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::errors::SearchIndexError;

/// Largest page a single search may request.
pub const MAX_PAGE_SIZE: usize = 100;

/// Default number of hits per page.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Offset and size of a search result page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub from: usize,
    pub size: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            from: 0,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Pagination {
    /// Create a page, capping `size` at [`MAX_PAGE_SIZE`].
    pub fn new(from: usize, size: usize) -> Self {
        Self {
            from,
            size: size.min(MAX_PAGE_SIZE),
        }
    }

    /// Create the `page`-th page (zero-based) of `per_page` hits.
    pub fn page(page: usize, per_page: usize) -> Self {
        let size = per_page.min(MAX_PAGE_SIZE);
        Self {
            from: page.saturating_mul(size),
            size,
        }
    }
}

/// One page of decoded search hits.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchPage<T> {
    /// Total number of matching documents, not just those on this page.
    pub total: u64,
    /// Decoded `_source` of each hit, in engine order.
    pub documents: Vec<T>,
}

impl<T> Default for SearchPage<T> {
    fn default() -> Self {
        Self {
            total: 0,
            documents: Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse<T> {
    hits: SearchHits<T>,
}

#[derive(Debug, Deserialize)]
struct SearchHits<T> {
    total: Option<TotalHits>,
    #[serde(default = "Vec::new")]
    hits: Vec<SearchHit<T>>,
}

#[derive(Debug, Deserialize)]
struct SearchHit<T> {
    #[serde(rename = "_source")]
    source: T,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TotalHits {
    Object { value: u64 },
    Count(u64),
}

impl TotalHits {
    fn value(&self) -> u64 {
        match self {
            TotalHits::Object { value } | TotalHits::Count(value) => *value,
        }
    }
}

impl<T: DeserializeOwned> SearchPage<T> {
    /// Decode a `_search` response body.
    pub fn from_response(body: Value) -> Result<Self, SearchIndexError> {
        let response: SearchResponse<T> = serde_json::from_value(body)
            .map_err(|e| SearchIndexError::parse(format!("Invalid search response: {}", e)))?;

        let documents: Vec<T> = response.hits.hits.into_iter().map(|hit| hit.source).collect();
        let total = response
            .hits
            .total
            .map(|t| t.value())
            .unwrap_or(documents.len() as u64);

        Ok(Self { total, documents })
    }
}

/// Result of a batch operation for a single item.
///
/// This struct represents the outcome of a single operation within a batch (e.g.,
/// indexing, updating, or deleting one document). It indicates whether the operation
/// succeeded and includes error details if it failed.
#[derive(Debug, Clone)]
pub struct BatchOperationResult {
    /// Id of the document the operation targeted.
    pub id: String,
    /// Whether the operation succeeded.
    pub success: bool,
    /// Error if the operation failed.
    pub error: Option<SearchIndexError>,
}

impl BatchOperationResult {
    pub fn succeeded(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            success: true,
            error: None,
        }
    }

    pub fn failed(id: impl Into<String>, error: SearchIndexError) -> Self {
        Self {
            id: id.into(),
            success: false,
            error: Some(error),
        }
    }
}

/// Summary of a batch operation containing aggregate statistics and individual results.
///
/// This struct provides a complete overview of a bulk operation, including the total
/// number of items processed, how many succeeded and failed, and detailed results for
/// each individual item. This allows callers to handle partial failures gracefully.
#[derive(Debug, Clone, Default)]
pub struct BatchOperationSummary {
    /// Total number of items in the batch.
    pub total: usize,
    /// Number of successful operations.
    pub succeeded: usize,
    /// Number of failed operations.
    pub failed: usize,
    /// Individual results for each item.
    pub results: Vec<BatchOperationResult>,
}

impl BatchOperationSummary {
    /// An empty summary for an empty batch.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a summary from per-item results.
    pub fn from_results(results: Vec<BatchOperationResult>) -> Self {
        let succeeded = results.iter().filter(|r| r.success).count();
        Self {
            total: results.len(),
            succeeded,
            failed: results.len() - succeeded,
            results,
        }
    }

    /// Results of the items that failed.
    pub fn failures(&self) -> impl Iterator<Item = &BatchOperationResult> {
        self.results.iter().filter(|r| !r.success)
    }
}
