//! OpenSearch index naming and write settings.

use listing_search_shared::SearchDocument;

/// Configuration for one document index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexConfig {
    /// The alias name for the search index (used for all operations).
    pub alias: String,
    /// The version number for the index (e.g., 0 for "cars_v0").
    pub version: u32,
    /// Wait for writes to become searchable before returning.
    pub wait_for_refresh: bool,
}

impl IndexConfig {
    /// Create a new index configuration.
    ///
    /// # Arguments
    ///
    /// * `alias` - The index alias name
    /// * `version` - The version number
    pub fn new(alias: impl Into<String>, version: u32) -> Self {
        Self {
            alias: alias.into(),
            version,
            wait_for_refresh: true,
        }
    }

    /// Configuration for the alias a document type declares.
    pub fn for_document<T: SearchDocument>(version: u32) -> Self {
        Self::new(T::index_alias(), version)
    }

    /// Return writes without waiting for a refresh.
    pub fn without_refresh(mut self) -> Self {
        self.wait_for_refresh = false;
        self
    }

    /// The concrete index the alias points at.
    pub fn index_name(&self) -> String {
        versioned_index_name(&self.alias, self.version)
    }
}

/// Get the versioned index name.
///
/// # Returns
///
/// The versioned index name (e.g., "cars_v0")
pub fn versioned_index_name(alias: &str, version: u32) -> String {
    format!("{}_v{}", alias, version)
}
