//! # Listing Indexer
//!
//! Prepares the OpenSearch cluster for listing search: connects, then makes
//! sure the versioned `cars`, `motos`, `trucks` and `stocks` indices exist
//! behind their aliases.
//!
//! ## Modules
//!
//! - [`config`]: Environment settings and dependency initialization
//! - [`bootstrap`]: Ensures every listing index exists

pub mod bootstrap;
pub mod config;

pub use bootstrap::{IndexBootstrap, ListingIndex};
pub use config::{ConnectionMode, Dependencies, IndexerSettings};

use listing_search_repository::SearchIndexError;
use thiserror::Error;

/// Errors that can occur during indexer initialization or execution.
#[derive(Error, Debug)]
pub enum IndexerError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Search backend error.
    #[error("Search error: {0}")]
    SearchError(#[from] SearchIndexError),
}

impl IndexerError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
