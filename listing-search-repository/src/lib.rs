//! # Listing Search Repository
//!
//! This crate provides the document repository trait, its OpenSearch
//! implementation and the `DocumentService` that application code uses to
//! store, fetch and search listing documents. Schemas and queries are built by
//! `listing-search-dsl`; this crate only forwards them and maps the responses.

pub mod config;
pub mod errors;
pub mod interfaces;
pub mod opensearch;
pub mod service;
pub mod types;

pub use config::{ClientConfig, DocumentServiceConfig};
pub use errors::SearchIndexError;
pub use interfaces::DocumentRepository;
pub use opensearch::{connect, IndexConfig, OpenSearchRepository};
pub use service::DocumentService;
pub use types::{
    BatchOperationResult, BatchOperationSummary, Pagination, SearchPage, MAX_PAGE_SIZE,
};
