//! OpenSearch implementation of the document repository.

mod bulk;
mod client;
mod index_config;
mod repository;

pub use ::opensearch::OpenSearch;
pub use client::connect;
pub use index_config::{versioned_index_name, IndexConfig};
pub use repository::OpenSearchRepository;
