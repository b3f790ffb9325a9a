//! Interface definitions for document storage.
//!
//! This module defines the abstract `DocumentRepository` trait so the service
//! can run against OpenSearch or an in-memory double.

mod document_repository;

pub use document_repository::DocumentRepository;
