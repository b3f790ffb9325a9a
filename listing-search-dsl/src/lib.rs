//! # Listing Search DSL
//!
//! This crate turns record and filter declarations into the JSON documents the
//! search engine expects. It has two independent halves:
//!
//! - [`mapping`]: builds an index schema (`settings` + `mappings`) from an
//!   explicit field-descriptor table.
//! - [`query`]: compiles a sparse set of optional predicates into a boolean
//!   query with optional sort directives.
//!
//! Nothing here performs I/O. Every function is a pure transformation from its
//! input to a freshly allocated document.

pub mod errors;
pub mod mapping;
pub mod query;

pub use errors::{QueryError, SchemaError};
pub use mapping::{
    build_schema, schema_for, FieldDescriptor, FieldKind, IndexSchema, IndexSettings,
    SchemaDocument, TypeDescriptor, UNIVERSAL_ANALYZER,
};
pub use query::{
    compile, Clause, CompiledQuery, Predicate, PredicateSet, Predicates, Scalar, SortDirective,
    SortOrder,
};
