//! Schema mapping.
//!
//! Converts an explicit field-descriptor table into the `settings` and
//! `mappings` body used to create an index.

mod annotation;
mod descriptor;
mod schema;

pub use descriptor::{FieldDescriptor, FieldKind, IndexSchema, TypeDescriptor};
pub use schema::{build_schema, schema_for, IndexSettings, SchemaDocument, UNIVERSAL_ANALYZER};
