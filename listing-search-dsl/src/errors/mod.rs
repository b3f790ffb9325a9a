//! Error types for schema mapping and query compilation.
//!
//! Both errors describe malformed input. Neither is transient, so callers
//! should fix the input rather than retry.

mod query_error;
mod schema_error;

pub use query_error::QueryError;
pub use schema_error::SchemaError;
