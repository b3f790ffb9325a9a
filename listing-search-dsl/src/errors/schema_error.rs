use thiserror::Error;

/// Errors raised while building an index schema from a type descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// The top-level type is not a record (e.g. a bare scalar or a collection).
    #[error("Unsupported type: expected a record, got {0}")]
    UnsupportedType(String),

    /// Two fields resolve to the same schema name.
    #[error("Duplicate field name: {0}")]
    DuplicateField(String),
}

impl SchemaError {
    /// Create an unsupported type error.
    pub fn unsupported_type(kind: impl Into<String>) -> Self {
        Self::UnsupportedType(kind.into())
    }

    /// Create a duplicate field error.
    pub fn duplicate_field(name: impl Into<String>) -> Self {
        Self::DuplicateField(name.into())
    }
}
