use thiserror::Error;

/// Errors raised while compiling a predicate set into a query.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// A predicate value cannot be expressed as a valid query clause.
    #[error("Invalid predicate on '{field}': {reason}")]
    InvalidPredicate { field: String, reason: String },
}

impl QueryError {
    /// Create an invalid predicate error.
    pub fn invalid_predicate(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPredicate {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
