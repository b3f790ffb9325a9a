//! Common trait for indexable listing documents.

use listing_search_dsl::{FieldDescriptor, IndexSchema};
use serde::{de::DeserializeOwned, Serialize};

/// A document that can be stored in and loaded from a search index.
///
/// The schema comes from [`IndexSchema`]; the document id and index alias are
/// declared here so a generic repository can route every operation.
pub trait SearchDocument: IndexSchema + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// The alias all operations on this document type go through.
    fn index_alias() -> &'static str;

    /// The id the document is stored under.
    fn document_id(&self) -> String;
}

/// Keyword descriptors for a field stored in the three listing languages
/// (`{prefix}_tm`, `{prefix}_en`, `{prefix}_ru`).
pub(crate) fn localized_keywords(prefix: &str) -> Vec<FieldDescriptor> {
    ["tm", "en", "ru"]
        .iter()
        .map(|lang| FieldDescriptor::keyword(format!("{}_{}", prefix, lang)))
        .collect()
}

/// Full-text descriptors for a field stored in the three listing languages.
pub(crate) fn localized_text(prefix: &str) -> Vec<FieldDescriptor> {
    ["tm", "en", "ru"]
        .iter()
        .map(|lang| FieldDescriptor::text(format!("{}_{}", prefix, lang)))
        .collect()
}
