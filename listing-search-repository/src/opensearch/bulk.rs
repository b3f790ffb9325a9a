//! Bulk request bodies and response decoding.

use opensearch::BulkOperation;
use serde_json::{json, Value};

use crate::errors::SearchIndexError;
use crate::types::{BatchOperationResult, BatchOperationSummary};

/// Kind of operation carried by a bulk request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BulkAction {
    Index,
    Upsert,
    Delete,
}

impl BulkAction {
    /// Key of the per-item result object in the bulk response.
    fn response_key(&self) -> &'static str {
        match self {
            BulkAction::Index => "index",
            BulkAction::Upsert => "update",
            BulkAction::Delete => "delete",
        }
    }
}

/// Build one bulk operation for a document or id.
pub(crate) fn operation(action: BulkAction, id: &str, source: Option<Value>) -> BulkOperation<Value> {
    match action {
        BulkAction::Index => BulkOperation::index(source.unwrap_or(Value::Null))
            .id(id)
            .into(),
        BulkAction::Upsert => BulkOperation::update(
            id,
            json!({
                "doc": source.unwrap_or(Value::Null),
                "doc_as_upsert": true
            }),
        )
        .into(),
        BulkAction::Delete => BulkOperation::delete(id).into(),
    }
}

/// Turn a bulk response into one result per requested id.
///
/// Items are matched to `ids` by position. A delete of a missing document
/// (status 404) counts as a success.
pub(crate) fn summarize(
    action: BulkAction,
    ids: &[String],
    body: &Value,
) -> Result<BatchOperationSummary, SearchIndexError> {
    let items = body
        .get("items")
        .and_then(Value::as_array)
        .ok_or_else(|| SearchIndexError::parse("Bulk response has no items"))?;

    if items.len() != ids.len() {
        return Err(SearchIndexError::parse(format!(
            "Bulk response has {} items for {} operations",
            items.len(),
            ids.len()
        )));
    }

    let results = items
        .iter()
        .zip(ids)
        .map(|(item, id)| item_result(action, id, item))
        .collect();

    Ok(BatchOperationSummary::from_results(results))
}

fn item_result(action: BulkAction, id: &str, item: &Value) -> BatchOperationResult {
    let Some(outcome) = item.get(action.response_key()) else {
        return BatchOperationResult::failed(
            id,
            SearchIndexError::parse(format!("Missing '{}' result", action.response_key())),
        );
    };

    let status = outcome.get("status").and_then(Value::as_u64).unwrap_or(0);
    if action == BulkAction::Delete && status == 404 {
        return BatchOperationResult::succeeded(id);
    }

    match outcome.get("error") {
        None if (200..300).contains(&status) => BatchOperationResult::succeeded(id),
        None => BatchOperationResult::failed(
            id,
            SearchIndexError::bulk_index(format!("Item failed with status {}", status)),
        ),
        Some(error) => {
            let kind = error.get("type").and_then(Value::as_str).unwrap_or("error");
            let reason = error
                .get("reason")
                .and_then(Value::as_str)
                .unwrap_or("unknown reason");
            BatchOperationResult::failed(
                id,
                SearchIndexError::bulk_index(format!("{} ({}): {}", kind, status, reason)),
            )
        }
    }
}
