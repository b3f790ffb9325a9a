//! Drives `DocumentService` end to end against an in-memory repository that
//! evaluates compiled queries the way the engine would for these fields.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::marker::PhantomData;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use listing_search_dsl::{Clause, CompiledQuery, SchemaDocument, SortOrder};
use listing_search_repository::{
    BatchOperationResult, BatchOperationSummary, DocumentRepository, DocumentService,
    Pagination, SearchIndexError, SearchPage,
};
use listing_search_shared::{Car, CarFilter, SearchDocument};
use serde_json::{json, Value};
use tokio::sync::Mutex;

struct InMemoryRepository<T> {
    documents: Mutex<BTreeMap<String, Value>>,
    schema: Mutex<Option<SchemaDocument>>,
    _document: PhantomData<fn() -> T>,
}

impl<T> InMemoryRepository<T> {
    fn new() -> Self {
        Self {
            documents: Mutex::new(BTreeMap::new()),
            schema: Mutex::new(None),
            _document: PhantomData,
        }
    }
}

fn compare(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64()?.partial_cmp(&y.as_f64()?),
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        _ => None,
    }
}

fn matches(source: &Value, clause: &Clause) -> bool {
    match clause {
        Clause::Term { field, value } => source.get(field) == Some(value),
        Clause::Terms { field, values } => source
            .get(field)
            .map(|v| values.contains(v))
            .unwrap_or(false),
        Clause::Match { field, query } => text_contains(source, field, query),
        Clause::MultiMatch { fields, query } => {
            fields.iter().any(|field| text_contains(source, field, query))
        }
        Clause::Range { field, gt, gte, lte } => {
            let Some(value) = source.get(field) else {
                return false;
            };
            let above = |bound: &Option<Value>, strict: bool| match bound {
                None => true,
                Some(b) => match compare(value, b) {
                    Some(Ordering::Greater) => true,
                    Some(Ordering::Equal) => !strict,
                    _ => false,
                },
            };
            let below = match lte {
                None => true,
                Some(b) => matches!(compare(value, b), Some(Ordering::Less | Ordering::Equal)),
            };
            above(gt, true) && above(gte, false) && below
        }
        Clause::MustNot(clauses) => !clauses.iter().any(|c| matches(source, c)),
    }
}

fn text_contains(source: &Value, field: &str, query: &str) -> bool {
    source
        .get(field)
        .and_then(Value::as_str)
        .map(|text| text.to_lowercase().contains(&query.to_lowercase()))
        .unwrap_or(false)
}

#[async_trait]
impl<T: SearchDocument> DocumentRepository<T> for InMemoryRepository<T> {
    async fn ensure_index(&self, schema: &SchemaDocument) -> Result<(), SearchIndexError> {
        let mut current = self.schema.lock().await;
        if current.is_none() {
            *current = Some(schema.clone());
        }
        Ok(())
    }

    async fn delete_index(&self) -> Result<(), SearchIndexError> {
        if self.schema.lock().await.take().is_none() {
            return Err(SearchIndexError::index_not_found(T::index_alias()));
        }
        self.documents.lock().await.clear();
        Ok(())
    }

    async fn refresh(&self) -> Result<(), SearchIndexError> {
        Ok(())
    }

    async fn index_document(&self, document: &T) -> Result<(), SearchIndexError> {
        let source = serde_json::to_value(document)
            .map_err(|e| SearchIndexError::serialization(e.to_string()))?;
        self.documents
            .lock()
            .await
            .insert(document.document_id(), source);
        Ok(())
    }

    async fn upsert_document(&self, document: &T) -> Result<(), SearchIndexError> {
        let source = serde_json::to_value(document)
            .map_err(|e| SearchIndexError::serialization(e.to_string()))?;
        let mut documents = self.documents.lock().await;
        let entry = documents
            .entry(document.document_id())
            .or_insert_with(|| json!({}));
        if let (Some(stored), Value::Object(fields)) = (entry.as_object_mut(), source) {
            stored.extend(fields);
        }
        Ok(())
    }

    async fn delete_document(&self, id: &str) -> Result<(), SearchIndexError> {
        self.documents.lock().await.remove(id);
        Ok(())
    }

    async fn get_document(&self, id: &str) -> Result<Option<T>, SearchIndexError> {
        self.documents
            .lock()
            .await
            .get(id)
            .map(|source| {
                serde_json::from_value(source.clone())
                    .map_err(|e| SearchIndexError::parse(e.to_string()))
            })
            .transpose()
    }

    async fn search(
        &self,
        query: &CompiledQuery,
        page: Pagination,
    ) -> Result<SearchPage<T>, SearchIndexError> {
        let documents = self.documents.lock().await;
        let mut hits: Vec<&Value> = documents
            .values()
            .filter(|source| query.must().iter().all(|c| matches(source, c)))
            .collect();

        for directive in query.sort().iter().rev() {
            hits.sort_by(|a, b| {
                let ordering = match (a.get(&directive.field), b.get(&directive.field)) {
                    (Some(x), Some(y)) => compare(x, y).unwrap_or(Ordering::Equal),
                    _ => Ordering::Equal,
                };
                match directive.order {
                    SortOrder::Ascending => ordering,
                    SortOrder::Descending => ordering.reverse(),
                }
            });
        }

        let total = hits.len() as u64;
        let documents = hits
            .into_iter()
            .skip(page.from)
            .take(page.size)
            .map(|source| {
                serde_json::from_value(source.clone())
                    .map_err(|e| SearchIndexError::parse(e.to_string()))
            })
            .collect::<Result<Vec<T>, _>>()?;

        Ok(SearchPage { total, documents })
    }

    async fn bulk_index(&self, documents: &[T]) -> Result<BatchOperationSummary, SearchIndexError> {
        let mut results = Vec::new();
        for document in documents {
            let id = document.document_id();
            match self.index_document(document).await {
                Ok(()) => results.push(BatchOperationResult::succeeded(id)),
                Err(e) => results.push(BatchOperationResult::failed(id, e)),
            }
        }
        Ok(BatchOperationSummary::from_results(results))
    }

    async fn bulk_upsert(&self, documents: &[T]) -> Result<BatchOperationSummary, SearchIndexError> {
        let mut results = Vec::new();
        for document in documents {
            let id = document.document_id();
            match self.upsert_document(document).await {
                Ok(()) => results.push(BatchOperationResult::succeeded(id)),
                Err(e) => results.push(BatchOperationResult::failed(id, e)),
            }
        }
        Ok(BatchOperationSummary::from_results(results))
    }

    async fn bulk_delete(&self, ids: &[String]) -> Result<BatchOperationSummary, SearchIndexError> {
        let mut documents = self.documents.lock().await;
        let results = ids
            .iter()
            .map(|id| {
                documents.remove(id);
                BatchOperationResult::succeeded(id)
            })
            .collect();
        Ok(BatchOperationSummary::from_results(results))
    }

    async fn delete_by_term(&self, field: &str, value: &Value) -> Result<u64, SearchIndexError> {
        let mut documents = self.documents.lock().await;
        let before = documents.len();
        documents.retain(|_, source| source.get(field) != Some(value));
        Ok((before - documents.len()) as u64)
    }
}

fn car(id: i64, year: i64, price: i64, color: &str, stock_id: Option<i64>) -> Car {
    Car {
        id,
        user_id: id % 2 + 1,
        stock_id,
        brand_name: Some(if id % 2 == 0 { "Toyota" } else { "Lexus" }.to_string()),
        year,
        price,
        color: color.to_string(),
        status: "active".to_string(),
        created_at: Utc.with_ymd_and_hms(2024, 1, id as u32, 12, 0, 0).unwrap(),
        ..Default::default()
    }
}

async fn seeded_service() -> DocumentService<Car> {
    let service: DocumentService<Car> = DocumentService::new(Box::new(InMemoryRepository::<Car>::new()));
    service.ensure_index().await.unwrap();

    let cars = vec![
        car(1, 2012, 9_000, "white", None),
        car(2, 2016, 15_000, "blue", Some(4)),
        car(3, 2019, 22_000, "red", Some(4)),
        car(4, 2021, 31_000, "blue", None),
        car(5, 2018, 18_000, "black", Some(0)),
    ];
    let summary = service.bulk_index(&cars).await.unwrap();
    assert_eq!(summary.succeeded, 5);
    service
}

fn ids(page: &SearchPage<Car>) -> Vec<i64> {
    page.documents.iter().map(|c| c.id).collect()
}

#[tokio::test]
async fn test_unfiltered_search_returns_newest_first() {
    let service = seeded_service().await;

    let page = service
        .search(&CarFilter::default(), Pagination::default())
        .await
        .unwrap();

    assert_eq!(page.total, 5);
    assert_eq!(ids(&page), vec![5, 4, 3, 2, 1]);
}

#[tokio::test]
async fn test_year_color_and_company_filter() {
    let service = seeded_service().await;

    let filter = CarFilter {
        min_year: Some(2015),
        max_year: Some(2020),
        color: vec!["blue".to_string(), "red".to_string()],
        is_company: Some(true),
        ..Default::default()
    };
    let page = service.search(&filter, Pagination::default()).await.unwrap();

    assert_eq!(page.total, 2);
    assert_eq!(ids(&page), vec![3, 2]);
}

#[tokio::test]
async fn test_private_listings_include_zero_stock() {
    let service = seeded_service().await;

    let filter = CarFilter {
        is_private: Some(true),
        ..Default::default()
    };
    let page = service.search(&filter, Pagination::default()).await.unwrap();

    assert_eq!(ids(&page), vec![5, 4, 1]);
}

#[tokio::test]
async fn test_price_sort_and_pagination() {
    let service = seeded_service().await;

    let filter = CarFilter {
        price_order: Some(SortOrder::Ascending),
        ..Default::default()
    };
    let first = service.search(&filter, Pagination::page(0, 2)).await.unwrap();
    let second = service.search(&filter, Pagination::page(1, 2)).await.unwrap();

    assert_eq!(first.total, 5);
    assert_eq!(ids(&first), vec![1, 2]);
    assert_eq!(ids(&second), vec![5, 3]);
}

#[tokio::test]
async fn test_text_and_time_range() {
    let service = seeded_service().await;

    let filter = CarFilter {
        text: Some("toyota".to_string()),
        created_from: Some(Utc.with_ymd_and_hms(2024, 1, 3, 0, 0, 0).unwrap()),
        ..Default::default()
    };
    let page = service.search(&filter, Pagination::default()).await.unwrap();

    assert_eq!(ids(&page), vec![4]);
}

#[tokio::test]
async fn test_upsert_get_and_delete_lifecycle() {
    let service = seeded_service().await;

    let mut updated = car(2, 2016, 14_500, "blue", Some(4));
    updated.description = Some("price reduced".to_string());
    service.upsert(&updated).await.unwrap();

    let stored = service.get("2").await.unwrap().unwrap();
    assert_eq!(stored.price, 14_500);
    assert_eq!(stored.description.as_deref(), Some("price reduced"));

    service.delete("2").await.unwrap();
    assert!(service.get("2").await.unwrap().is_none());

    // Deleting again is not an error.
    service.delete("2").await.unwrap();
}

#[tokio::test]
async fn test_delete_by_term_removes_a_users_listings() {
    let service = seeded_service().await;

    // Odd ids belong to user 2.
    let deleted = service.delete_by_term("user_id", 2).await.unwrap();
    assert_eq!(deleted, 3);

    let page = service
        .search(&CarFilter::default(), Pagination::default())
        .await
        .unwrap();
    assert_eq!(ids(&page), vec![4, 2]);
}

#[tokio::test]
async fn test_bulk_delete_and_delete_index() {
    let service = seeded_service().await;

    let summary = service
        .bulk_delete(&["1".to_string(), "99".to_string()])
        .await
        .unwrap();
    assert_eq!(summary.succeeded, 2);

    service.delete_index().await.unwrap();
    assert!(matches!(
        service.delete_index().await,
        Err(SearchIndexError::IndexNotFound(_))
    ));
}
