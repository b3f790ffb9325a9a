use chrono::{DateTime, Utc};
use listing_search_dsl::{PredicateSet, Predicates, SortDirective, SortOrder};
use serde::{Deserialize, Serialize};

use crate::filters::newest_first;

/// Filter for the `cars` index.
///
/// List fields match any of their values, `min_*`/`max_*` pairs are
/// inclusive ranges and `is_company`/`is_private` select listings by whether
/// they belong to a dealer stock.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CarFilter {
    pub text: Option<String>,
    pub brand_id: Vec<i64>,
    pub model_id: Vec<i64>,
    pub stock_id: Vec<i64>,
    pub min_year: Option<i64>,
    pub max_year: Option<i64>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    pub city_id: Vec<i64>,
    pub engine_type: Vec<String>,
    pub transmission: Vec<String>,
    pub drive_type: Vec<String>,
    pub body_id: Vec<i64>,
    pub min_mileage: Option<i64>,
    pub max_mileage: Option<i64>,
    pub min_engine_capacity: Option<f64>,
    pub max_engine_capacity: Option<f64>,
    pub color: Vec<String>,
    pub is_exchange: Option<bool>,
    pub is_credit: Option<bool>,
    pub is_company: Option<bool>,
    pub is_private: Option<bool>,
    pub status: Vec<String>,
    pub created_from: Option<DateTime<Utc>>,
    pub created_to: Option<DateTime<Utc>>,
    pub price_order: Option<SortOrder>,
    pub year_order: Option<SortOrder>,
}

impl PredicateSet for CarFilter {
    fn predicates(&self) -> Predicates {
        Predicates::new()
            .multi_match(
                &["brand_name", "model_name", "description"],
                self.text.as_deref(),
            )
            .terms("brand_id", &self.brand_id)
            .terms("model_id", &self.model_id)
            .terms("stock_id", &self.stock_id)
            .range("year", self.min_year, self.max_year)
            .range("price", self.min_price, self.max_price)
            .terms("city_id", &self.city_id)
            .terms("engine_type", &self.engine_type)
            .terms("transmission", &self.transmission)
            .terms("drive_type", &self.drive_type)
            .terms("body_id", &self.body_id)
            .range("mileage", self.min_mileage, self.max_mileage)
            .range(
                "engine_capacity",
                self.min_engine_capacity,
                self.max_engine_capacity,
            )
            .terms("color", &self.color)
            .flag("is_exchange", self.is_exchange)
            .flag("is_credit", self.is_credit)
            .ownership("stock_id", self.is_company, self.is_private)
            .terms("status", &self.status)
            .time_range("created_at", self.created_from, self.created_to)
            .sort("price", self.price_order)
            .sort("year", self.year_order)
    }

    fn default_sort(&self) -> Vec<SortDirective> {
        newest_first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use listing_search_dsl::compile;
    use serde_json::json;

    #[test]
    fn test_default_filter_matches_all_newest_first() {
        let query = compile(&CarFilter::default()).unwrap();
        assert!(query.matches_all());
        assert_eq!(
            query.to_json(),
            json!({
                "query": {"bool": {"must": []}},
                "sort": [{"created_at": {"order": "desc"}}]
            })
        );
    }

    #[test]
    fn test_year_range_and_colors() {
        let filter = CarFilter {
            min_year: Some(2015),
            max_year: Some(2020),
            color: vec!["blue".to_string(), "red".to_string()],
            ..Default::default()
        };

        let query = compile(&filter).unwrap();
        assert_eq!(
            query.query_json(),
            json!({"bool": {"must": [
                {"range": {"year": {"gte": 2015, "lte": 2020}}},
                {"terms": {"color": ["blue", "red"]}}
            ]}})
        );
    }

    #[test]
    fn test_company_only() {
        let filter = CarFilter {
            is_company: Some(true),
            ..Default::default()
        };

        let query = compile(&filter).unwrap();
        assert_eq!(
            query.query_json(),
            json!({"bool": {"must": [{"range": {"stock_id": {"gt": 0}}}]}})
        );
    }

    #[test]
    fn test_text_search_spans_names_and_description() {
        let filter = CarFilter {
            text: Some("land cruiser".to_string()),
            ..Default::default()
        };

        let query = compile(&filter).unwrap();
        assert_eq!(
            query.query_json(),
            json!({"bool": {"must": [{"multi_match": {
                "query": "land cruiser",
                "fields": ["brand_name", "model_name", "description"]
            }}]}})
        );
    }

    #[test]
    fn test_price_sort_replaces_default() {
        let filter = CarFilter {
            price_order: Some(SortOrder::Ascending),
            year_order: Some(SortOrder::Descending),
            ..Default::default()
        };

        let query = compile(&filter).unwrap();
        assert_eq!(
            query.sort_json(),
            vec![
                json!({"price": {"order": "asc"}}),
                json!({"year": {"order": "desc"}})
            ]
        );
    }

    #[test]
    fn test_inverted_engine_capacity_is_rejected() {
        let filter = CarFilter {
            min_engine_capacity: Some(3.0),
            max_engine_capacity: Some(1.6),
            ..Default::default()
        };
        assert!(compile(&filter).is_err());
    }

    #[test]
    fn test_deserialize_from_request_body() {
        let filter: CarFilter = serde_json::from_value(json!({
            "brand_id": [1, 2],
            "is_credit": true,
            "price_order": "asc"
        }))
        .unwrap();

        assert_eq!(filter.brand_id, vec![1, 2]);
        assert_eq!(filter.is_credit, Some(true));
        assert_eq!(filter.price_order, Some(SortOrder::Ascending));
        assert!(filter.color.is_empty());
    }
}
