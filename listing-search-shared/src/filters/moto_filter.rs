use chrono::{DateTime, Utc};
use listing_search_dsl::{PredicateSet, Predicates, SortDirective, SortOrder};
use serde::{Deserialize, Serialize};

use crate::filters::newest_first;

/// Filter for the `motos` index.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MotoFilter {
    pub brand_id: Vec<i64>,
    pub model_id: Vec<i64>,
    pub body_id: Vec<i64>,
    pub stock_id: Vec<i64>,
    pub min_year: Option<i32>,
    pub max_year: Option<i32>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    pub city_id: Vec<i64>,
    pub engine_type: Vec<String>,
    pub type_motorcycles: Vec<String>,
    pub min_mileage: Option<i64>,
    pub max_mileage: Option<i64>,
    pub min_volume: Option<i64>,
    pub max_volume: Option<i64>,
    pub color: Vec<String>,
    pub is_exchange: Option<bool>,
    pub is_credit: Option<bool>,
    pub is_company: Option<bool>,
    pub is_private: Option<bool>,
    pub status: Vec<String>,
    pub number_of_clock_cycles: Vec<i32>,
    pub air_type: Vec<String>,
    pub options: Vec<i64>,
    pub created_from: Option<DateTime<Utc>>,
    pub created_to: Option<DateTime<Utc>>,
    pub price_order: Option<SortOrder>,
    pub year_order: Option<SortOrder>,
}

impl PredicateSet for MotoFilter {
    fn predicates(&self) -> Predicates {
        Predicates::new()
            .terms("brand_id", &self.brand_id)
            .terms("model_id", &self.model_id)
            .terms("body_id", &self.body_id)
            .terms("stock_id", &self.stock_id)
            .range("year", self.min_year, self.max_year)
            .range("price", self.min_price, self.max_price)
            .terms("city_id", &self.city_id)
            .terms("engine_type", &self.engine_type)
            .terms("type_motorcycles", &self.type_motorcycles)
            .range("mileage", self.min_mileage, self.max_mileage)
            .range("volume", self.min_volume, self.max_volume)
            .terms("color", &self.color)
            .flag("is_exchange", self.is_exchange)
            .flag("is_credit", self.is_credit)
            .ownership("stock_id", self.is_company, self.is_private)
            .terms("status", &self.status)
            .terms("number_of_clock_cycles", &self.number_of_clock_cycles)
            .terms("air_type", &self.air_type)
            .terms("options", &self.options)
            .time_range("created_at", self.created_from, self.created_to)
            .sort("price", self.price_order)
            .sort("year", self.year_order)
    }

    fn default_sort(&self) -> Vec<SortDirective> {
        newest_first()
    }
}
