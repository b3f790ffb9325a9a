use chrono::{DateTime, Utc};
use listing_search_dsl::{PredicateSet, Predicates, SortDirective, SortOrder};
use serde::{Deserialize, Serialize};

use crate::filters::newest_first;

/// Filter for the `trucks` index.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TruckFilter {
    pub brand_id: Vec<i64>,
    pub model_id: Vec<i64>,
    pub body_id: Vec<i64>,
    pub engine_type: Vec<String>,
    pub transmission: Vec<String>,
    pub drive_type: Vec<String>,
    pub city_id: Vec<i64>,
    pub color: Vec<String>,
    pub body_type: Vec<String>,
    pub cab_type: Vec<String>,
    pub wheel_formula: Vec<String>,
    pub brakes: Vec<String>,
    pub vehicle_type: Vec<String>,
    pub forklift_type: Vec<String>,
    pub cab_suspension: Vec<String>,
    pub suspension_type: Vec<String>,
    pub status: Vec<String>,
    pub vin: Option<String>,
    pub is_exchange: Option<bool>,
    pub is_credit: Option<bool>,
    pub is_company: Option<bool>,
    pub is_private: Option<bool>,
    pub min_year: Option<i64>,
    pub max_year: Option<i64>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    pub min_mileage: Option<i64>,
    pub max_mileage: Option<i64>,
    pub min_seats: Option<i64>,
    pub max_seats: Option<i64>,
    pub min_axles: Option<i64>,
    pub max_axles: Option<i64>,
    pub min_engine_hours: Option<i64>,
    pub max_engine_hours: Option<i64>,
    pub min_lifting_capacity: Option<i64>,
    pub max_lifting_capacity: Option<i64>,
    pub min_load_capacity: Option<f64>,
    pub max_load_capacity: Option<f64>,
    pub min_engine_capacity: Option<f64>,
    pub max_engine_capacity: Option<f64>,
    pub created_from: Option<DateTime<Utc>>,
    pub created_to: Option<DateTime<Utc>>,
    pub price_order: Option<SortOrder>,
    pub year_order: Option<SortOrder>,
}

impl PredicateSet for TruckFilter {
    fn predicates(&self) -> Predicates {
        Predicates::new()
            .terms("brand_id", &self.brand_id)
            .terms("model_id", &self.model_id)
            .terms("body_id", &self.body_id)
            .terms("engine_type", &self.engine_type)
            .terms("transmission", &self.transmission)
            .terms("drive_type", &self.drive_type)
            .terms("city_id", &self.city_id)
            .terms("color", &self.color)
            .terms("body_type", &self.body_type)
            .terms("cab_type", &self.cab_type)
            .terms("wheel_formula", &self.wheel_formula)
            .terms("brakes", &self.brakes)
            .terms("vehicle_type", &self.vehicle_type)
            .terms("forklift_type", &self.forklift_type)
            .terms("cab_suspension", &self.cab_suspension)
            .terms("suspension_type", &self.suspension_type)
            .terms("status", &self.status)
            .exact("vin", self.vin.as_deref())
            .flag("is_exchange", self.is_exchange)
            .flag("is_credit", self.is_credit)
            .ownership("stock_id", self.is_company, self.is_private)
            .range("year", self.min_year, self.max_year)
            .range("price", self.min_price, self.max_price)
            .range("mileage", self.min_mileage, self.max_mileage)
            .range("seats", self.min_seats, self.max_seats)
            .range("axles", self.min_axles, self.max_axles)
            .range("engine_hours", self.min_engine_hours, self.max_engine_hours)
            .range(
                "lifting_capacity",
                self.min_lifting_capacity,
                self.max_lifting_capacity,
            )
            .range(
                "load_capacity",
                self.min_load_capacity,
                self.max_load_capacity,
            )
            .range(
                "engine_capacity",
                self.min_engine_capacity,
                self.max_engine_capacity,
            )
            .time_range("created_at", self.created_from, self.created_to)
            .sort("price", self.price_order)
            .sort("year", self.year_order)
    }

    fn default_sort(&self) -> Vec<SortDirective> {
        newest_first()
    }
}
