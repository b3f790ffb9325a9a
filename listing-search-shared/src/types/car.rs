//! Car listing document.

use chrono::{DateTime, Utc};
use listing_search_dsl::{FieldDescriptor, IndexSchema};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::document::{localized_keywords, SearchDocument};

/// A car listing as stored in the `cars` index.
///
/// `stock_id` links the listing to a dealer stock; private listings leave it
/// empty or zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Car {
    pub id: i64,
    pub user_id: i64,
    pub user_name: Option<String>,
    pub stock_id: Option<i64>,
    pub store_name: Option<String>,
    pub brand_id: i64,
    pub brand_name: Option<String>,
    pub model_id: i64,
    pub model_name: Option<String>,
    pub year: i64,
    pub price: i64,
    pub color: String,
    pub vin: Option<String>,
    pub description: Option<String>,
    pub city_id: i64,
    pub city_name_tm: Option<String>,
    pub city_name_en: Option<String>,
    pub city_name_ru: Option<String>,
    pub name: Option<String>,
    pub mail: Option<String>,
    pub phone_number: String,
    pub is_comment: bool,
    pub is_exchange: bool,
    pub is_credit: bool,
    pub images: Value,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub mileage: i64,
    pub engine_capacity: f64,
    pub engine_type: String,
    pub body_id: i64,
    pub body_name_tm: Option<String>,
    pub body_name_en: Option<String>,
    pub body_name_ru: Option<String>,
    pub transmission: String,
    pub drive_type: String,
}

impl IndexSchema for Car {
    fn fields() -> Vec<FieldDescriptor> {
        let mut fields = vec![
            FieldDescriptor::integer("id"),
            FieldDescriptor::integer("user_id"),
            FieldDescriptor::keyword("user_name"),
            FieldDescriptor::integer("stock_id"),
            FieldDescriptor::keyword("store_name"),
            FieldDescriptor::integer("brand_id"),
            FieldDescriptor::text("brand_name"),
            FieldDescriptor::integer("model_id"),
            FieldDescriptor::text("model_name"),
            FieldDescriptor::integer("year"),
            FieldDescriptor::integer("price"),
            FieldDescriptor::keyword("color"),
            FieldDescriptor::keyword("vin"),
            FieldDescriptor::text("description"),
            FieldDescriptor::integer("city_id"),
        ];
        fields.extend(localized_keywords("city_name"));
        fields.extend([
            FieldDescriptor::keyword("name"),
            FieldDescriptor::keyword("mail"),
            FieldDescriptor::keyword("phone_number"),
            FieldDescriptor::boolean("is_comment"),
            FieldDescriptor::boolean("is_exchange"),
            FieldDescriptor::boolean("is_credit"),
            FieldDescriptor::dynamic("images").annotate("enabled=true"),
            FieldDescriptor::keyword("status"),
            FieldDescriptor::timestamp("created_at"),
            FieldDescriptor::timestamp("updated_at"),
            FieldDescriptor::integer("mileage"),
            FieldDescriptor::float("engine_capacity"),
            FieldDescriptor::keyword("engine_type"),
            FieldDescriptor::integer("body_id"),
        ]);
        fields.extend(localized_keywords("body_name"));
        fields.extend([
            FieldDescriptor::keyword("transmission"),
            FieldDescriptor::keyword("drive_type"),
        ]);
        fields
    }
}

impl SearchDocument for Car {
    fn index_alias() -> &'static str {
        "cars"
    }

    fn document_id(&self) -> String {
        self.id.to_string()
    }
}
