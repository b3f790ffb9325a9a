use chrono::{DateTime, Utc};
use listing_search_dsl::{FieldDescriptor, IndexSchema};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::document::{localized_keywords, SearchDocument};

/// A commercial vehicle listing (trucks, buses, special machinery) as stored
/// in the `trucks` index.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Truck {
    pub id: i64,
    pub user_id: i64,
    pub user_name: Option<String>,
    pub stock_id: Option<i64>,
    pub store_name: Option<String>,
    pub brand_id: i64,
    pub brand_name: Option<String>,
    pub model_id: i64,
    pub model_name: Option<String>,
    pub body_id: Option<i64>,
    pub body_name_tm: Option<String>,
    pub body_name_en: Option<String>,
    pub body_name_ru: Option<String>,
    pub year: i64,
    pub price: i64,
    pub mileage: Option<i64>,
    pub color: Option<String>,
    pub vin: Option<String>,
    pub engine_type: Option<String>,
    pub engine_capacity: Option<f64>,
    pub engine_hours: Option<i64>,
    pub transmission: Option<String>,
    pub drive_type: Option<String>,
    pub body_type: Option<String>,
    pub cab_type: Option<String>,
    pub cab_suspension: Option<String>,
    pub suspension_type: Option<String>,
    pub wheel_formula: Option<String>,
    pub brakes: Option<String>,
    pub vehicle_type: Option<String>,
    pub forklift_type: Option<String>,
    pub seats: Option<i64>,
    pub axles: Option<i64>,
    pub lifting_capacity: Option<i64>,
    pub load_capacity: Option<f64>,
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
}

impl IndexSchema for Truck {
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
            FieldDescriptor::integer("body_id"),
        ];
        fields.extend(localized_keywords("body_name"));
        fields.extend([
            FieldDescriptor::integer("year"),
            FieldDescriptor::integer("price"),
            FieldDescriptor::integer("mileage"),
            FieldDescriptor::keyword("color"),
            FieldDescriptor::keyword("vin"),
            FieldDescriptor::keyword("engine_type"),
            FieldDescriptor::float("engine_capacity"),
            FieldDescriptor::integer("engine_hours"),
            FieldDescriptor::keyword("transmission"),
            FieldDescriptor::keyword("drive_type"),
            FieldDescriptor::keyword("body_type"),
            FieldDescriptor::keyword("cab_type"),
            FieldDescriptor::keyword("cab_suspension"),
            FieldDescriptor::keyword("suspension_type"),
            FieldDescriptor::keyword("wheel_formula"),
            FieldDescriptor::keyword("brakes"),
            FieldDescriptor::keyword("vehicle_type"),
            FieldDescriptor::keyword("forklift_type"),
            FieldDescriptor::integer("seats"),
            FieldDescriptor::integer("axles"),
            FieldDescriptor::integer("lifting_capacity"),
            FieldDescriptor::float("load_capacity"),
            FieldDescriptor::text("description"),
            FieldDescriptor::integer("city_id"),
        ]);
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
        ]);
        fields
    }
}

impl SearchDocument for Truck {
    fn index_alias() -> &'static str {
        "trucks"
    }

    fn document_id(&self) -> String {
        self.id.to_string()
    }
}
