use chrono::{DateTime, Utc};
use listing_search_dsl::{FieldDescriptor, FieldKind, IndexSchema};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::document::{localized_text, SearchDocument};

/// Geographic position of a stock, kept as the strings the catalogue sends.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Location {
    pub latitude: String,
    pub longitude: String,
}

impl IndexSchema for Location {
    fn fields() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::keyword("latitude"),
            FieldDescriptor::keyword("longitude"),
        ]
    }
}

/// A dealer stock (store) as stored in the `stocks` index.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Stock {
    pub id: i64,
    pub user_id: i64,
    pub user_name: Option<String>,
    pub phone_number: String,
    pub email: Option<String>,
    pub store_name: String,
    pub images: Value,
    pub logo: Value,
    pub address: Option<String>,
    pub region_id: i64,
    pub city_id: i64,
    pub city_name_tm: Option<String>,
    pub city_name_en: Option<String>,
    pub city_name_ru: Option<String>,
    pub region_name_tm: Option<String>,
    pub region_name_en: Option<String>,
    pub region_name_ru: Option<String>,
    pub status: String,
    pub location: Location,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl IndexSchema for Stock {
    fn fields() -> Vec<FieldDescriptor> {
        let mut fields = vec![
            FieldDescriptor::integer("id"),
            FieldDescriptor::integer("user_id"),
            FieldDescriptor::keyword("user_name"),
            FieldDescriptor::keyword("phone_number"),
            FieldDescriptor::keyword("email"),
            FieldDescriptor::text("store_name"),
            FieldDescriptor::dynamic("images").annotate("enabled=true"),
            FieldDescriptor::dynamic("logo").annotate("enabled=true"),
            FieldDescriptor::text("address"),
            FieldDescriptor::integer("region_id"),
            FieldDescriptor::integer("city_id"),
        ];
        fields.extend(localized_text("city_name"));
        fields.extend(localized_text("region_name"));
        fields.extend([
            FieldDescriptor::keyword("status"),
            FieldDescriptor::new("location", FieldKind::record(Location::fields())),
            FieldDescriptor::text("description"),
            FieldDescriptor::timestamp("created_at"),
            FieldDescriptor::timestamp("updated_at"),
        ]);
        fields
    }
}

impl SearchDocument for Stock {
    fn index_alias() -> &'static str {
        "stocks"
    }

    fn document_id(&self) -> String {
        self.id.to_string()
    }
}
