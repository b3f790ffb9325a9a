use chrono::{DateTime, Utc};
use listing_search_dsl::{PredicateSet, Predicates};
use serde::{Deserialize, Serialize};

/// Filter for the `stocks` index.
///
/// Name fields are matched as analyzed text. Results keep the engine's
/// relevance order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StockFilter {
    pub user_id: Vec<i64>,
    pub city_id: Vec<i64>,
    pub region_id: Vec<i64>,
    pub status: Vec<String>,
    pub store_name: Option<String>,
    pub city_name: Option<String>,
    pub region_name: Option<String>,
    pub created_from: Option<DateTime<Utc>>,
    pub created_to: Option<DateTime<Utc>>,
}

impl PredicateSet for StockFilter {
    fn predicates(&self) -> Predicates {
        Predicates::new()
            .terms("user_id", &self.user_id)
            .terms("city_id", &self.city_id)
            .terms("region_id", &self.region_id)
            .terms("status", &self.status)
            .full_text("store_name", self.store_name.as_deref())
            .full_text("city_name_tm", self.city_name.as_deref())
            .full_text("region_name_tm", self.region_name.as_deref())
            .time_range("created_at", self.created_from, self.created_to)
    }
}
