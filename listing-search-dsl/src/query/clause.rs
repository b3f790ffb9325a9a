//! Compiled query clauses and sort directives.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::errors::QueryError;

/// One atomic condition inside the conjunctive `must` list.
#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    /// Exact match on a single value.
    Term { field: String, value: Value },
    /// Match any of several values.
    Terms { field: String, values: Vec<Value> },
    /// Analyzed full-text match on one field.
    Match { field: String, query: String },
    /// Analyzed full-text match across several fields.
    MultiMatch { fields: Vec<String>, query: String },
    /// Bounded range; unset bounds are omitted.
    Range {
        field: String,
        gt: Option<Value>,
        gte: Option<Value>,
        lte: Option<Value>,
    },
    /// Matches documents matching none of the inner clauses.
    MustNot(Vec<Clause>),
}

impl Clause {
    /// Render the clause as query DSL.
    pub fn to_json(&self) -> Value {
        match self {
            Clause::Term { field, value } => json!({ "term": { field.as_str(): value } }),
            Clause::Terms { field, values } => json!({ "terms": { field.as_str(): values } }),
            Clause::Match { field, query } => json!({ "match": { field.as_str(): query } }),
            Clause::MultiMatch { fields, query } => json!({
                "multi_match": {
                    "query": query,
                    "fields": fields
                }
            }),
            Clause::Range {
                field,
                gt,
                gte,
                lte,
            } => {
                let mut bounds = Map::new();
                if let Some(gt) = gt {
                    bounds.insert("gt".to_string(), gt.clone());
                }
                if let Some(gte) = gte {
                    bounds.insert("gte".to_string(), gte.clone());
                }
                if let Some(lte) = lte {
                    bounds.insert("lte".to_string(), lte.clone());
                }
                json!({ "range": { field.as_str(): bounds } })
            }
            Clause::MustNot(clauses) => {
                let inner: Vec<Value> = clauses.iter().map(Clause::to_json).collect();
                json!({ "bool": { "must_not": inner } })
            }
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortOrder {
    #[serde(rename = "asc", alias = "ascending")]
    Ascending,
    #[serde(rename = "desc", alias = "descending")]
    Descending,
}

impl SortOrder {
    /// The DSL spelling of this direction.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "asc",
            SortOrder::Descending => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = QueryError;

    /// Accepts `asc`/`ascending` and `desc`/`descending`, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortOrder::Ascending),
            "desc" | "descending" => Ok(SortOrder::Descending),
            other => Err(QueryError::invalid_predicate(
                "sort",
                format!("unknown sort direction '{}'", other),
            )),
        }
    }
}

/// Sort on one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortDirective {
    pub field: String,
    pub order: SortOrder,
}

impl SortDirective {
    pub fn new(field: impl Into<String>, order: SortOrder) -> Self {
        Self {
            field: field.into(),
            order,
        }
    }

    pub fn ascending(field: impl Into<String>) -> Self {
        Self::new(field, SortOrder::Ascending)
    }

    pub fn descending(field: impl Into<String>) -> Self {
        Self::new(field, SortOrder::Descending)
    }

    pub fn to_json(&self) -> Value {
        json!({ self.field.as_str(): { "order": self.order.as_str() } })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_term_and_terms_json() {
        let term = Clause::Term {
            field: "is_credit".to_string(),
            value: json!(true),
        };
        assert_eq!(term.to_json(), json!({"term": {"is_credit": true}}));

        let terms = Clause::Terms {
            field: "color".to_string(),
            values: vec![json!("blue"), json!("red")],
        };
        assert_eq!(terms.to_json(), json!({"terms": {"color": ["blue", "red"]}}));
    }

    #[test]
    fn test_range_omits_missing_bounds() {
        let range = Clause::Range {
            field: "price".to_string(),
            gt: None,
            gte: Some(json!(1000)),
            lte: None,
        };
        assert_eq!(range.to_json(), json!({"range": {"price": {"gte": 1000}}}));
    }

    #[test]
    fn test_must_not_json() {
        let clause = Clause::MustNot(vec![Clause::Range {
            field: "stock_id".to_string(),
            gt: Some(json!(0)),
            gte: None,
            lte: None,
        }]);
        assert_eq!(
            clause.to_json(),
            json!({"bool": {"must_not": [{"range": {"stock_id": {"gt": 0}}}]}})
        );
    }

    #[test]
    fn test_sort_order_from_str() {
        assert_eq!("asc".parse::<SortOrder>().unwrap(), SortOrder::Ascending);
        assert_eq!("DESC".parse::<SortOrder>().unwrap(), SortOrder::Descending);
        assert_eq!(
            " descending ".parse::<SortOrder>().unwrap(),
            SortOrder::Descending
        );
        assert!(matches!(
            "sideways".parse::<SortOrder>(),
            Err(QueryError::InvalidPredicate { .. })
        ));
    }

    #[test]
    fn test_sort_order_serde() {
        assert_eq!(serde_json::to_value(SortOrder::Ascending).unwrap(), json!("asc"));
        let order: SortOrder = serde_json::from_value(json!("descending")).unwrap();
        assert_eq!(order, SortOrder::Descending);
    }

    #[test]
    fn test_sort_directive_json() {
        assert_eq!(
            SortDirective::descending("created_at").to_json(),
            json!({"created_at": {"order": "desc"}})
        );
    }
}
