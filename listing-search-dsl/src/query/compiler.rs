//! Predicate set compilation.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use serde_json::{json, Value};

use crate::errors::QueryError;
use crate::query::clause::{Clause, SortDirective};
use crate::query::predicate::{check_range_order, ownership_side, Predicate, PredicateSet};

/// A boolean query ready to hand to the search call.
///
/// Serializes to `{"query": {"bool": {"must": [...]}}, "sort": [...]}`. The
/// `sort` key is left out when there are no sort directives. An empty `must`
/// list matches every document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompiledQuery {
    must: Vec<Clause>,
    sort: Vec<SortDirective>,
}

impl CompiledQuery {
    /// A query matching every document, unsorted.
    pub fn match_all() -> Self {
        Self::default()
    }

    pub fn must(&self) -> &[Clause] {
        &self.must
    }

    pub fn sort(&self) -> &[SortDirective] {
        &self.sort
    }

    /// Whether the query places no constraint on matched documents.
    pub fn matches_all(&self) -> bool {
        self.must.is_empty()
    }

    /// The `query` part only: `{"bool": {"must": [...]}}`.
    pub fn query_json(&self) -> Value {
        let must: Vec<Value> = self.must.iter().map(Clause::to_json).collect();
        json!({ "bool": { "must": must } })
    }

    /// The `sort` list, possibly empty.
    pub fn sort_json(&self) -> Vec<Value> {
        self.sort.iter().map(SortDirective::to_json).collect()
    }

    /// The full search body.
    pub fn to_json(&self) -> Value {
        let mut body = json!({ "query": self.query_json() });
        if !self.sort.is_empty() {
            body["sort"] = Value::Array(self.sort_json());
        }
        body
    }
}

impl Serialize for CompiledQuery {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

/// Compile a predicate set into a boolean query.
///
/// Predicates are visited in declaration order. Unset predicates are skipped
/// ([`Predicate::is_set`]) and each remaining one yields
/// one clause at the matching position of `must`. Sort predicates yield sort
/// directives in the same order; when none is set the set's
/// [`PredicateSet::default_sort`] is used.
///
/// # Returns
///
/// * `Ok(CompiledQuery)` - The complete query
/// * `Err(QueryError::InvalidPredicate)` - On a non-finite number or an inverted range
///
/// # Example
///
/// ```
/// use listing_search_dsl::{compile, Predicates};
/// use serde_json::json;
///
/// let query = compile(&Predicates::new().range("year", Some(2015), Some(2020))).unwrap();
///
/// assert_eq!(
///     query.to_json(),
///     json!({"query": {"bool": {"must": [
///         {"range": {"year": {"gte": 2015, "lte": 2020}}}
///     ]}}})
/// );
/// ```
pub fn compile<P: PredicateSet + ?Sized>(set: &P) -> Result<CompiledQuery, QueryError> {
    let mut must = Vec::new();
    let mut sort = Vec::new();

    for predicate in set.predicates().into_iter().filter(Predicate::is_set) {
        match predicate {
            Predicate::Sort {
                field,
                order: Some(order),
            } => sort.push(SortDirective::new(field, order)),
            Predicate::Sort { .. } => {}
            other => {
                if let Some(clause) = compile_predicate(other)? {
                    must.push(clause);
                }
            }
        }
    }

    if sort.is_empty() {
        sort = set.default_sort();
    }

    Ok(CompiledQuery { must, sort })
}

fn compile_predicate(predicate: Predicate) -> Result<Option<Clause>, QueryError> {
    let clause = match predicate {
        Predicate::Exact {
            field,
            value: Some(value),
        } => Clause::Term {
            field: field.to_string(),
            value: value.to_json(field)?,
        },
        Predicate::Match {
            field,
            text: Some(text),
        } if !text.trim().is_empty() => Clause::Match {
            field: field.to_string(),
            query: text,
        },
        Predicate::MultiMatch {
            fields,
            text: Some(text),
        } if !text.trim().is_empty() && !fields.is_empty() => Clause::MultiMatch {
            fields: fields.iter().map(|f| f.to_string()).collect(),
            query: text,
        },
        Predicate::Inclusion { field, values } if !values.is_empty() => Clause::Terms {
            field: field.to_string(),
            values: values
                .iter()
                .map(|v| v.to_json(field))
                .collect::<Result<_, _>>()?,
        },
        Predicate::Range { field, min, max } if min.is_some() || max.is_some() => {
            check_range_order(field, min.as_ref(), max.as_ref())?;
            Clause::Range {
                field: field.to_string(),
                gt: None,
                gte: min.as_ref().map(|v| v.to_json(field)).transpose()?,
                lte: max.as_ref().map(|v| v.to_json(field)).transpose()?,
            }
        }
        Predicate::Flag {
            field,
            value: Some(value),
        } => Clause::Term {
            field: field.to_string(),
            value: Value::Bool(value),
        },
        Predicate::TimeRange { field, min, max } if min.is_some() || max.is_some() => {
            if let (Some(lo), Some(hi)) = (min, max) {
                if lo > hi {
                    return Err(QueryError::invalid_predicate(
                        field,
                        format!("start {} is after end {}", format_time(&lo), format_time(&hi)),
                    ));
                }
            }
            Clause::Range {
                field: field.to_string(),
                gt: None,
                gte: min.as_ref().map(|t| Value::String(format_time(t))),
                lte: max.as_ref().map(|t| Value::String(format_time(t))),
            }
        }
        Predicate::Ownership {
            field,
            company,
            private,
        } => match ownership_side(company, private) {
            Some(true) => linked_id_present(field),
            Some(false) => Clause::MustNot(vec![linked_id_present(field)]),
            None => return Ok(None),
        },
        _ => return Ok(None),
    };

    Ok(Some(clause))
}

fn linked_id_present(field: &str) -> Clause {
    Clause::Range {
        field: field.to_string(),
        gt: Some(Value::from(0)),
        gte: None,
        lte: None,
    }
}

/// RFC 3339, UTC, whole seconds: `2024-01-02T03:04:05Z`.
fn format_time(time: &DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::clause::SortOrder;
    use crate::query::predicate::Predicates;
    use chrono::TimeZone;

    #[test]
    fn test_empty_set_matches_all() {
        let query = compile(&Predicates::new()).unwrap();
        assert!(query.matches_all());
        assert_eq!(query.to_json(), json!({"query": {"bool": {"must": []}}}));
    }

    #[test]
    fn test_unset_predicates_contribute_nothing() {
        let predicates = Predicates::new()
            .exact::<i64>("user_id", None)
            .full_text("store_name", None)
            .terms::<String>("color", &[])
            .range::<i64>("price", None, None)
            .flag("is_exchange", None)
            .time_range("created_at", None, None)
            .ownership("stock_id", None, None)
            .sort("price", None);

        let query = compile(&predicates).unwrap();
        assert_eq!(query, CompiledQuery::match_all());
    }

    #[test]
    fn test_year_range() {
        let query = compile(&Predicates::new().range("year", Some(2015), Some(2020))).unwrap();
        assert_eq!(
            query.must()[0].to_json(),
            json!({"range": {"year": {"gte": 2015, "lte": 2020}}})
        );
    }

    #[test]
    fn test_single_bound_range() {
        let query = compile(&Predicates::new().range("price", None, Some(5000))).unwrap();
        let clause = query.must()[0].to_json();
        let bounds = clause["range"]["price"].as_object().unwrap();
        assert_eq!(bounds.len(), 1);
        assert_eq!(bounds["lte"], json!(5000));
    }

    #[test]
    fn test_color_inclusion() {
        let query = compile(&Predicates::new().terms("color", &["blue", "red"])).unwrap();
        assert_eq!(
            query.must()[0].to_json(),
            json!({"terms": {"color": ["blue", "red"]}})
        );
    }

    #[test]
    fn test_company_ownership() {
        let query =
            compile(&Predicates::new().ownership("stock_id", Some(true), Some(false))).unwrap();
        assert_eq!(
            query.must()[0].to_json(),
            json!({"range": {"stock_id": {"gt": 0}}})
        );
    }

    #[test]
    fn test_private_ownership() {
        let query = compile(&Predicates::new().ownership("stock_id", None, Some(true))).unwrap();
        assert_eq!(
            query.must()[0].to_json(),
            json!({"bool": {"must_not": [{"range": {"stock_id": {"gt": 0}}}]}})
        );
    }

    #[test]
    fn test_both_ownership_flags_is_noop() {
        let query =
            compile(&Predicates::new().ownership("stock_id", Some(true), Some(true))).unwrap();
        assert!(query.matches_all());
    }

    #[test]
    fn test_time_range_format() {
        let start = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let query = compile(&Predicates::new().time_range("created_at", Some(start), None)).unwrap();
        assert_eq!(
            query.must()[0].to_json(),
            json!({"range": {"created_at": {"gte": "2024-01-02T03:04:05Z"}}})
        );
    }

    #[test]
    fn test_inverted_time_range_is_rejected() {
        let start = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let result = compile(&Predicates::new().time_range("created_at", Some(start), Some(end)));
        assert!(matches!(result, Err(QueryError::InvalidPredicate { .. })));
    }

    #[test]
    fn test_non_finite_bound_is_rejected() {
        let result = compile(&Predicates::new().range("engine_capacity", Some(f64::NAN), None));
        assert_eq!(
            result.unwrap_err(),
            QueryError::invalid_predicate("engine_capacity", "non-finite number NaN")
        );
    }

    #[test]
    fn test_non_finite_inclusion_value_is_rejected() {
        let result = compile(&Predicates::new().terms("load_capacity", &[1.0, f64::INFINITY]));
        assert!(result.is_err());
    }

    #[test]
    fn test_inverted_range_is_rejected() {
        let result = compile(&Predicates::new().range("year", Some(2020), Some(2015)));
        assert!(matches!(result, Err(QueryError::InvalidPredicate { .. })));
    }

    #[test]
    fn test_inverted_range_of_large_ids_is_rejected() {
        let result = compile(&Predicates::new().range(
            "id",
            Some(9_007_199_254_740_993i64),
            Some(9_007_199_254_740_992i64),
        ));
        assert!(matches!(result, Err(QueryError::InvalidPredicate { .. })));

        let query = compile(&Predicates::new().range(
            "id",
            Some(9_007_199_254_740_992i64),
            Some(9_007_199_254_740_993i64),
        ))
        .unwrap();
        assert_eq!(
            query.must()[0].to_json(),
            json!({"range": {"id": {"gte": 9_007_199_254_740_992i64, "lte": 9_007_199_254_740_993i64}}})
        );
    }

    #[test]
    fn test_clause_order_follows_declaration() {
        let query = compile(
            &Predicates::new()
                .flag("is_credit", Some(true))
                .terms("brand_id", &[1i64])
                .exact("vin", Some("ABC")),
        )
        .unwrap();

        let keys: Vec<String> = query
            .must()
            .iter()
            .map(|c| c.to_json().as_object().unwrap().keys().next().unwrap().clone())
            .collect();
        assert_eq!(keys, vec!["term", "terms", "term"]);
        assert_eq!(query.must()[2].to_json(), json!({"term": {"vin": "ABC"}}));
    }

    #[test]
    fn test_blank_text_is_skipped() {
        let query = compile(
            &Predicates::new()
                .full_text("store_name", Some("  "))
                .multi_match(&["brand_name", "model_name"], Some("")),
        )
        .unwrap();
        assert!(query.matches_all());
    }

    #[test]
    fn test_multi_match() {
        let query = compile(
            &Predicates::new().multi_match(&["brand_name", "model_name"], Some("land cruiser")),
        )
        .unwrap();
        assert_eq!(
            query.must()[0].to_json(),
            json!({"multi_match": {"query": "land cruiser", "fields": ["brand_name", "model_name"]}})
        );
    }

    #[test]
    fn test_sort_directives_in_order() {
        let query = compile(
            &Predicates::new()
                .sort("price", Some(SortOrder::Ascending))
                .sort("year", Some(SortOrder::Descending)),
        )
        .unwrap();

        assert_eq!(
            query.to_json()["sort"],
            json!([{"price": {"order": "asc"}}, {"year": {"order": "desc"}}])
        );
    }

    struct Newest(Predicates);

    impl PredicateSet for Newest {
        fn predicates(&self) -> Predicates {
            self.0.clone()
        }

        fn default_sort(&self) -> Vec<SortDirective> {
            vec![SortDirective::descending("created_at")]
        }
    }

    #[test]
    fn test_default_sort_applies_only_without_explicit_sort() {
        let query = compile(&Newest(Predicates::new())).unwrap();
        assert_eq!(query.sort(), &[SortDirective::descending("created_at")]);

        let query = compile(&Newest(
            Predicates::new().sort("price", Some(SortOrder::Ascending)),
        ))
        .unwrap();
        assert_eq!(query.sort(), &[SortDirective::ascending("price")]);
    }

    #[test]
    fn test_compile_is_deterministic() {
        let predicates = Predicates::new()
            .terms("color", &["blue"])
            .range("price", Some(1), Some(2))
            .sort("year", Some(SortOrder::Ascending));

        let first = serde_json::to_string(&compile(&predicates).unwrap()).unwrap();
        let second = serde_json::to_string(&compile(&predicates).unwrap()).unwrap();
        assert_eq!(first, second);
    }
}
