//! Predicate declarations.
//!
//! A filter type implements [`PredicateSet`] by listing its optional fields
//! through the [`Predicates`] builder. The compiler walks that list in order
//! and never needs per-entity code.

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, Utc};
use serde_json::{Number, Value};

use crate::errors::QueryError;
use crate::query::clause::{SortDirective, SortOrder};

/// A single comparable value used in exact, inclusion and range predicates.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),
}

impl Scalar {
    /// Convert to JSON, rejecting values the engine cannot represent.
    pub(crate) fn to_json(&self, field: &str) -> Result<Value, QueryError> {
        match self {
            Scalar::Int(v) => Ok(Value::from(*v)),
            Scalar::Float(v) => Number::from_f64(*v).map(Value::Number).ok_or_else(|| {
                QueryError::invalid_predicate(field, format!("non-finite number {}", v))
            }),
            Scalar::Str(v) => Ok(Value::String(v.clone())),
            Scalar::Bool(v) => Ok(Value::Bool(*v)),
        }
    }

    fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Int(v) => Some(*v as f64),
            Scalar::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Numeric ordering. Two integers compare exactly; any float makes it a
    /// floating-point comparison.
    fn numeric_cmp(&self, other: &Scalar) -> Option<Ordering> {
        match (self, other) {
            (Scalar::Int(a), Scalar::Int(b)) => Some(a.cmp(b)),
            _ => self.as_f64()?.partial_cmp(&other.as_f64()?),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Int(v) => write!(f, "{}", v),
            Scalar::Float(v) => write!(f, "{}", v),
            Scalar::Str(v) => f.write_str(v),
            Scalar::Bool(v) => write!(f, "{}", v),
        }
    }
}

macro_rules! scalar_from_int {
    ($($t:ty),*) => {
        $(impl From<$t> for Scalar {
            fn from(v: $t) -> Self {
                Scalar::Int(i64::from(v))
            }
        })*
    };
}

scalar_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Scalar {
    fn from(v: f32) -> Self {
        Scalar::Float(f64::from(v))
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Scalar::Float(v)
    }
}

impl From<bool> for Scalar {
    fn from(v: bool) -> Self {
        Scalar::Bool(v)
    }
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Scalar::Str(v.to_string())
    }
}

impl From<String> for Scalar {
    fn from(v: String) -> Self {
        Scalar::Str(v)
    }
}

impl From<&String> for Scalar {
    fn from(v: &String) -> Self {
        Scalar::Str(v.clone())
    }
}

/// One declared filter field and its (possibly unset) value.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Exact match on one value.
    Exact {
        field: &'static str,
        value: Option<Scalar>,
    },
    /// Full-text match on one field.
    Match {
        field: &'static str,
        text: Option<String>,
    },
    /// Full-text match across several fields.
    MultiMatch {
        fields: Vec<&'static str>,
        text: Option<String>,
    },
    /// Match any of the listed values.
    Inclusion {
        field: &'static str,
        values: Vec<Scalar>,
    },
    /// Inclusive numeric range.
    Range {
        field: &'static str,
        min: Option<Scalar>,
        max: Option<Scalar>,
    },
    /// Boolean flag.
    Flag {
        field: &'static str,
        value: Option<bool>,
    },
    /// Inclusive time range.
    TimeRange {
        field: &'static str,
        min: Option<DateTime<Utc>>,
        max: Option<DateTime<Utc>>,
    },
    /// Company vs. private ownership, derived from a linked id field.
    ///
    /// A listing is company-owned when the linked id is present and positive.
    Ownership {
        field: &'static str,
        company: Option<bool>,
        private: Option<bool>,
    },
    /// Sort directive.
    Sort {
        field: &'static str,
        order: Option<SortOrder>,
    },
}

impl Predicate {
    /// Whether this predicate would contribute a clause or sort directive.
    pub fn is_set(&self) -> bool {
        match self {
            Predicate::Exact { value, .. } => value.is_some(),
            Predicate::Match { text, .. } | Predicate::MultiMatch { text, .. } => {
                text.as_deref().is_some_and(|t| !t.trim().is_empty())
            }
            Predicate::Inclusion { values, .. } => !values.is_empty(),
            Predicate::Range { min, max, .. } => min.is_some() || max.is_some(),
            Predicate::Flag { value, .. } => value.is_some(),
            Predicate::TimeRange { min, max, .. } => min.is_some() || max.is_some(),
            Predicate::Ownership {
                company, private, ..
            } => ownership_side(*company, *private).is_some(),
            Predicate::Sort { order, .. } => order.is_some(),
        }
    }
}

/// Which side of an ownership pair is selected, if exactly one is.
///
/// Only flags set to `true` count. Both `true` selects nothing, the same as
/// both unset.
pub(crate) fn ownership_side(company: Option<bool>, private: Option<bool>) -> Option<bool> {
    match (company == Some(true), private == Some(true)) {
        (true, false) => Some(true),
        (false, true) => Some(false),
        _ => None,
    }
}

/// Check that a numeric range is not inverted.
pub(crate) fn check_range_order(
    field: &str,
    min: Option<&Scalar>,
    max: Option<&Scalar>,
) -> Result<(), QueryError> {
    if let (Some(lo), Some(hi)) = (min, max) {
        if lo.numeric_cmp(hi) == Some(Ordering::Greater) {
            return Err(QueryError::invalid_predicate(
                field,
                format!("minimum {} exceeds maximum {}", lo, hi),
            ));
        }
    }
    Ok(())
}

/// Ordered list of predicates declared by a filter.
///
/// # Example
///
/// ```
/// use listing_search_dsl::{Predicates, SortOrder};
///
/// let predicates = Predicates::new()
///     .terms("color", &["blue", "red"])
///     .range("year", Some(2015), Some(2020))
///     .flag("is_credit", None)
///     .sort("price", Some(SortOrder::Ascending));
///
/// assert_eq!(predicates.len(), 4);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Predicates(Vec<Predicate>);

impl Predicates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an arbitrary predicate.
    pub fn push(mut self, predicate: Predicate) -> Self {
        self.0.push(predicate);
        self
    }

    pub fn exact<V: Into<Scalar>>(self, field: &'static str, value: Option<V>) -> Self {
        self.push(Predicate::Exact {
            field,
            value: value.map(Into::into),
        })
    }

    pub fn full_text(self, field: &'static str, text: Option<&str>) -> Self {
        self.push(Predicate::Match {
            field,
            text: text.map(str::to_string),
        })
    }

    pub fn multi_match(self, fields: &[&'static str], text: Option<&str>) -> Self {
        self.push(Predicate::MultiMatch {
            fields: fields.to_vec(),
            text: text.map(str::to_string),
        })
    }

    pub fn terms<V>(self, field: &'static str, values: &[V]) -> Self
    where
        V: Clone + Into<Scalar>,
    {
        self.push(Predicate::Inclusion {
            field,
            values: values.iter().cloned().map(Into::into).collect(),
        })
    }

    pub fn range<V: Into<Scalar>>(self, field: &'static str, min: Option<V>, max: Option<V>) -> Self {
        self.push(Predicate::Range {
            field,
            min: min.map(Into::into),
            max: max.map(Into::into),
        })
    }

    pub fn flag(self, field: &'static str, value: Option<bool>) -> Self {
        self.push(Predicate::Flag { field, value })
    }

    pub fn time_range(
        self,
        field: &'static str,
        min: Option<DateTime<Utc>>,
        max: Option<DateTime<Utc>>,
    ) -> Self {
        self.push(Predicate::TimeRange { field, min, max })
    }

    pub fn ownership(
        self,
        field: &'static str,
        company: Option<bool>,
        private: Option<bool>,
    ) -> Self {
        self.push(Predicate::Ownership {
            field,
            company,
            private,
        })
    }

    pub fn sort(self, field: &'static str, order: Option<SortOrder>) -> Self {
        self.push(Predicate::Sort { field, order })
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

}

impl IntoIterator for Predicates {
    type Item = Predicate;
    type IntoIter = std::vec::IntoIter<Predicate>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// A sparse set of optional search constraints for one entity kind.
pub trait PredicateSet {
    /// Declare every filter field, set or not, in clause order.
    fn predicates(&self) -> Predicates;

    /// Sort applied when no sort predicate is set. Empty by default.
    fn default_sort(&self) -> Vec<SortDirective> {
        Vec::new()
    }
}

impl PredicateSet for Predicates {
    fn predicates(&self) -> Predicates {
        self.clone()
    }
}
