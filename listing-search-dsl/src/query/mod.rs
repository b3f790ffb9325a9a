//! Filter compilation.
//!
//! Filters declare their fields as [`Predicates`]; [`compile`] turns any
//! [`PredicateSet`] into a [`CompiledQuery`] whose JSON form is the search
//! request body.

mod clause;
mod compiler;
mod predicate;

pub use clause::{Clause, SortDirective, SortOrder};
pub use compiler::{compile, CompiledQuery};
pub use predicate::{Predicate, PredicateSet, Predicates, Scalar};
