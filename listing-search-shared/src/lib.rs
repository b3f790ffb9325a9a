//! # Listing Search Shared
//!
//! This crate defines the documents stored in the listing indices and the
//! filters used to query them. Each document carries its own field-descriptor
//! table, and each filter declares its predicates, so the generic schema
//! mapper and filter compiler handle every entity kind the same way.

pub mod filters;
pub mod types;

pub use filters::{CarFilter, MotoFilter, StockFilter, TruckFilter};
pub use types::{Car, Location, Moto, SearchDocument, Stock, Truck};
