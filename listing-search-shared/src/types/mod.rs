//! This module defines the listing documents stored in the search index.
//! It re-exports the document types and the `SearchDocument` trait.

pub mod car;
pub mod document;
pub mod moto;
pub mod stock;
pub mod truck;

pub use car::Car;
pub use document::SearchDocument;
pub use moto::Moto;
pub use stock::{Location, Stock};
pub use truck::Truck;
