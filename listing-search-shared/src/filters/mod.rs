//! Search filters for each listing kind.
//!
//! Every filter is a plain struct of optional fields. Unset fields add
//! nothing to the compiled query; an all-default filter matches everything.

pub mod car_filter;
pub mod moto_filter;
pub mod stock_filter;
pub mod truck_filter;

pub use car_filter::CarFilter;
pub use moto_filter::MotoFilter;
pub use stock_filter::StockFilter;
pub use truck_filter::TruckFilter;

use listing_search_dsl::SortDirective;

/// Newest listings first.
pub(crate) fn newest_first() -> Vec<SortDirective> {
    vec![SortDirective::descending("created_at")]
}
