//! `shelfscan-analytics`
//!
//! **Responsibility:** the aggregation engine.
//!
//! Every query is a pure fold/sort over one flattened view of a catalog
//! snapshot:
//! - It never performs IO and never mutates the catalog.
//! - It is total: an empty dataset yields `None` / an empty `Vec`, not an error.
//! - Ties resolve to the first entry in feed order.

pub mod query;
pub mod report;
pub mod view;

pub use query::{
    MostBottles, UnitPricePolicy, all_with_pack_size, cheapest_by_unit_price, exact_price_match,
    max_pack_size, most_bottles, most_expensive_by_unit_price,
};
pub use report::{
    CombinedReport, DEFAULT_REFERENCE_PRICE, MostBottlesSummary, ReportOptions, combined_report,
};
pub use view::{CatalogView, EntrySummary, FlattenedEntry};
