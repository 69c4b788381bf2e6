//! Catalog model and text normalizers.
//!
//! This crate contains the typed shape of the upstream product feed plus the
//! pure functions that turn its free-text fields into comparable numbers
//! (no IO, no HTTP, no storage).

pub mod normalize;
pub mod product;

pub use normalize::{
    UNIT_PRICE_MARKER, extract_leading_count, parse_price_per_unit, try_parse_price_per_unit,
};
pub use product::{Article, Product};
