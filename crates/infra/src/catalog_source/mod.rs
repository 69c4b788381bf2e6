//! Catalog source boundary.
//!
//! A source produces one fully materialized [`CatalogSnapshot`] per call or
//! fails with a [`FetchError`]. Nothing is cached between calls: every request
//! gets a fresh snapshot.

pub mod file;
pub mod http;
pub mod in_memory;
pub mod r#trait;

pub use file::FileCatalogSource;
pub use http::HttpCatalogSource;
pub use in_memory::InMemoryCatalogSource;
pub use r#trait::{CatalogSnapshot, CatalogSource, FetchError};
