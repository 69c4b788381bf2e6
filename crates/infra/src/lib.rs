//! Infrastructure layer: catalog sources and configuration.

pub mod catalog_source;
pub mod config;

pub use catalog_source::{
    CatalogSnapshot, CatalogSource, FetchError, FileCatalogSource, HttpCatalogSource,
    InMemoryCatalogSource,
};
pub use config::{CatalogSourceConfig, Settings};
