use async_trait::async_trait;

use shelfscan_products::Product;

use super::r#trait::{CatalogSnapshot, CatalogSource, FetchError};

/// Serves a fixed product list.
///
/// Intended for tests/dev. Each fetch hands out a fresh clone so callers can
/// never observe each other's snapshots.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalogSource {
    products: Vec<Product>,
}

impl InMemoryCatalogSource {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }
}

#[async_trait]
impl CatalogSource for InMemoryCatalogSource {
    async fn fetch(&self, _location: Option<&str>) -> Result<CatalogSnapshot, FetchError> {
        Ok(CatalogSnapshot::new(self.products.clone(), "in-memory"))
    }

    fn describe(&self) -> String {
        format!("in-memory({} products)", self.products.len())
    }
}
