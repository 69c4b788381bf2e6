use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::info;

use shelfscan_products::Product;

use super::r#trait::{CatalogSnapshot, CatalogSource, FetchError};

/// Reads the catalog from a local JSON file on every fetch.
///
/// Per-request locations are ignored; the file path is fixed at startup.
#[derive(Debug, Clone)]
pub struct FileCatalogSource {
    path: PathBuf,
}

impl FileCatalogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CatalogSource for FileCatalogSource {
    async fn fetch(&self, _location: Option<&str>) -> Result<CatalogSnapshot, FetchError> {
        let raw = tokio::fs::read(&self.path)
            .await
            .map_err(|e| FetchError::Network(format!("{}: {e}", self.path.display())))?;
        let products: Vec<Product> =
            serde_json::from_slice(&raw).map_err(|e| FetchError::Decode(e.to_string()))?;

        info!(source = %self.path.display(), products = products.len(), "read catalog snapshot");

        Ok(CatalogSnapshot::new(products, self.path.display().to_string()))
    }

    fn describe(&self) -> String {
        format!("file({})", self.path.display())
    }
}
