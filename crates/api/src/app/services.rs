use std::sync::Arc;

use rust_decimal::Decimal;

use shelfscan_analytics::{DEFAULT_REFERENCE_PRICE, ReportOptions, UnitPricePolicy};
use shelfscan_infra::{
    CatalogSnapshot, CatalogSource, FetchError, FileCatalogSource, HttpCatalogSource, Settings,
};

/// Everything a handler needs besides the request itself.
///
/// Holds no catalog data: each request fetches its own snapshot.
#[derive(Clone)]
pub struct AppServices {
    source: Arc<dyn CatalogSource>,
    reference_price: Decimal,
    policy: UnitPricePolicy,
}

impl AppServices {
    pub fn new(source: Arc<dyn CatalogSource>) -> Self {
        Self {
            source,
            reference_price: DEFAULT_REFERENCE_PRICE,
            policy: UnitPricePolicy::default(),
        }
    }

    /// Wire the catalog source named by `settings` (file beats HTTP).
    pub fn from_settings(settings: &Settings) -> Result<Self, FetchError> {
        let source: Arc<dyn CatalogSource> = match &settings.catalog.file {
            Some(path) => Arc::new(FileCatalogSource::new(path.clone())),
            None => Arc::new(HttpCatalogSource::new(&settings.catalog)?),
        };

        Ok(Self::new(source)
            .with_reference_price(settings.reference_price)
            .with_policy(settings.unit_price_policy))
    }

    pub fn with_reference_price(mut self, reference_price: Decimal) -> Self {
        self.reference_price = reference_price;
        self
    }

    pub fn with_policy(mut self, policy: UnitPricePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> UnitPricePolicy {
        self.policy
    }

    pub fn describe(&self) -> String {
        self.source.describe()
    }

    /// Report options, with a per-request reference price taking precedence.
    pub fn report_options(&self, reference_price: Option<Decimal>) -> ReportOptions {
        ReportOptions::default()
            .with_reference_price(reference_price.unwrap_or(self.reference_price))
            .with_policy(self.policy)
    }

    pub async fn snapshot(&self, location: Option<&str>) -> Result<CatalogSnapshot, FetchError> {
        self.source.fetch(location).await
    }
}
