use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use shelfscan_analytics::CombinedReport;
use shelfscan_core::{DomainError, DomainResult};

// -------------------------
// Query parameters
// -------------------------

/// `?url=` naming the catalog location for this request.
#[derive(Debug, Default, Deserialize)]
pub struct CatalogQuery {
    pub url: Option<String>,
}

impl CatalogQuery {
    pub fn location(&self) -> DomainResult<Option<&str>> {
        parse_location(self.url.as_deref())
    }
}

/// `?url=&price=` for exact-price style queries.
#[derive(Debug, Default, Deserialize)]
pub struct PriceQuery {
    pub url: Option<String>,
    pub price: Option<String>,
}

impl PriceQuery {
    pub fn location(&self) -> DomainResult<Option<&str>> {
        parse_location(self.url.as_deref())
    }

    /// Requested reference price; accepts `17.99` as well as `17,99`.
    pub fn reference_price(&self) -> DomainResult<Option<Decimal>> {
        let Some(raw) = self.price.as_deref() else {
            return Ok(None);
        };

        Decimal::from_str(&raw.trim().replace(',', "."))
            .map(Some)
            .map_err(|_| {
                DomainError::invalid_parameter("price", format!("`{raw}` is not a decimal"))
            })
    }
}

fn parse_location(url: Option<&str>) -> DomainResult<Option<&str>> {
    match url {
        Some(u) if u.trim().is_empty() => {
            Err(DomainError::invalid_parameter("url", "URL parameter must not be blank"))
        }
        other => Ok(other),
    }
}

// -------------------------
// Response DTOs
// -------------------------

/// Combined report plus where and when its snapshot was fetched.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
    #[serde(flatten)]
    pub report: CombinedReport,
    pub source: String,
    pub fetched_at: DateTime<Utc>,
}
