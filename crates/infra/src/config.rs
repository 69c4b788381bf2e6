//! Configuration loading and representation.
//!
//! Everything is read from `SHELFSCAN_*` environment variables. Unset
//! variables fall back to defaults; set-but-invalid values are rejected.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use rust_decimal::Decimal;

use shelfscan_analytics::{DEFAULT_REFERENCE_PRICE, UnitPricePolicy};
use shelfscan_core::{DomainError, DomainResult};

/// Catalog feed location used when neither env nor request supplies one.
pub const DEFAULT_CATALOG_URL: &str = "https://flapotest.blob.core.windows.net/test/ProductData.json";

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

/// Upper bound on a fetched catalog body.
pub const DEFAULT_MAX_CATALOG_BYTES: usize = 16 * 1024 * 1024;

/// Where and how catalog snapshots are fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSourceConfig {
    /// `None` makes the per-request `url` mandatory.
    pub default_url: Option<String>,
    /// When set, the catalog is read from this file instead of over HTTP.
    pub file: Option<PathBuf>,
    pub timeout: Duration,
    /// Whether a request may name its own catalog URL. Off unless
    /// `SHELFSCAN_ALLOW_URL_OVERRIDE` enables it.
    pub allow_url_override: bool,
    pub max_body_bytes: usize,
    pub user_agent: String,
}

impl Default for CatalogSourceConfig {
    fn default() -> Self {
        Self {
            default_url: Some(DEFAULT_CATALOG_URL.to_string()),
            file: None,
            timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
            allow_url_override: false,
            max_body_bytes: DEFAULT_MAX_CATALOG_BYTES,
            user_agent: concat!("shelfscan/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Process-wide settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub bind_addr: SocketAddr,
    pub catalog: CatalogSourceConfig,
    /// Target of exact-price queries when the request does not name one.
    pub reference_price: Decimal,
    pub unit_price_policy: UnitPricePolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            catalog: CatalogSourceConfig::default(),
            reference_price: DEFAULT_REFERENCE_PRICE,
            unit_price_policy: UnitPricePolicy::default(),
        }
    }
}

impl Settings {
    /// Load from the process environment.
    pub fn from_env() -> DomainResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key/value lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> DomainResult<Self> {
        let mut settings = Self::default();

        let bind = lookup("SHELFSCAN_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        settings.bind_addr = parse_var("SHELFSCAN_BIND_ADDR", &bind)?;

        // An explicitly empty URL disables the default.
        if let Some(url) = lookup("SHELFSCAN_CATALOG_URL") {
            let url = url.trim();
            settings.catalog.default_url = (!url.is_empty()).then(|| url.to_string());
        }

        if let Some(path) = lookup("SHELFSCAN_CATALOG_FILE").filter(|p| !p.trim().is_empty()) {
            settings.catalog.file = Some(PathBuf::from(path.trim()));
        }

        if let Some(secs) = lookup("SHELFSCAN_FETCH_TIMEOUT_SECS") {
            let secs: u64 = parse_var("SHELFSCAN_FETCH_TIMEOUT_SECS", &secs)?;
            if secs == 0 {
                return Err(DomainError::validation(
                    "SHELFSCAN_FETCH_TIMEOUT_SECS must be greater than zero",
                ));
            }
            settings.catalog.timeout = Duration::from_secs(secs);
        }

        if let Some(flag) = lookup("SHELFSCAN_ALLOW_URL_OVERRIDE") {
            settings.catalog.allow_url_override =
                parse_bool("SHELFSCAN_ALLOW_URL_OVERRIDE", &flag)?;
        }

        if let Some(bytes) = lookup("SHELFSCAN_MAX_CATALOG_BYTES") {
            let bytes: usize = parse_var("SHELFSCAN_MAX_CATALOG_BYTES", &bytes)?;
            if bytes == 0 {
                return Err(DomainError::validation(
                    "SHELFSCAN_MAX_CATALOG_BYTES must be greater than zero",
                ));
            }
            settings.catalog.max_body_bytes = bytes;
        }

        if let Some(price) = lookup("SHELFSCAN_REFERENCE_PRICE") {
            settings.reference_price = parse_var("SHELFSCAN_REFERENCE_PRICE", &price)?;
        }

        if let Some(policy) = lookup("SHELFSCAN_UNPARSED_UNIT_PRICE") {
            settings.unit_price_policy = policy.parse()?;
        }

        Ok(settings)
    }
}

fn parse_var<T>(key: &str, raw: &str) -> DomainResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| DomainError::validation(format!("{key}=`{raw}`: {e}")))
}

fn parse_bool(key: &str, raw: &str) -> DomainResult<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(DomainError::validation(format!("{key}=`{raw}`: expected a boolean"))),
    }
}
